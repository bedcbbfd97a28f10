//! # Reflekt Core
//!
//! `reflekt-core` implements the server side of the gRPC Server Reflection Protocol on top of a
//! compiled `FileDescriptorSet`, the binary artifact `protoc --descriptor_set_out` (or
//! `tonic-prost-build`) produces for the services a server exposes.
//!
//! ## Key Components
//!
//! * **[`DescriptorRegistry`](registry::DescriptorRegistry):** Loads the descriptor set once,
//!   indexes every symbol, extension and service, and answers reflection queries with the
//!   requested file plus its transitive imports, dependencies first.
//! * **[`ReflectionQuery`](reflection::query::ReflectionQuery) &
//!   [`ReflectionReply`](reflection::query::ReflectionReply):** The protocol's five request
//!   shapes and their results, independent from any protocol version.
//! * **[`RegistryReflection`](reflection::server::RegistryReflection):** A tonic service serving
//!   a registry over `grpc.reflection.v1` and `grpc.reflection.v1alpha`.
//!
//! The registry is immutable once built, so a single instance can be shared behind an `Arc` by
//! any number of concurrent streams.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost`, `prost-types` and `tonic` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod reflection;
pub mod registry;

// Re-exports
pub use prost;
pub use prost_types;
pub use tonic;
