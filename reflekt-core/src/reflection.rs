//! # Server Reflection
//!
//! This module exposes a [`DescriptorRegistry`](crate::registry::DescriptorRegistry) through the
//! gRPC Server Reflection Protocol.
//!
//! * [`query`]: the transport-neutral query and reply model.
//! * [`server`]: the tonic services for `grpc.reflection.v1` and `grpc.reflection.v1alpha`.
//!
//! ## References
//!
//! * [gRPC Server Reflection Protocol](https://github.com/grpc/grpc/blob/master/doc/server-reflection.md)
pub mod query;
pub mod server;
