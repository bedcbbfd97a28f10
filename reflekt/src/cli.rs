//! # CLI
//!
//! This module defines the command-line interface of `reflekt` using `clap`.
//!
//! Every setting can also be provided through the environment (`REFLEKT_*`), which is how the
//! server is usually configured when it runs in a container.
use clap::{Parser, Subcommand, ValueEnum};
use reflekt_core::reflection::query::ReflectionQuery;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "reflekt",
    version,
    about = "gRPC Server Reflection backed by a compiled descriptor set"
)]
pub struct Cli {
    /// Path to the encoded FileDescriptorSet (.bin)
    #[arg(short = 'd', long, env = "REFLEKT_DESCRIPTOR_SET")]
    pub descriptor_set: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the reflection protocol over gRPC
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// reflekt -d descriptor.bin serve --listen 0.0.0.0:50051
    /// grpcurl -plaintext localhost:50051 list
    /// ```
    Serve {
        /// Address to listen on
        #[arg(long, env = "REFLEKT_LISTEN", default_value = "[::1]:50051")]
        listen: SocketAddr,

        /// Reflection protocol versions to serve
        #[arg(long, value_enum, default_value_t = Protocol::Both)]
        protocol: Protocol,
    },

    /// Run a reflection query against the descriptor set, without starting a server
    Inspect {
        #[command(subcommand)]
        query: InspectCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum InspectCommands {
    /// List all services
    Services,
    /// Show a file and its transitive imports
    File {
        /// File name as compiled (e.g. helloworld/v1/helloworld.proto)
        filename: String,
    },
    /// Show the file declaring a symbol and its transitive imports
    Symbol {
        /// Fully qualified symbol (e.g. my.package.Service or my.package.Message)
        symbol: String,
    },
    /// Show the file declaring an extension and its transitive imports
    Extension {
        /// Fully qualified name of the extended message
        containing_type: String,
        /// Extension field number
        extension_number: i32,
    },
    /// List the extension numbers of a message
    ExtensionNumbers {
        /// Fully qualified name of the extended message
        containing_type: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// grpc.reflection.v1
    V1,
    /// grpc.reflection.v1alpha
    V1alpha,
    /// Both versions
    Both,
}

impl Protocol {
    pub fn serves_v1(self) -> bool {
        matches!(self, Protocol::V1 | Protocol::Both)
    }

    pub fn serves_v1alpha(self) -> bool {
        matches!(self, Protocol::V1alpha | Protocol::Both)
    }
}

impl From<InspectCommands> for ReflectionQuery {
    fn from(command: InspectCommands) -> Self {
        match command {
            InspectCommands::Services => ReflectionQuery::ListServices,
            InspectCommands::File { filename } => ReflectionQuery::FileByFilename(filename),
            InspectCommands::Symbol { symbol } => ReflectionQuery::FileContainingSymbol(symbol),
            InspectCommands::Extension {
                containing_type,
                extension_number,
            } => ReflectionQuery::FileContainingExtension {
                containing_type,
                extension_number,
            },
            InspectCommands::ExtensionNumbers { containing_type } => {
                ReflectionQuery::AllExtensionNumbersOfType(containing_type)
            }
        }
    }
}
