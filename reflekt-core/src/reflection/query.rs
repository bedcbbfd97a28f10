//! # Reflection Queries
//!
//! A transport-neutral model of the five request shapes of the gRPC Server Reflection
//! protocol and of their results. Both protocol versions (`v1` and `v1alpha`) map onto these
//! types, so the query semantics are written once, in [`DescriptorRegistry::answer`].
use crate::registry::DescriptorRegistry;

/// A single reflection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionQuery {
    /// Find a file by its name (e.g. `helloworld/v1/helloworld.proto`).
    FileByFilename(String),
    /// Find the file declaring a fully-qualified symbol (e.g. `helloworld.Greeter`).
    FileContainingSymbol(String),
    /// Find the file declaring the extension `extension_number` of `containing_type`.
    FileContainingExtension {
        containing_type: String,
        extension_number: i32,
    },
    /// List the numbers of every known extension of a message type.
    AllExtensionNumbersOfType(String),
    /// List the fully-qualified names of every service.
    ListServices,
}

impl ReflectionQuery {
    /// A short label for the query kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ReflectionQuery::FileByFilename(_) => "file_by_filename",
            ReflectionQuery::FileContainingSymbol(_) => "file_containing_symbol",
            ReflectionQuery::FileContainingExtension { .. } => "file_containing_extension",
            ReflectionQuery::AllExtensionNumbersOfType(_) => "all_extension_numbers_of_type",
            ReflectionQuery::ListServices => "list_services",
        }
    }
}

/// The result of a [`ReflectionQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionReply {
    /// Encoded `FileDescriptorProto`s, dependencies first.
    FileDescriptors(Vec<Vec<u8>>),
    /// Extension numbers of `base_type_name`, possibly empty.
    ExtensionNumbers {
        base_type_name: String,
        extension_numbers: Vec<i32>,
    },
    /// Fully-qualified service names.
    Services(Vec<String>),
    /// The requested file, symbol or extension is not part of the registry.
    NotFound,
}

impl DescriptorRegistry {
    /// Answers a single reflection query.
    ///
    /// This never fails: a key that matches nothing produces [`ReflectionReply::NotFound`] and
    /// it is up to the transport to turn that into an (empty) protocol response.
    pub fn answer(&self, query: &ReflectionQuery) -> ReflectionReply {
        let reply = match query {
            ReflectionQuery::FileByFilename(filename) => self.file_by_filename(filename).into(),
            ReflectionQuery::FileContainingSymbol(symbol) => {
                self.file_containing_symbol(symbol).into()
            }
            ReflectionQuery::FileContainingExtension {
                containing_type,
                extension_number,
            } => self
                .file_containing_extension(containing_type, *extension_number)
                .into(),
            ReflectionQuery::AllExtensionNumbersOfType(containing_type) => {
                ReflectionReply::ExtensionNumbers {
                    base_type_name: containing_type.clone(),
                    extension_numbers: self.all_extension_numbers_of_type(containing_type),
                }
            }
            ReflectionQuery::ListServices => ReflectionReply::Services(self.list_services()),
        };

        if reply == ReflectionReply::NotFound {
            tracing::debug!(kind = query.kind(), ?query, "Reflection query matched nothing");
        }

        reply
    }
}

impl From<Option<Vec<Vec<u8>>>> for ReflectionReply {
    fn from(files: Option<Vec<Vec<u8>>>) -> Self {
        files.map_or(ReflectionReply::NotFound, ReflectionReply::FileDescriptors)
    }
}
