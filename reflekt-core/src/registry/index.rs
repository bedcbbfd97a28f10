//! # Indexing Pass
//!
//! A single walk over every file of the [`DescriptorStore`] that derives the lookup tables used
//! to answer reflection queries:
//!
//! * **Symbols**: fully-qualified message, enum, service, method (and extension) names to the
//!   defining file.
//! * **Extensions**: `(extendee, field number)` to the file that declares the extension.
//! * **Services**: fully-qualified service names to their descriptor, for listing and lookup.
//!
//! Every table stores positions into the store instead of copies of the descriptors.
use super::store::DescriptorStore;
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub(crate) struct Indices {
    /// Fully-qualified symbol -> file position.
    pub(crate) symbols: HashMap<String, usize>,
    /// Extendee (without leading dot) -> field number -> file position.
    pub(crate) extensions: HashMap<String, BTreeMap<i32, usize>>,
    /// Fully-qualified service name -> (file position, service position within the file).
    pub(crate) services: BTreeMap<String, (usize, usize)>,
}

impl Indices {
    pub(crate) fn build(store: &DescriptorStore) -> Self {
        let mut indices = Self::default();

        for (file_idx, file) in store.files().iter().enumerate() {
            indices.index_file(file_idx, file);
        }

        indices
    }

    fn index_file(&mut self, file_idx: usize, file: &FileDescriptorProto) {
        let package = file.package();

        for message in &file.message_type {
            self.index_message(file_idx, package, message);
        }

        for enum_type in &file.enum_type {
            self.symbols
                .insert(qualify(package, enum_type.name()), file_idx);
        }

        for extension in &file.extension {
            self.index_extension(file_idx, package, extension);
        }

        for (service_idx, service) in file.service.iter().enumerate() {
            let service_name = qualify(package, service.name());

            for method in &service.method {
                self.symbols
                    .insert(qualify(&service_name, method.name()), file_idx);
            }

            self.symbols.insert(service_name.clone(), file_idx);
            self.services.insert(service_name, (file_idx, service_idx));
        }
    }

    /// Indexes `message` and everything nested inside it. `scope` is the fully-qualified name of
    /// the enclosing container (the package for top-level messages).
    fn index_message(&mut self, file_idx: usize, scope: &str, message: &DescriptorProto) {
        let message_name = qualify(scope, message.name());

        for nested in &message.nested_type {
            self.index_message(file_idx, &message_name, nested);
        }

        for enum_type in &message.enum_type {
            self.symbols
                .insert(qualify(&message_name, enum_type.name()), file_idx);
        }

        for extension in &message.extension {
            self.index_extension(file_idx, &message_name, extension);
        }

        self.symbols.insert(message_name, file_idx);
    }

    fn index_extension(&mut self, file_idx: usize, scope: &str, extension: &FieldDescriptorProto) {
        let extendee = extension.extendee().trim_start_matches('.');

        if !extendee.is_empty()
            && let Some(number) = extension.number
        {
            self.extensions
                .entry(extendee.to_string())
                .or_default()
                .insert(number, file_idx);
        }

        // Extension names share the symbol namespace but never shadow a type, service or method.
        if !extension.name().is_empty() {
            self.symbols
                .entry(qualify(scope, extension.name()))
                .or_insert(file_idx);
        }
    }
}

/// Joins a scope and a name into a fully-qualified name. An empty scope (no package) yields
/// the bare name.
pub(crate) fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}
