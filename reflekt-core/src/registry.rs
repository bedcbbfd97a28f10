//! # Descriptor Registry
//!
//! The [`DescriptorRegistry`] answers gRPC Server Reflection queries from a single encoded
//! `FileDescriptorSet` that is loaded once, indexed once and never mutated afterwards.
//!
//! Every lookup that resolves to a file returns that file **and its transitive imports**, in
//! dependency-first order and encoded to their binary wire form. A reflection client can
//! register the returned descriptors one after the other without ever seeing a forward
//! reference.
//!
//! A query that matches nothing returns `None`. That is an expected outcome and never an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use reflekt_core::registry::DescriptorRegistry;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = DescriptorRegistry::from_path("descriptor.bin")?;
//!
//! for service in registry.list_services() {
//!     println!("{service}");
//! }
//!
//! if let Some(files) = registry.file_containing_symbol("helloworld.Greeter") {
//!     println!("{} encoded files", files.len());
//! }
//! # Ok(())
//! # }
//! ```
mod index;
mod resolver;
mod store;

pub use store::LoadError;

use index::Indices;
use prost::Message;
use prost_types::{FileDescriptorProto, FileDescriptorSet, ServiceDescriptorProto};
use std::path::Path;
use store::DescriptorStore;

/// An immutable, indexed view over a `FileDescriptorSet`.
///
/// The registry owns all of its data and has no interior mutability, so it is `Send + Sync` and
/// can be shared between request handlers behind an `Arc` without any locking.
#[derive(Debug, Clone)]
pub struct DescriptorRegistry {
    store: DescriptorStore,
    indices: Indices,
}

impl DescriptorRegistry {
    /// Reads and indexes the encoded `FileDescriptorSet` stored at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(DescriptorRegistry)` - The fully indexed registry.
    /// * `Err(LoadError)` - The file is missing, unreadable or not a valid descriptor set.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Loading descriptor set");

        Self::decode(&bytes)
    }

    /// Decodes and indexes an encoded `FileDescriptorSet`.
    ///
    /// # Returns
    ///
    /// * `Ok(DescriptorRegistry)` - The fully indexed registry.
    /// * `Err(LoadError::Decode)` - The bytes are truncated or malformed.
    pub fn decode(bytes: &[u8]) -> Result<Self, LoadError> {
        let store = DescriptorStore::decode(bytes)?;
        Ok(Self::from_store(store))
    }

    /// Indexes an already decoded `FileDescriptorSet`.
    pub fn from_file_descriptor_set(set: FileDescriptorSet) -> Self {
        Self::from_store(DescriptorStore::from_set(set))
    }

    fn from_store(store: DescriptorStore) -> Self {
        let indices = Indices::build(&store);

        tracing::debug!(
            files = store.files().len(),
            symbols = indices.symbols.len(),
            extendees = indices.extensions.len(),
            services = indices.services.len(),
            "Descriptor registry indexed"
        );

        Self { store, indices }
    }

    /// Returns the encoded file named `filename`, preceded by its transitive dependencies.
    ///
    /// # Returns
    ///
    /// * `Some(files)` - Encoded `FileDescriptorProto`s, dependencies first, requested file last.
    /// * `None` - No file with that name is loaded.
    pub fn file_by_filename(&self, filename: &str) -> Option<Vec<Vec<u8>>> {
        let root = self.store.position(filename)?;
        Some(self.encode_with_dependencies(root))
    }

    /// Returns the encoded file declaring `symbol`, preceded by its transitive dependencies.
    ///
    /// `symbol` is a fully-qualified name without leading dot: `<package>.<Message>`,
    /// `<package>.<Outer>.<Inner>`, `<package>.<Enum>`, `<package>.<Service>` or
    /// `<package>.<Service>.<Method>`.
    pub fn file_containing_symbol(&self, symbol: &str) -> Option<Vec<Vec<u8>>> {
        let root = self.symbol_position(symbol)?;
        Some(self.encode_with_dependencies(root))
    }

    /// Returns the encoded file declaring the extension of `containing_type` numbered
    /// `extension_number`, preceded by its transitive dependencies.
    pub fn file_containing_extension(
        &self,
        containing_type: &str,
        extension_number: i32,
    ) -> Option<Vec<Vec<u8>>> {
        let root = self.extension_position(containing_type, extension_number)?;
        Some(self.encode_with_dependencies(root))
    }

    /// Returns the field numbers of every known extension of `containing_type`.
    ///
    /// Numbers are returned in ascending order, though reflection clients must not rely on it.
    /// An unknown type simply has no extensions.
    pub fn all_extension_numbers_of_type(&self, containing_type: &str) -> Vec<i32> {
        self.indices
            .extensions
            .get(normalize(containing_type))
            .map(|numbers| numbers.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Lists the fully-qualified names of every service in the descriptor set, in ascending
    /// order.
    pub fn list_services(&self) -> Vec<String> {
        self.indices.services.keys().cloned().collect()
    }

    /// Looks up a service by its fully-qualified name (e.g. `helloworld.Greeter`).
    pub fn find_service(&self, name: &str) -> Option<&ServiceDescriptorProto> {
        let (file_idx, service_idx) = *self.indices.services.get(normalize(name))?;
        self.store.file(file_idx).service.get(service_idx)
    }

    /// Returns the loaded file named `filename`, without its dependencies.
    pub fn file(&self, filename: &str) -> Option<&FileDescriptorProto> {
        self.store.file_by_name(filename)
    }

    /// Iterates over every loaded file, in descriptor set order.
    pub fn files(&self) -> impl Iterator<Item = &FileDescriptorProto> {
        self.store.files().iter()
    }

    /// Returns a copy of the loaded descriptor set.
    pub fn descriptor_set(&self) -> FileDescriptorSet {
        self.store.to_set()
    }

    /// Name-only variant of [`Self::file_by_filename`].
    pub fn file_names_by_filename(&self, filename: &str) -> Option<Vec<&str>> {
        let root = self.store.position(filename)?;
        Some(self.names_with_dependencies(root))
    }

    /// Name-only variant of [`Self::file_containing_symbol`].
    pub fn file_names_containing_symbol(&self, symbol: &str) -> Option<Vec<&str>> {
        let root = self.symbol_position(symbol)?;
        Some(self.names_with_dependencies(root))
    }

    /// Name-only variant of [`Self::file_containing_extension`].
    pub fn file_names_containing_extension(
        &self,
        containing_type: &str,
        extension_number: i32,
    ) -> Option<Vec<&str>> {
        let root = self.extension_position(containing_type, extension_number)?;
        Some(self.names_with_dependencies(root))
    }

    fn symbol_position(&self, symbol: &str) -> Option<usize> {
        self.indices.symbols.get(normalize(symbol)).copied()
    }

    fn extension_position(&self, containing_type: &str, extension_number: i32) -> Option<usize> {
        self.indices
            .extensions
            .get(normalize(containing_type))?
            .get(&extension_number)
            .copied()
    }

    fn encode_with_dependencies(&self, root: usize) -> Vec<Vec<u8>> {
        resolver::collect_with_dependencies(&self.store, root)
            .into_iter()
            .map(|idx| self.store.file(idx).encode_to_vec())
            .collect()
    }

    fn names_with_dependencies(&self, root: usize) -> Vec<&str> {
        resolver::collect_with_dependencies(&self.store, root)
            .into_iter()
            .map(|idx| self.store.file(idx).name())
            .collect()
    }
}

// Clients sometimes send type names in their `.pkg.Type` form.
fn normalize(name: &str) -> &str {
    name.strip_prefix('.').unwrap_or(name)
}
