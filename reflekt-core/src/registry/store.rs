//! # Descriptor Store
//!
//! Owns the decoded `FileDescriptorSet`. Files keep the order in which they appear in the
//! encoded set, and every other index in the registry refers to them by position.
use prost::Message;
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use std::collections::HashMap;
use std::path::PathBuf;

/// Errors raised while building a registry from a descriptor set artifact.
///
/// All of them are fatal: a registry is either fully built or not built at all.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Descriptor set file not found: '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read descriptor set file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode FileDescriptorSet: {0}")]
    Decode(#[from] prost::DecodeError),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DescriptorStore {
    files: Vec<FileDescriptorProto>,
    by_name: HashMap<String, usize>,
}

impl DescriptorStore {
    /// Decodes an encoded `FileDescriptorSet`.
    pub(crate) fn decode(bytes: &[u8]) -> Result<Self, LoadError> {
        let set = FileDescriptorSet::decode(bytes)?;
        Ok(Self::from_set(set))
    }

    pub(crate) fn from_set(set: FileDescriptorSet) -> Self {
        let by_name = set
            .file
            .iter()
            .enumerate()
            .map(|(idx, file)| (file.name().to_string(), idx))
            .collect();

        Self {
            files: set.file,
            by_name,
        }
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn file_by_name(&self, name: &str) -> Option<&FileDescriptorProto> {
        self.position(name).map(|idx| &self.files[idx])
    }

    pub(crate) fn file(&self, idx: usize) -> &FileDescriptorProto {
        &self.files[idx]
    }

    pub(crate) fn files(&self) -> &[FileDescriptorProto] {
        &self.files
    }

    pub(crate) fn to_set(&self) -> FileDescriptorSet {
        FileDescriptorSet {
            file: self.files.clone(),
        }
    }
}
