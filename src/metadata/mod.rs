//! Metadata store.
//!
//! Decoders write into a [`Metadata`] owned by the caller. It holds one
//! [`Directory`] per [`DirectoryKind`], created on first use. A fresh store
//! should be used for each decoded segment.

mod directory;
mod kind;

use std::collections::BTreeMap;

use serde::Serialize;

pub use directory::{Directory, Rational, TagValue};
pub use kind::DirectoryKind;

/// All directories decoded from one segment (or from sibling segments of the
/// same image).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metadata {
    directories: BTreeMap<DirectoryKind, Directory>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the directory for `kind`, creating it if needed.
    ///
    /// Repeated calls with the same kind return the same directory.
    pub fn get_or_create_directory(&mut self, kind: DirectoryKind) -> &mut Directory {
        self.directories
            .entry(kind)
            .or_insert_with(|| Directory::new(kind))
    }

    #[inline]
    pub fn directory(&self, kind: DirectoryKind) -> Option<&Directory> {
        self.directories.get(&kind)
    }

    #[inline]
    pub fn contains_directory(&self, kind: DirectoryKind) -> bool {
        self.directories.contains_key(&kind)
    }

    /// Iterate over the directories in [`DirectoryKind`] order.
    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.directories.values()
    }

    #[inline]
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Whether any directory recorded an error.
    pub fn has_errors(&self) -> bool {
        self.directories.values().any(Directory::has_errors)
    }
}
