/*!
 * Core types and data structures for the structify application
 */

use std::path::{Path, PathBuf};

/// Classification of a collected item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A regular file whose contents are embedded in the archive
    File,
    /// A directory whose whole subtree holds only asset files
    AssetsOnlyDirectory,
}

/// The unit of traversal output
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectedItem {
    /// Item classification
    pub kind: ItemKind,
    /// Absolute filesystem path
    pub path: PathBuf,
}

impl CollectedItem {
    /// Create a file item
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ItemKind::File,
            path: path.into(),
        }
    }

    /// Create an assets-only directory marker
    pub fn assets_only(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ItemKind::AssetsOnlyDirectory,
            path: path.into(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }
}

/// A single entry returned by a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Base name of the entry
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is a directory (symlinks are not followed)
    pub is_dir: bool,
}

impl EntryInfo {
    /// Lower-cased extension including the leading dot, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
    }
}
