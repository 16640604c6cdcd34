/*!
 * Whitelist-based partial selection
 */

use std::path::{Path, PathBuf};

/// Absolute paths explicitly selected by the user.
///
/// An empty whitelist selects everything. Containment is decided on whole
/// path components, so `foo-bar` is never inside `foo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    paths: Vec<PathBuf>,
}

impl Whitelist {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Whether the walk has to enter `dir`: it was selected itself,
    /// something beneath it was, or it lies inside a selected directory
    pub fn is_directory_needed(&self, dir: &Path) -> bool {
        self.is_empty()
            || self
                .paths
                .iter()
                .any(|allowed| allowed.starts_with(dir) || dir.starts_with(allowed))
    }

    /// Whether `file` was selected directly or lives under a selected
    /// directory
    pub fn is_file_included(&self, file: &Path) -> bool {
        self.is_empty() || self.paths.iter().any(|allowed| file.starts_with(allowed))
    }
}

impl From<Vec<PathBuf>> for Whitelist {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}
