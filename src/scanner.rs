/*!
 * Directory traversal and filtering
 */

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::debug;

use crate::classify::is_assets_only;
use crate::fs::{FileSystem, LocalFs};
use crate::gitignore::GitignoreMatcher;
use crate::policy::{is_always_ignored, is_env_file};
use crate::selection::Whitelist;
use crate::types::{CollectedItem, EntryInfo};
use crate::utils::display_relative;

/// Counters gathered during one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerStatistics {
    /// Directories whose entries were listed
    pub directories_visited: usize,
    /// File items emitted
    pub files_collected: usize,
    /// Assets-only markers emitted
    pub assets_only_directories: usize,
    /// Entries dropped by the ignore policy or gitignore rules
    pub entries_skipped: usize,
    /// Files dropped because they were not selected
    pub files_unselected: usize,
}

/// Result of a completed scan
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Collected items in depth-first, pre-order
    pub items: Vec<CollectedItem>,
    /// Scan counters
    pub statistics: ScannerStatistics,
}

/// Why an entry was left out of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    AlwaysIgnored,
    EnvFile,
    Gitignore,
    OutputFile,
}

/// Recursive walker producing the classified item list for a project
pub struct Scanner<F: FileSystem = LocalFs> {
    /// Project root; gitignore paths are made relative to it
    root: PathBuf,
    /// User selection (empty selects everything)
    whitelist: Whitelist,
    /// Rules from the root `.gitignore`, if present
    gitignore: Option<GitignoreMatcher>,
    /// A path never collected, typically the archive being written
    excluded: Option<PathBuf>,
    /// Filesystem access
    fs: F,
    /// Progress bar
    progress: Arc<ProgressBar>,
}

impl Scanner<LocalFs> {
    /// Create a scanner over the local filesystem
    pub fn new(
        root: impl Into<PathBuf>,
        whitelist: Whitelist,
        gitignore: Option<GitignoreMatcher>,
    ) -> Self {
        Self::with_fs(LocalFs, root, whitelist, gitignore)
    }
}

impl<F: FileSystem> Scanner<F> {
    /// Create a scanner over a custom filesystem
    pub fn with_fs(
        fs: F,
        root: impl Into<PathBuf>,
        whitelist: Whitelist,
        gitignore: Option<GitignoreMatcher>,
    ) -> Self {
        Self {
            root: root.into(),
            whitelist,
            gitignore,
            excluded: None,
            fs,
            progress: Arc::new(ProgressBar::hidden()),
        }
    }

    /// Report visited directories on a progress bar
    pub fn with_progress(mut self, progress: Arc<ProgressBar>) -> Self {
        self.progress = progress;
        self
    }

    /// Never collect `path` (the output archive when it lives in the tree)
    pub fn with_excluded(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded = Some(path.into());
        self
    }

    /// Walk the project.
    ///
    /// An empty whitelist walks everything and collapses assets-only
    /// directories into a single marker. A non-empty whitelist expands
    /// selected directories into individual files and never collapses.
    /// The first listing error aborts the whole scan.
    pub fn scan(&self) -> io::Result<ScanResult> {
        let mut result = ScanResult::default();
        let root = self.root.clone();

        if self.whitelist.is_empty() {
            debug!(root = %root.display(), "scanning entire project");
            self.gather_all(&root, &mut result)?;
        } else {
            debug!(
                root = %root.display(),
                selected = self.whitelist.len(),
                "scanning selected paths"
            );
            self.gather_by_whitelist(&root, &mut result)?;
        }

        Ok(result)
    }

    fn gather_all(&self, dir: &Path, result: &mut ScanResult) -> io::Result<()> {
        if is_assets_only(&self.fs, dir)? {
            debug!(dir = %self.display(dir), "collapsing assets-only directory");
            result.statistics.assets_only_directories += 1;
            result.items.push(CollectedItem::assets_only(dir));
            return Ok(());
        }

        for entry in self.list_dir(dir, result)? {
            if entry.is_dir {
                self.gather_all(&entry.path, result)?;
            } else {
                result.statistics.files_collected += 1;
                result.items.push(CollectedItem::file(entry.path));
            }
        }

        Ok(())
    }

    fn gather_by_whitelist(&self, dir: &Path, result: &mut ScanResult) -> io::Result<()> {
        if !self.whitelist.is_directory_needed(dir) {
            return Ok(());
        }

        for entry in self.list_dir(dir, result)? {
            if entry.is_dir {
                self.gather_by_whitelist(&entry.path, result)?;
            } else if self.whitelist.is_file_included(&entry.path) {
                result.statistics.files_collected += 1;
                result.items.push(CollectedItem::file(entry.path));
            } else {
                result.statistics.files_unselected += 1;
            }
        }

        Ok(())
    }

    /// List a directory, dropping entries excluded by policy or gitignore
    fn list_dir(&self, dir: &Path, result: &mut ScanResult) -> io::Result<Vec<EntryInfo>> {
        self.progress.inc(1);
        self.progress.set_message(format!("📂 {}", self.display(dir)));
        result.statistics.directories_visited += 1;

        let mut kept = Vec::new();
        for entry in self.fs.list_entries(dir)? {
            match self.skip_reason(&entry) {
                Some(reason) => {
                    debug!(path = %self.display(&entry.path), ?reason, "skipping entry");
                    result.statistics.entries_skipped += 1;
                }
                None => kept.push(entry),
            }
        }

        Ok(kept)
    }

    fn skip_reason(&self, entry: &EntryInfo) -> Option<SkipReason> {
        if is_always_ignored(&entry.name) {
            return Some(SkipReason::AlwaysIgnored);
        }
        if is_env_file(&entry.name) {
            return Some(SkipReason::EnvFile);
        }
        if let Some(gitignore) = &self.gitignore {
            let relative = entry
                .path
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| Path::new(&entry.name));
            if gitignore.is_ignored(relative, entry.is_dir) {
                return Some(SkipReason::Gitignore);
            }
        }
        if !entry.is_dir && self.excluded.as_deref() == Some(entry.path.as_path()) {
            return Some(SkipReason::OutputFile);
        }
        None
    }

    fn display(&self, path: &Path) -> String {
        display_relative(path, &self.root)
    }
}
