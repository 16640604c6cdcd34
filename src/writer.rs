/*!
 * Archive writer: renders collected items as markdown or plain text
 */

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::fs::{FileSystem, LocalFs};
use crate::report::FileReportInfo;
use crate::types::{CollectedItem, ItemKind};
use crate::utils::display_relative;

/// Separator line placed before every item in markdown archives
pub const MARKDOWN_SEPARATOR: &str = "|===================|";

/// Notice written in place of an assets-only directory
pub const ASSETS_ONLY_NOTICE: &str = "This directory contains only images/fonts/videos (skipped).";

/// Totals gathered while rendering an archive
#[derive(Debug, Clone, Default)]
pub struct WriteStatistics {
    /// Number of embedded files
    pub files_written: usize,
    /// Number of collapsed asset directories
    pub assets_only_directories: usize,
    /// Total number of lines across embedded files
    pub total_lines: usize,
    /// Total number of characters across embedded files
    pub total_chars: usize,
    /// Total size of embedded files in bytes
    pub total_bytes: u64,
    /// Per-file details keyed by relative path, in archive order
    pub file_details: Vec<(String, FileReportInfo)>,
}

/// Renders collected items into a single archive
pub struct ArchiveWriter<F: FileSystem = LocalFs> {
    /// Project root; item paths are shown relative to it
    start_dir: PathBuf,
    /// Archive format
    format: OutputFormat,
    /// Filesystem used to read file contents
    fs: F,
    /// Progress bar
    progress: Arc<ProgressBar>,
}

impl ArchiveWriter<LocalFs> {
    /// Create a writer reading from the local filesystem
    pub fn new(start_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self::with_fs(LocalFs, start_dir, format)
    }
}

impl<F: FileSystem> ArchiveWriter<F> {
    pub fn with_fs(fs: F, start_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            start_dir: start_dir.into(),
            format,
            fs,
            progress: Arc::new(ProgressBar::hidden()),
        }
    }

    /// Advance a progress bar per rendered item
    pub fn with_progress(mut self, progress: Arc<ProgressBar>) -> Self {
        self.progress = progress;
        self
    }

    /// Render every item and write the archive to `output`.
    ///
    /// The archive is rendered completely before `output` is created, so a
    /// read failure leaves no partial file behind.
    pub fn write(&self, items: &[CollectedItem], output: &Path) -> io::Result<WriteStatistics> {
        let (content, stats) = self.render(items)?;
        fs::write(output, content)?;
        info!(
            output = %output.display(),
            files = stats.files_written,
            collapsed = stats.assets_only_directories,
            "archive written"
        );
        Ok(stats)
    }

    /// Render the archive into memory
    pub fn render(&self, items: &[CollectedItem]) -> io::Result<(String, WriteStatistics)> {
        let mut out = String::new();
        let mut stats = WriteStatistics::default();

        self.write_header(&mut out);

        for item in items {
            self.progress.inc(1);
            let rel = display_relative(&item.path, &self.start_dir);
            self.progress.set_message(format!("Current file: {}", rel));

            match item.kind {
                ItemKind::AssetsOnlyDirectory => {
                    stats.assets_only_directories += 1;
                    self.write_assets_only(&mut out, &rel);
                }
                ItemKind::File => {
                    let bytes = self.fs.read_file(&item.path)?;
                    let content = String::from_utf8_lossy(&bytes);
                    let info = FileReportInfo {
                        lines: content.lines().count(),
                        chars: content.chars().count(),
                        bytes: bytes.len() as u64,
                    };
                    debug!(path = %rel, lines = info.lines, "embedding file");

                    stats.files_written += 1;
                    stats.total_lines += info.lines;
                    stats.total_chars += info.chars;
                    stats.total_bytes += info.bytes;
                    stats.file_details.push((rel.clone(), info));

                    self.write_file(&mut out, &rel, &content);
                }
            }
        }

        Ok((out, stats))
    }

    fn write_header(&self, out: &mut String) {
        let name = self
            .start_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.start_dir.display().to_string());
        let timestamp = Local::now().to_rfc3339();

        // Writing into a String cannot fail
        let _ = match self.format {
            OutputFormat::Md => write!(out, "# Project: {}\n\nGenerated: {}\n\n", name, timestamp),
            OutputFormat::Txt => write!(out, "Project: {}\nGenerated: {}\n\n", name, timestamp),
        };
    }

    fn write_file(&self, out: &mut String, rel: &str, content: &str) {
        let _ = match self.format {
            OutputFormat::Md => write!(
                out,
                "{}\n**File**: `{}`\n\n```\n{}\n```\n\n",
                MARKDOWN_SEPARATOR, rel, content
            ),
            OutputFormat::Txt => write!(
                out,
                "{}\nFile: {}\n{}\n{}\n\n",
                text_separator(),
                rel,
                text_separator(),
                content
            ),
        };
    }

    fn write_assets_only(&self, out: &mut String, rel: &str) {
        let _ = match self.format {
            OutputFormat::Md => write!(
                out,
                "{}\n**Directory**: `{}`\n\n> {}\n\n",
                MARKDOWN_SEPARATOR, rel, ASSETS_ONLY_NOTICE
            ),
            OutputFormat::Txt => write!(
                out,
                "{}\nDirectory: {}\n{}\n{}\n\n",
                text_separator(),
                rel,
                text_separator(),
                ASSETS_ONLY_NOTICE
            ),
        };
    }
}

fn text_separator() -> String {
    "=".repeat(40)
}
