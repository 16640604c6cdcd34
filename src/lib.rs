/*!
 * Structify - document a project's file tree into a single archive
 *
 * Walks a project directory, applies the static ignore policy, the root
 * `.gitignore` and an optional user selection, and renders the surviving
 * files into one markdown or plain-text document. Directories that hold
 * nothing but images, fonts or videos are collapsed into a single notice.
 */

pub mod classify;
pub mod config;
pub mod error;
pub mod fs;
pub mod gitignore;
pub mod logging;
pub mod policy;
pub mod report;
pub mod scanner;
pub mod select;
pub mod selection;
pub mod types;
pub mod utils;
pub mod writer;


use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use tracing::info;

// Re-export main components for easier access
pub use config::{Args, Config, Mode, OutputFormat};
pub use error::{Result, StructifyError};
pub use gitignore::GitignoreMatcher;
pub use report::{FileReportInfo, ReportFormat, Reporter, RunReport};
pub use scanner::{ScanResult, Scanner, ScannerStatistics};
pub use selection::Whitelist;
pub use types::{CollectedItem, ItemKind};
pub use writer::{ArchiveWriter, WriteStatistics};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan the configured project and write its archive.
///
/// Nothing is written unless the whole scan succeeds.
pub fn run(config: &Config, progress: Arc<ProgressBar>) -> Result<RunReport> {
    let start_time = Instant::now();

    let gitignore = GitignoreMatcher::load(&config.start_dir)?;
    if gitignore.is_some() {
        info!("respecting .gitignore in the project root");
    }

    let scanner = Scanner::new(&config.start_dir, config.whitelist.clone(), gitignore)
        .with_excluded(&config.output_file)
        .with_progress(Arc::clone(&progress));
    let scan = scanner.scan()?;
    info!(
        files = scan.statistics.files_collected,
        collapsed = scan.statistics.assets_only_directories,
        "scan complete"
    );

    progress.set_length(scan.items.len() as u64);
    progress.set_position(0);
    let writer = ArchiveWriter::new(&config.start_dir, config.format).with_progress(progress);
    let write = writer.write(&scan.items, &config.output_file)?;

    Ok(RunReport {
        output_file: config.output_file.display().to_string(),
        format: config.format,
        mode: config.mode,
        duration: start_time.elapsed(),
        scan: scan.statistics,
        write,
    })
}
