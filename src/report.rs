/*!
 * Reporting functionality for structify
 *
 * Renders a summary of a finished run using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::config::{Mode, OutputFormat};
use crate::scanner::ScannerStatistics;
use crate::utils::format_file_size;
use crate::writer::WriteStatistics;

/// Information about an embedded file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
    /// Size of the file in bytes
    pub bytes: u64,
}

/// Everything known about a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Output file path
    pub output_file: String,
    /// Archive format
    pub format: OutputFormat,
    /// Collection mode
    pub mode: Mode,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Traversal counters
    pub scan: ScannerStatistics,
    /// Rendering totals
    pub write: WriteStatistics,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for finished runs
pub struct Reporter {
    format: ReportFormat,
}

/// Files listed individually before switching to a top-N view
const FULL_LISTING_LIMIT: usize = 15;
const TOP_FILES: usize = 10;

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let row = |key: &str, value: String| SummaryRow {
            key: key.to_string(),
            value,
        };

        let rows = vec![
            row("📂 Output File", report.output_file.clone()),
            row("📝 Format", report.format.to_string()),
            row("🧭 Mode", report.mode.to_string()),
            row("⏱️ Process Time", format!("{:.4?}", report.duration)),
            row("📁 Directories Visited", self.format_number(report.scan.directories_visited)),
            row("📄 Files Written", self.format_number(report.write.files_written)),
            row(
                "🖼️ Asset Directories Skipped",
                self.format_number(report.write.assets_only_directories),
            ),
            row("🚫 Entries Ignored", self.format_number(report.scan.entries_skipped)),
            row("📏 Total Lines", self.format_number(report.write.total_lines)),
            row("📦 Total Size", format_file_size(report.write.total_bytes)),
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let mut files: Vec<_> = report.write.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));
        if files.len() > FULL_LISTING_LIMIT {
            files.truncate(TOP_FILES);
        }

        let rows: Vec<FileRow> = files
            .iter()
            .map(|(path, info)| FileRow {
                path: path.clone(),
                lines: self.format_number(info.lines),
                size: format_file_size(info.bytes),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "✅  ARCHIVE COMPLETE";
        let files_title = if report.write.file_details.len() > FULL_LISTING_LIMIT {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  ARCHIVED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}
