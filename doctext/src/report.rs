//! Human-readable rendering and JSON persistence of extraction results.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::models::{BatchReport, FormatDetails, Metadata};

const RULE_WIDTH: usize = 60;

/// Formats `n` with `,` thousands separators.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_metadata(metadata: &Metadata) -> String {
    let rule = "=".repeat(50);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "FILE METADATA:");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "File Type: {}", metadata.file_type());
    let _ = writeln!(out, "Characters: {}", group_thousands(metadata.characters));
    let _ = writeln!(out, "Words: {}", group_thousands(metadata.words));
    match metadata.details {
        FormatDetails::Pdf { pages } => {
            let _ = writeln!(out, "Pages: {pages}");
        }
        FormatDetails::Word { paragraphs, tables } => {
            let _ = writeln!(out, "Paragraphs: {paragraphs}");
            let _ = writeln!(out, "Tables: {tables}");
        }
        FormatDetails::Presentation { slides } => {
            let _ = writeln!(out, "Slides: {slides}");
        }
        FormatDetails::Spreadsheet { sheets } => {
            let _ = writeln!(out, "Sheets: {sheets}");
        }
    }
    let _ = write!(out, "{rule}");
    out
}

pub fn render_summary(report: &BatchReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let summary = report.summary();
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "BATCH PROCESSING SUMMARY");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Total processed: {}", summary.total_processed);

    if summary.successful > 0 {
        let _ = writeln!(out, "\nSuccessfully processed: {} files", summary.successful);
        let _ = writeln!(
            out,
            "   Total characters extracted: {}",
            group_thousands(summary.total_characters)
        );
        let _ = writeln!(
            out,
            "   Total words extracted: {}",
            group_thousands(summary.total_words)
        );
        let _ = writeln!(out, "\n   Format breakdown:");
        for (file_type, count) in &summary.by_format {
            let _ = writeln!(out, "     {file_type}: {count} files");
        }
    }

    if summary.failed > 0 {
        let _ = writeln!(out, "\nFailed to process: {} files", summary.failed);
        for entry in report.failures() {
            let _ = writeln!(
                out,
                "   {}: {}",
                entry.file_name,
                entry.error().unwrap_or_default()
            );
        }
    }

    out
}

/// `batch_extraction_report_<YYYYmmdd_HHMMSS>.json` for the given local time.
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("batch_extraction_report_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Writes `report` as pretty JSON into `dir` and returns the file's path.
pub fn save_report(report: &BatchReport, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_file_name(report.generated_at().with_timezone(&Local)));
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "Saved batch report");
    Ok(path)
}
