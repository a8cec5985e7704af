use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::BatchError;
use crate::models::{BatchEntry, BatchReport, EntryOutcome, Extraction};
use crate::processing::dispatcher::TextExtractor;

/// Patterns used by directory mode when the caller supplies none.
pub const DEFAULT_PATTERNS: [&str; 5] = ["*.pdf", "*.docx", "*.pptx", "*.xlsx", "*.xls"];

/// Number of characters kept in a report entry's preview.
pub const PREVIEW_CHARS: usize = 200;

const OUTPUT_SUFFIX: &str = "_extracted_text.txt";

/// Runs the extractor over many files, one at a time, and collects a [`BatchReport`].
///
/// A file that fails never stops the run; its reason is recorded in its
/// entry and processing moves on to the next path.
#[derive(Debug, Clone)]
pub struct BatchExtractor {
    extractor: TextExtractor,
    output_dir: PathBuf,
}

impl Default for BatchExtractor {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BatchExtractor {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            extractor: TextExtractor::new(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output_dir>/<file stem>_extracted_text.txt`
    pub fn output_path_for(&self, path: &Path) -> PathBuf {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir.join(format!("{stem}{OUTPUT_SUFFIX}"))
    }

    pub fn run_batch<I, P>(&self, paths: I) -> BatchReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths: Vec<PathBuf> = paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();
        let total = paths.len();

        if total == 0 {
            tracing::info!("No files to process");
            return BatchReport::empty();
        }

        tracing::info!(total, "Processing {} files", total);

        let mut written = HashSet::new();
        let mut entries = Vec::with_capacity(total);
        for (i, path) in paths.iter().enumerate() {
            let entry = self.process_file(i + 1, total, path, &mut written);
            entries.push(entry);
        }

        let report = BatchReport::from_entries(entries);
        let summary = report.summary();
        tracing::info!(
            total_processed = summary.total_processed,
            successful = summary.successful,
            failed = summary.failed,
            "Batch run complete"
        );

        report
    }

    /// Directory mode with [`DEFAULT_PATTERNS`].
    pub fn process_directory(&self, dir: impl AsRef<Path>) -> Result<BatchReport, BatchError> {
        self.process_directory_with(dir, &DEFAULT_PATTERNS)
    }

    pub fn process_directory_with<S: AsRef<str>>(
        &self,
        dir: impl AsRef<Path>,
        patterns: &[S],
    ) -> Result<BatchReport, BatchError> {
        let dir = dir.as_ref();
        let files = collect_files(dir, patterns)?;

        if files.is_empty() {
            return Err(BatchError::NoMatchingFiles(dir.to_path_buf()));
        }

        tracing::info!(dir = %dir.display(), count = files.len(), "Found files to process");
        for file in &files {
            tracing::debug!("  - {}", display_name(file));
        }

        Ok(self.run_batch(&files))
    }

    fn process_file(
        &self,
        index: usize,
        total: usize,
        path: &Path,
        written: &mut HashSet<PathBuf>,
    ) -> BatchEntry {
        let file_name = display_name(path);
        tracing::info!("[{}/{}] Processing: {}", index, total, file_name);

        let outcome = match self.extractor.extract(path) {
            Ok(extraction) => {
                let output_path = self.output_path_for(path);
                if !written.insert(output_path.clone()) {
                    tracing::warn!(
                        output = %output_path.display(),
                        "{} overwrites text extracted earlier in this run",
                        file_name
                    );
                }
                self.save_output(output_path, extraction)
            }
            Err(e) => EntryOutcome::Failed {
                error: e.to_string(),
            },
        };

        match &outcome {
            EntryOutcome::Success { metadata, .. } => tracing::info!(
                characters = metadata.characters,
                words = metadata.words,
                "Success: {}",
                file_name
            ),
            EntryOutcome::Failed { error } => {
                tracing::warn!(error = %error, "Failed: {}", file_name)
            }
        }

        BatchEntry {
            file_path: path.to_path_buf(),
            file_name,
            outcome,
        }
    }

    fn save_output(&self, output_path: PathBuf, extraction: Extraction) -> EntryOutcome {
        let Extraction { text, metadata } = extraction;

        if let Err(e) = fs::write(&output_path, &text) {
            return EntryOutcome::Failed {
                error: format!(
                    "Failed to write output file {}: {}",
                    output_path.display(),
                    e
                ),
            };
        }

        EntryOutcome::Success {
            output_path,
            metadata,
            preview: make_preview(&text, PREVIEW_CHARS),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// First `max_chars` characters of `text`, with `...` appended when anything was cut.
pub fn make_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Resolves `patterns` inside `dir` into an ordered, de-duplicated file list.
///
/// Order is pattern order, then glob match order within each pattern. Only
/// regular files are kept; dotfiles are not matched by a leading wildcard.
pub fn collect_files<S: AsRef<str>>(dir: &Path, patterns: &[S]) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::DirectoryNotFound(dir.to_path_buf()));
    }

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    let escaped_dir = Pattern::escape(&dir.to_string_lossy());

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let full = Path::new(&escaped_dir).join(pattern);
        let matches = glob::glob_with(&full.to_string_lossy(), options).map_err(|e| {
            BatchError::Pattern {
                pattern: pattern.to_string(),
                message: e.msg.to_string(),
            }
        })?;

        for entry in matches {
            match entry {
                Ok(path) if path.is_file() => {
                    if seen.insert(path.clone()) {
                        files.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable path"),
            }
        }
    }

    Ok(files)
}
