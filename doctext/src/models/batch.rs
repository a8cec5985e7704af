use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{FileType, Metadata};

/// What happened to one file of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Success {
        output_path: PathBuf,
        metadata: Metadata,
        preview: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub file_path: PathBuf,
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

impl BatchEntry {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, EntryOutcome::Success { .. })
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match &self.outcome {
            EntryOutcome::Success { metadata, .. } => Some(metadata),
            EntryOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            EntryOutcome::Success { .. } => None,
            EntryOutcome::Failed { error } => Some(error),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_characters: usize,
    pub total_words: usize,
    pub by_format: BTreeMap<FileType, usize>,
}

impl BatchSummary {
    fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = Self {
            total_processed: entries.len(),
            ..Self::default()
        };

        for entry in entries {
            match entry.metadata() {
                Some(metadata) => {
                    summary.successful += 1;
                    summary.total_characters += metadata.characters;
                    summary.total_words += metadata.words;
                    *summary.by_format.entry(metadata.file_type()).or_insert(0) += 1;
                }
                None => summary.failed += 1,
            }
        }

        summary
    }
}

/// Result of one batch run.
///
/// Entries keep input order. The summary is derived once when the report is
/// built and the report exposes no way to change either afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    generated_at: DateTime<Utc>,
    summary: BatchSummary,
    entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn from_entries(entries: Vec<BatchEntry>) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: BatchSummary::from_entries(&entries),
            entries,
        }
    }

    pub fn empty() -> Self {
        Self::from_entries(Vec::new())
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn successes(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|e| e.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|e| !e.is_success())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
