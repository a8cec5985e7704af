use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Document family a handler produces.
///
/// Serialized with the display names used on the wire and in reports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
)]
pub enum FileType {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "Word Document")]
    WordDocument,
    #[serde(rename = "PowerPoint Presentation")]
    Presentation,
    #[serde(rename = "Excel Spreadsheet")]
    Spreadsheet,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::WordDocument => "Word Document",
            Self::Presentation => "PowerPoint Presentation",
            Self::Spreadsheet => "Excel Spreadsheet",
        }
    }

    /// Prefix used in `"<Format> extraction error: ..."` failure reasons.
    pub fn error_label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::WordDocument => "Word document",
            Self::Presentation => "PowerPoint",
            Self::Spreadsheet => "Excel",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural counts that only make sense for one document family.
///
/// The variant doubles as the `file_type` tag, so a PDF can never carry a
/// slide count and a spreadsheet can never carry a page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "file_type")]
pub enum FormatDetails {
    #[serde(rename = "PDF")]
    Pdf { pages: usize },
    #[serde(rename = "Word Document")]
    Word { paragraphs: usize, tables: usize },
    #[serde(rename = "PowerPoint Presentation")]
    Presentation { slides: usize },
    #[serde(rename = "Excel Spreadsheet")]
    Spreadsheet { sheets: usize },
}

impl FormatDetails {
    pub fn file_type(&self) -> FileType {
        match self {
            Self::Pdf { .. } => FileType::Pdf,
            Self::Word { .. } => FileType::WordDocument,
            Self::Presentation { .. } => FileType::Presentation,
            Self::Spreadsheet { .. } => FileType::Spreadsheet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(flatten)]
    pub details: FormatDetails,
    pub characters: usize,
    pub words: usize,
}

impl Metadata {
    /// Counts characters (Unicode scalar values) and whitespace-delimited words of `text`.
    pub fn for_text(text: &str, details: FormatDetails) -> Self {
        Self {
            details,
            characters: text.chars().count(),
            words: count_words(text),
        }
    }

    pub fn file_type(&self) -> FileType {
        self.details.file_type()
    }
}

/// Successful output of a format handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub text: String,
    pub metadata: Metadata,
}

impl Extraction {
    pub fn new(text: String, details: FormatDetails) -> Self {
        let metadata = Metadata::for_text(&text, details);
        Self { text, metadata }
    }
}

/// Outcome of extracting one file: text plus metadata, or a failure reason.
pub type ExtractionResult = std::result::Result<Extraction, ExtractionError>;

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
