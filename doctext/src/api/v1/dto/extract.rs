use serde::Serialize;

use crate::models::{FileType, FormatDetails, Metadata};

/// Response body of `POST /v1/extract`.
///
/// Exactly one group of the format-specific fields is present, matching
/// `fileType`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub text: String,
    pub file_type: FileType,
    pub characters: usize,
    pub words: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets: Option<usize>,
    /// Stored name of the uploaded document, usable with `GET /v1/files/{name}`.
    pub original_file: String,
    /// Stored name of the extracted-text artifact.
    pub text_file: String,
}

impl ExtractResponse {
    pub fn new(text: String, metadata: Metadata, original_file: String, text_file: String) -> Self {
        let mut response = Self {
            text,
            file_type: metadata.file_type(),
            characters: metadata.characters,
            words: metadata.words,
            pages: None,
            paragraphs: None,
            tables: None,
            slides: None,
            sheets: None,
            original_file,
            text_file,
        };

        match metadata.details {
            FormatDetails::Pdf { pages } => response.pages = Some(pages),
            FormatDetails::Word { paragraphs, tables } => {
                response.paragraphs = Some(paragraphs);
                response.tables = Some(tables);
            }
            FormatDetails::Presentation { slides } => response.slides = Some(slides),
            FormatDetails::Spreadsheet { sheets } => response.sheets = Some(sheets),
        }

        response
    }
}

/// Response body of `GET /v1/formats`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FormatsResponse {
    /// Upper-case format names, e.g. `"PDF"`, `"XLSX"`.
    pub formats: Vec<String>,
    /// Extensions including the leading dot, in registry order.
    pub extensions: Vec<String>,
}

impl FormatsResponse {
    pub fn from_extensions(extensions: &[&str]) -> Self {
        Self {
            formats: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_uppercase())
                .collect(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}
