use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::ExtractionError;
use crate::models::{ExtractionResult, FileType};
use crate::processing::extractors::{DocxExtractor, PdfExtractor, PptxExtractor, XlsxExtractor};

/// A format handler: turns one document family into normalized text and metadata.
pub trait FormatHandler {
    fn file_type(&self) -> FileType;

    fn extract_bytes(&self, bytes: &[u8]) -> ExtractionResult;

    /// Reads the whole file, releasing the handle before parsing starts.
    fn extract(&self, path: &Path) -> ExtractionResult {
        let bytes = fs::read(path).map_err(|e| ExtractionError::failure(self.file_type(), e))?;
        self.extract_bytes(&bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Pdf,
    Word,
    Presentation,
    Spreadsheet,
}

impl FormatHandler for Handler {
    fn file_type(&self) -> FileType {
        match self {
            Self::Pdf => FileType::Pdf,
            Self::Word => FileType::WordDocument,
            Self::Presentation => FileType::Presentation,
            Self::Spreadsheet => FileType::Spreadsheet,
        }
    }

    fn extract_bytes(&self, bytes: &[u8]) -> ExtractionResult {
        match self {
            Self::Pdf => PdfExtractor::extract(bytes),
            Self::Word => DocxExtractor::extract(bytes),
            Self::Presentation => PptxExtractor::extract(bytes),
            Self::Spreadsheet => XlsxExtractor::extract(bytes),
        }
    }
}

/// Extension → handler table, in the order formats are advertised.
const REGISTRY: [(&str, Handler); 5] = [
    (".pdf", Handler::Pdf),
    (".docx", Handler::Word),
    (".pptx", Handler::Presentation),
    (".xlsx", Handler::Spreadsheet),
    (".xls", Handler::Spreadsheet),
];

/// Lowercased extension of `path` including the leading dot, or `""` when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Stateless entry point of the extraction contract.
///
/// Every call returns a value: missing files, unknown extensions, parser
/// errors and parser panics all come back as [`ExtractionError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, path: impl AsRef<Path>) -> ExtractionResult {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractionError::FileNotFound);
        }

        let extension = extension_of(path);
        let handler = Self::handler_for(&extension)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(extension.clone()))?;

        tracing::debug!(path = %path.display(), handler = ?handler, "Extracting text");

        let result = panic::catch_unwind(AssertUnwindSafe(|| handler.extract(path)))
            .unwrap_or_else(|payload| {
                Err(ExtractionError::failure(
                    handler.file_type(),
                    panic_message(payload.as_ref()),
                ))
            });

        if let Err(e) = &result {
            tracing::warn!(path = %path.display(), error = %e, "Extraction failed");
        }

        result
    }

    pub fn is_supported(&self, path: impl AsRef<Path>) -> bool {
        Self::handler_for(&extension_of(path.as_ref())).is_some()
    }

    pub fn supported_formats(&self) -> Vec<&'static str> {
        REGISTRY.iter().map(|(ext, _)| *ext).collect()
    }

    pub fn handler_for(extension: &str) -> Option<Handler> {
        REGISTRY
            .iter()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, handler)| *handler)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "parser panicked".to_string()
    }
}
