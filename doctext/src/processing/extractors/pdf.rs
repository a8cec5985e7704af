use crate::error::ExtractionError;
use crate::models::{Extraction, ExtractionResult, FileType, FormatDetails};

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extracts every page in order, one newline between pages, trimmed at both ends.
    pub fn extract(bytes: &[u8]) -> ExtractionResult {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractionError::failure(FileType::Pdf, e))?;

        let page_count = pages.len();
        let text = pages.join("\n").trim().to_string();

        Ok(Extraction::new(text, FormatDetails::Pdf { pages: page_count }))
    }
}
