use crate::error::ExtractionError;
use crate::models::{Extraction, ExtractionResult, FileType, FormatDetails};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// Handles both `.xlsx` and legacy `.xls` workbooks; calamine sniffs the container.
pub struct XlsxExtractor;

impl XlsxExtractor {
    pub fn extract(bytes: &[u8]) -> ExtractionResult {
        let cursor = Cursor::new(bytes);
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| ExtractionError::failure(FileType::Spreadsheet, e))?;

        let mut text = String::new();
        let mut sheet_count = 0;

        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| ExtractionError::failure(FileType::Spreadsheet, e))?;
            sheet_count += 1;
            text.push_str(&format!("\n--- Sheet: {name} ---\n"));

            for row in range.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .filter(|cell| !matches!(cell, Data::Empty))
                    .map(Self::format_cell_value)
                    .collect();

                let line = cells.join("\t");
                let line = line.trim();
                if !line.is_empty() {
                    text.push_str(line);
                    text.push('\n');
                }
            }
        }

        let text = text.trim().to_string();
        Ok(Extraction::new(
            text,
            FormatDetails::Spreadsheet {
                sheets: sheet_count,
            },
        ))
    }

    fn format_cell_value(cell: &Data) -> String {
        match cell {
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                // Integral floats render without a fractional part
                let s = format!("{f}");
                if s.contains('.') {
                    s.trim_end_matches('0').trim_end_matches('.').to_string()
                } else {
                    s
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::DateTime(dt) => dt
                .as_datetime()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| dt.to_string()),
            Data::DateTimeIso(dt) => dt.to_string(),
            Data::DurationIso(d) => d.to_string(),
            Data::Error(e) => e.to_string(),
            _ => String::new(),
        }
    }
}
