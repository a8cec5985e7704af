use crate::error::ExtractionError;
use crate::models::{Extraction, ExtractionResult, FileType, FormatDetails};

pub struct DocxExtractor;

impl DocxExtractor {
    /// Body paragraphs first, one per line, then every body table row with
    /// its cells joined by tabs.
    pub fn extract(bytes: &[u8]) -> ExtractionResult {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ExtractionError::failure(FileType::WordDocument, e))?;

        let mut paragraphs: Vec<String> = Vec::new();
        let mut table_rows: Vec<String> = Vec::new();
        let mut table_count = 0;

        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    paragraphs.push(Self::extract_paragraph(paragraph));
                }
                docx_rs::DocumentChild::Table(table) => {
                    table_count += 1;
                    table_rows.extend(Self::extract_table(table));
                }
                _ => {}
            }
        }

        let paragraph_count = paragraphs.len();

        let mut text = String::new();
        for line in paragraphs.iter().chain(table_rows.iter()) {
            text.push_str(line);
            text.push('\n');
        }
        let text = text.trim().to_string();

        Ok(Extraction::new(
            text,
            FormatDetails::Word {
                paragraphs: paragraph_count,
                tables: table_count,
            },
        ))
    }

    fn extract_paragraph(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        for para_child in &paragraph.children {
            Self::push_paragraph_child(para_child, &mut content);
        }
        content
    }

    fn push_paragraph_child(child: &docx_rs::ParagraphChild, content: &mut String) {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        docx_rs::RunChild::Text(text) => content.push_str(&text.text),
                        docx_rs::RunChild::Tab(_) => content.push('\t'),
                        docx_rs::RunChild::Break(_) => content.push('\n'),
                        _ => {}
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for link_child in &link.children {
                    Self::push_paragraph_child(link_child, content);
                }
            }
            _ => {}
        }
    }

    fn extract_table(table: &docx_rs::Table) -> Vec<String> {
        let mut rows = Vec::new();

        for table_child in &table.rows {
            let docx_rs::TableChild::TableRow(row) = table_child;
            let mut row_cells: Vec<String> = Vec::new();
            for row_child in &row.cells {
                let docx_rs::TableRowChild::TableCell(cell) = row_child;
                // A cell's text is its paragraphs, one per line.
                let cell_paragraphs: Vec<String> = cell
                    .children
                    .iter()
                    .filter_map(|content| match content {
                        docx_rs::TableCellContent::Paragraph(para) => {
                            Some(Self::extract_paragraph(para))
                        }
                        _ => None,
                    })
                    .collect();
                row_cells.push(cell_paragraphs.join("\n"));
            }
            rows.push(row_cells.join("\t"));
        }

        rows
    }
}
