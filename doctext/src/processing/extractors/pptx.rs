//! PPTX extractor using zip + quick-xml

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::ExtractionError;
use crate::models::{Extraction, ExtractionResult, FileType, FormatDetails};

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

pub struct PptxExtractor;

/// Text collected from one slide part, in shape order.
#[derive(Default)]
struct SlideWalker {
    output: String,
    group_depth: usize,
    in_shape: bool,
    in_table: bool,
    in_cell: bool,
    in_text: bool,
    shape_paragraphs: Vec<String>,
    cell_paragraphs: Vec<String>,
    row_cells: Vec<String>,
    paragraph: String,
}

impl PptxExtractor {
    pub fn extract(bytes: &[u8]) -> ExtractionResult {
        Self::extract_slides(bytes).map_err(|e| ExtractionError::failure(FileType::Presentation, e))
    }

    fn extract_slides(bytes: &[u8]) -> Result<Extraction, String> {
        let cursor = Cursor::new(bytes);
        let mut archive = ZipArchive::new(cursor).map_err(|e| e.to_string())?;

        let slide_order = Self::get_slide_order(&mut archive)?;
        let slide_mapping = if slide_order.is_empty() {
            HashMap::new()
        } else {
            Self::get_slide_mapping(&mut archive)?
        };

        let mut text = String::new();

        for (slide_num, r_id) in slide_order.iter().enumerate() {
            let slide_number = slide_num + 1;

            let slide_filename = match slide_mapping.get(r_id) {
                Some(filename) => filename.clone(),
                None => format!("ppt/slides/slide{slide_number}.xml"),
            };

            text.push_str(&format!("\n--- Slide {slide_number} ---\n"));
            text.push_str(&Self::extract_slide_content(&mut archive, &slide_filename)?);
        }

        let text = text.trim().to_string();
        Ok(Extraction::new(
            text,
            FormatDetails::Presentation {
                slides: slide_order.len(),
            },
        ))
    }

    fn get_slide_order(archive: &mut Archive<'_>) -> Result<Vec<String>, String> {
        let xml = Self::read_file_from_archive(archive, "ppt/presentation.xml")?;

        let mut reader = Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut slide_ids = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                    if e.name().as_ref() == b"p:sldId" {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"r:id" {
                                if let Ok(val) = std::str::from_utf8(&attr.value) {
                                    slide_ids.push(val.to_string());
                                }
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(format!("Error parsing presentation.xml: {e}")),
                _ => {}
            }
            buf.clear();
        }

        Ok(slide_ids)
    }

    fn get_slide_mapping(archive: &mut Archive<'_>) -> Result<HashMap<String, String>, String> {
        let xml = Self::read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;

        let mut reader = Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut mapping = HashMap::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                    if e.name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;

                        for attr in e.attributes().flatten() {
                            let value = std::str::from_utf8(&attr.value).ok().map(String::from);
                            match attr.key.as_ref() {
                                b"Id" => id = value,
                                b"Target" => target = value,
                                b"Type" => rel_type = value,
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                            if rel_type.ends_with("/slide") {
                                mapping.insert(id, Self::resolve_target(&target));
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(format!("Error parsing presentation.xml.rels: {e}")),
                _ => {}
            }
            buf.clear();
        }

        Ok(mapping)
    }

    /// Relationship targets are relative to `ppt/` unless they are package-absolute.
    fn resolve_target(target: &str) -> String {
        match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("ppt/{target}"),
        }
    }

    fn extract_slide_content(archive: &mut Archive<'_>, slide_path: &str) -> Result<String, String> {
        let xml = Self::read_file_from_archive(archive, slide_path)?;
        Self::extract_shapes_from_xml(&xml)
    }

    /// Walks the top-level shape tree of a slide.
    ///
    /// Text shapes contribute their paragraphs joined by newlines (skipped when
    /// blank). Table frames contribute one line per row with the non-blank
    /// cells joined by tabs. Shapes nested in groups are not visited.
    fn extract_shapes_from_xml(xml: &str) -> Result<String, String> {
        let mut reader = Reader::from_str(xml);

        let mut walker = SlideWalker::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => walker.start(&e),
                Ok(Event::Empty(e)) => {
                    walker.start(&e);
                    walker.end(e.name().as_ref());
                }
                Ok(Event::Text(e)) => {
                    if walker.in_text {
                        let raw = std::str::from_utf8(e.as_ref()).map_err(|e| e.to_string())?;
                        walker.paragraph.push_str(&Self::unescape_xml(raw));
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    if walker.in_text {
                        let name = std::str::from_utf8(e.as_ref()).map_err(|e| e.to_string())?;
                        if let Some(c) = Self::resolve_entity(name) {
                            walker.paragraph.push(c);
                        }
                    }
                }
                Ok(Event::End(e)) => walker.end(e.name().as_ref()),
                Ok(Event::Eof) => break,
                Err(e) => return Err(format!("Error parsing slide XML: {e}")),
                _ => {}
            }
            buf.clear();
        }

        Ok(walker.output)
    }

    fn resolve_entity(name: &str) -> Option<char> {
        match name {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "apos" => Some('\''),
            "quot" => Some('"'),
            _ => {
                let code = name.strip_prefix('#')?;
                let value = match code.strip_prefix('x') {
                    Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                    None => code.parse().ok()?,
                };
                char::from_u32(value)
            }
        }
    }

    fn unescape_xml(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&apos;", "'")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
    }

    fn read_file_from_archive(archive: &mut Archive<'_>, path: &str) -> Result<String, String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| format!("Failed to read {path} from PPTX: {e}"))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| format!("Failed to read {path} content: {e}"))?;

        Ok(content)
    }
}

impl SlideWalker {
    fn start(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"p:grpSp" => self.group_depth += 1,
            b"p:sp" if self.group_depth == 0 => {
                self.in_shape = true;
                self.shape_paragraphs.clear();
            }
            b"a:tbl" if self.group_depth == 0 => self.in_table = true,
            b"a:tr" if self.in_table => self.row_cells.clear(),
            b"a:tc" if self.in_table => {
                self.in_cell = true;
                self.cell_paragraphs.clear();
            }
            b"a:p" => self.paragraph.clear(),
            b"a:t" => self.in_text = self.collecting(),
            b"a:br" if self.collecting() => self.paragraph.push('\n'),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"p:grpSp" => self.group_depth = self.group_depth.saturating_sub(1),
            b"a:t" => self.in_text = false,
            b"a:p" => {
                let paragraph = std::mem::take(&mut self.paragraph);
                if self.in_cell {
                    self.cell_paragraphs.push(paragraph);
                } else if self.in_shape {
                    self.shape_paragraphs.push(paragraph);
                }
            }
            b"a:tc" if self.in_cell => {
                self.in_cell = false;
                self.row_cells.push(self.cell_paragraphs.join("\n"));
            }
            b"a:tr" if self.in_table => {
                let cells: Vec<&str> = self
                    .row_cells
                    .iter()
                    .map(String::as_str)
                    .filter(|cell| !cell.trim().is_empty())
                    .collect();
                self.output.push_str(&cells.join("\t"));
                self.output.push('\n');
            }
            b"a:tbl" => self.in_table = false,
            b"p:sp" if self.in_shape && self.group_depth == 0 => {
                self.in_shape = false;
                let shape_text = self.shape_paragraphs.join("\n");
                if !shape_text.trim().is_empty() {
                    self.output.push_str(&shape_text);
                    self.output.push('\n');
                }
            }
            _ => {}
        }
    }

    fn collecting(&self) -> bool {
        self.in_cell || (self.in_shape && !self.in_table)
    }
}
