//! Text extraction from various file formats

use crate::error::{Result, ResumeParserError};
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::LazyLock;

static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid html tag regex"));

/// Decode a document's bytes to plain text. `source` names the document in errors.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeParserError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", source, e))
        })
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ResumeParserError::DocxExtraction(format!("'{}' is not a valid DOCX container: {}", source, e))
        })?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                ResumeParserError::DocxExtraction(format!("'{}' has no document body: {}", source, e))
            })?
            .read_to_string(&mut xml)?;

        document_xml_to_text(&xml).map_err(|e| {
            ResumeParserError::DocxExtraction(format!("Failed to read '{}': {}", source, e))
        })
    }
}

/// Flatten WordprocessingML to text. Paragraphs and table rows end lines;
/// the cells of a row share one line, separated by spaces.
fn document_xml_to_text(xml: &str) -> std::result::Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;
    let mut cell_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:tc" => cell_depth += 1,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let unescaped = t.unescape().map_err(|e| e.to_string())?;
                text.push_str(&unescaped);
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" if cell_depth > 0 => push_separator(&mut text),
                b"w:p" => text.push('\n'),
                b"w:tc" => {
                    cell_depth = cell_depth.saturating_sub(1);
                    push_separator(&mut text);
                }
                b"w:tr" => {
                    text.truncate(text.trim_end_matches(' ').len());
                    text.push('\n');
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML error at position {}: {}", reader.buffer_position(), e)),
            _ => {}
        }
    }

    Ok(text)
}

fn push_separator(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            ResumeParserError::TextDecoding(format!("'{}' is not valid UTF-8: {}", source, e))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes, source)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let clean_text = HTML_TAG_REGEX.replace_all(&text, "");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Minimal DOCX container around a WordprocessingML body
    pub(crate) fn docx_bytes(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs_and_tables() {
        let bytes = docx_bytes(concat!(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>",
            "<w:p><w:r><w:t xml:space=\"preserve\">R&amp;D </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>",
            "<w:tbl><w:tr>",
            "<w:tc><w:p><w:r><w:t>Python</w:t></w:r></w:p></w:tc>",
            "<w:tc><w:p><w:r><w:t>Rust</w:t></w:r></w:p></w:tc>",
            "</w:tr></w:tbl>",
        ));

        let text = DocxExtractor.extract(&bytes, "cv.docx").unwrap();
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["Jane Doe", "R&D Engineer", "Python Rust"]);
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        let err = DocxExtractor.extract(b"plain text", "cv.docx").unwrap_err();
        assert!(matches!(err, ResumeParserError::DocxExtraction(_)));
    }

    #[test]
    fn test_pdf_rejects_garbage() {
        let err = PdfExtractor.extract(b"not a pdf", "cv.pdf").unwrap_err();
        assert!(matches!(err, ResumeParserError::PdfExtraction(_)));
    }

    #[test]
    fn test_plain_text_requires_utf8() {
        assert_eq!(PlainTextExtractor.extract(b"hello", "a.txt").unwrap(), "hello");
        assert!(matches!(
            PlainTextExtractor.extract(&[0xff, 0xfe, 0x00], "a.txt"),
            Err(ResumeParserError::TextDecoding(_))
        ));
    }

    #[test]
    fn test_markdown_is_stripped() {
        let md = b"# Jane Doe\n\n**Skills**: Rust & Go\n\n- Initech, 2020\n";
        let text = MarkdownExtractor.extract(md, "cv.md").unwrap();
        assert_eq!(text, "Jane Doe\nSkills: Rust & Go\nInitech, 2020");
    }
}
