//! Document text extraction.
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml` as
//! WordprocessingML. We pull the text runs (`<w:t>`) out of each paragraph
//! (`<w:p>`), drop blank paragraphs, and join the rest with newlines. No
//! styling, tables, headers, or footers — checklist and contract bodies are
//! plain paragraph text.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Not a valid .docx archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to read document contents: {0}")]
    Io(#[from] std::io::Error),

    #[error("Uploaded text file is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Extracts plain text from the bytes of a `.docx` file.
/// Paragraphs joined with `\n`, blank paragraphs dropped.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut document_xml)?;
    parse_document_xml(&document_xml)
}

/// Resolves the contract upload to its text: `.docx` files go through the
/// extractor, anything else is read as raw UTF-8. Same filename-extension
/// dispatch the upload form promises.
pub fn contract_text_from_upload(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    if filename.to_ascii_lowercase().ends_with(".docx") {
        extract_docx_text(bytes)
    } else {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// Splits extracted checklist text into prompts: one per line, trimmed,
/// empties dropped, source order preserved. Duplicates are allowed.
pub fn split_prompts(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn parse_document_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    let paragraph = current.trim();
                    if !paragraph.is_empty() {
                        paragraphs.push(paragraph.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            // Line breaks inside a paragraph keep checklist items on separate lines
            Event::Empty(e) if e.name().as_ref() == b"w:br" => current.push('\n'),
            Event::Text(t) if in_text_run => current.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}
