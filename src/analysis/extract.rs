//! Plain text extraction from uploaded documents.
//!
//! CPU bound. Callers on the async runtime should go through
//! `tokio::task::spawn_blocking`.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::config::MAX_DOCX_XML_BYTES;
use crate::domain::FileType;
use crate::errors::{AppError, AppResult};

/// Main body part of a WordprocessingML package.
const DOCX_BODY_PART: &str = "word/document.xml";

/// Extract and normalise the text of a document.
pub fn extract_text(file_type: FileType, bytes: &[u8]) -> AppResult<String> {
    let raw = match file_type {
        FileType::Pdf => extract_pdf(bytes)?,
        FileType::Docx => extract_docx(bytes)?,
    };
    Ok(normalize_text(&raw))
}

fn extract_pdf(bytes: &[u8]) -> AppResult<String> {
    // pdf-extract panics on some malformed inputs
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| AppError::bad_request("Could not read PDF file"))?;

    result.map_err(|e| {
        tracing::debug!("PDF extraction failed: {}", e);
        AppError::bad_request("Could not read PDF file")
    })
}

fn extract_docx(bytes: &[u8]) -> AppResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::bad_request(format!("Invalid DOCX file: {}", e)))?;

    let body = archive
        .by_name(DOCX_BODY_PART)
        .map_err(|_| AppError::bad_request("Invalid DOCX file: missing document body"))?;

    let declared = body.size();
    let xml = read_bounded(body, declared, MAX_DOCX_XML_BYTES)?;
    docx_body_text(&xml)
}

/// Read a zip entry as text, refusing anything that inflates past `limit`.
///
/// `declared` comes from the archive and can lie, so the read itself is
/// capped as well.
fn read_bounded(entry: impl Read, declared: u64, limit: u64) -> AppResult<String> {
    let too_large = || AppError::bad_request("Invalid DOCX file: document body is too large");

    if declared > limit {
        return Err(too_large());
    }

    let mut xml = String::new();
    entry
        .take(limit + 1)
        .read_to_string(&mut xml)
        .map_err(|e| AppError::bad_request(format!("Invalid DOCX file: {}", e)))?;

    if xml.len() as u64 > limit {
        return Err(too_large());
    }
    Ok(xml)
}

/// Walk `word/document.xml`. Paragraphs become lines, `w:t` carries text,
/// `w:tab` and `w:br` become a tab and a line break.
fn docx_body_text(xml: &str) -> AppResult<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;
    // w:tab inside w:tabs is a tab stop definition, not content
    let mut in_tab_stops = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"tabs" => in_tab_stops = true,
                b"tab" if !in_tab_stops => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" if !in_tab_stops => out.push('\t'),
                b"br" | b"cr" | b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"tabs" => in_tab_stops = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| AppError::bad_request(format!("Invalid DOCX file: {}", e)))?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::bad_request(format!(
                    "Invalid DOCX file: malformed XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(out)
}

/// Unify line endings, trim each line, collapse runs of spaces and collapse
/// runs of blank lines into one.
pub fn normalize_text(raw: &str) -> String {
    let unified = raw
        .replace("\r\n", "\n")
        .replace(['\r', '\u{c}'], "\n")
        .replace('\u{a0}', " ");

    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = true;

    for line in unified.lines() {
        let collapsed = collapse_spaces(line.trim());
        if collapsed.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
            continue;
        }
        lines.push(collapsed);
        previous_blank = false;
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last_space = false;
    for c in line.chars() {
        if c == ' ' {
            if !last_space {
                out.push(c);
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out
}
