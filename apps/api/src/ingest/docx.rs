//! DOCX text extraction: unzip the container and walk `word/document.xml`.
//!
//! Output is one line per `w:p` paragraph. Within a run, `w:t` contributes its text,
//! `w:tab` a tab, and `w:br`/`w:cr` a newline. Everything else (properties, drawings,
//! field codes) is skipped.

use std::io::{Cursor, Read};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    paragraphs_from_document_xml(&xml)
}

fn paragraphs_from_document_xml(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::Docx(e.to_string()))?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if in_run => current.push('\t'),
                b"br" | b"cr" if in_run => current.push('\n'),
                // Self-closing paragraph: a blank line in the document.
                b"p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t.decode().map_err(|e| ExtractionError::Docx(e.to_string()))?;
                current.push_str(&text);
            }
            Event::GeneralRef(r) if in_text => {
                if let Some(ch) = r
                    .resolve_char_ref()
                    .map_err(|e| ExtractionError::Docx(e.to_string()))?
                {
                    current.push(ch);
                } else {
                    let name = r.decode().map_err(|e| ExtractionError::Docx(e.to_string()))?;
                    if let Some(resolved) = resolve_predefined_entity(&name) {
                        current.push_str(resolved);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}
