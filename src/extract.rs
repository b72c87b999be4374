//! Text extraction from uploaded CV files.
//!
//! PDF, DOCX and plain text are supported; the format is chosen by file
//! extension. Extraction quality is whatever the underlying library gives;
//! the pipeline only needs raw text to hand to the extraction model.

use crate::error::{Error, Result};
use docx_rust::document::BodyContent;
use docx_rust::DocxFile;
use std::io::Cursor;
use std::path::Path;

/// Extracts the raw text of one uploaded CV.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(&bytes).map_err(|err| {
            Error::TextExtraction(format!("{}: {err}", path.display()))
        }),
        "docx" => docx_text(&bytes)
            .map_err(|err| Error::TextExtraction(format!("{}: {err}", path.display()))),
        _ => Ok(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// Concatenates body paragraph text of a DOCX file, one line per paragraph.
fn docx_text(bytes: &[u8]) -> std::result::Result<String, String> {
    let docx_file =
        DocxFile::from_reader(Cursor::new(bytes)).map_err(|err| format!("{err:?}"))?;
    let docx = docx_file.parse().map_err(|err| format!("{err:?}"))?;

    let lines: Vec<String> = docx
        .document
        .body
        .content
        .iter()
        .filter_map(|content| match content {
            BodyContent::Paragraph(paragraph) => Some(paragraph.text().to_string()),
            _ => None,
        })
        .collect();
    Ok(lines.join("\n"))
}
