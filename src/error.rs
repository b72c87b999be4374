//! Error types for cv2docx.

use thiserror::Error;

/// Result type for cv2docx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting CVs into the company template.
#[derive(Error, Debug)]
pub enum Error {
    /// Error occurred while parsing a DOCX file.
    #[error("Failed to parse DOCX file: {0}")]
    DocxParse(String),

    /// Error occurred while serializing the filled document.
    #[error("Failed to write DOCX file: {0}")]
    DocxWrite(String),

    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable text could be obtained from an uploaded CV.
    #[error("Text extraction failed: {0}")]
    TextExtraction(String),

    /// The structured-extraction collaborator failed.
    #[error("Extraction error: {0}")]
    Extraction(#[from] crate::llm::LlmError),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
