//! # cv2docx
//!
//! Converts candidate CVs into a normalized company-branded DOCX document.
//! Structured fields are extracted from the CV text through an LLM call and
//! rendered into a placeholder template; unused experience slots are
//! physically pruned from the document rather than left blank.
//!
//! ## Example
//!
//! ```no_run
//! use cv2docx::llm::CvExtractor;
//! use cv2docx::pipeline::Converter;
//! use std::path::{Path, PathBuf};
//!
//! let extractor = CvExtractor::new("api-key".to_string());
//! let converter =
//!     Converter::new(Path::new("template.docx"), Path::new("out"), extractor).unwrap();
//! let report = converter.convert_all(&[PathBuf::from("candidate.pdf")]);
//! println!("converted {} of {}", report.converted.len(), report.total());
//! ```

pub mod audit;
pub mod error;
pub mod extract;
pub mod fill;
pub mod llm;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod resolve;

pub use error::{Error, Result};
pub use model::{CvRecord, Experience};
pub use pipeline::{BatchReport, Converter};
pub use resolve::{Resolution, ResolutionTable};
