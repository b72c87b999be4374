//! Batch conversion pipeline.
//!
//! CVs are processed strictly in order: extract text, extract the record,
//! build the resolution table, fill a fresh copy of the template, write the
//! result. One CV failing never aborts the rest of the batch.

use crate::audit;
use crate::error::{Error, Result};
use crate::extract;
use crate::fill;
use crate::llm::CvExtractor;
use crate::model::CvRecord;
use crate::resolve::ResolutionTable;
use docx_rust::DocxFile;
use log::{error, info};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// One successfully converted CV.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub candidate_name: String,
    pub output_path: PathBuf,
}

/// Result of a whole batch. Skipped entries carry the failure reason.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConversionOutcome>,
    pub skipped: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.skipped.len()
    }
}

/// Converts CVs against one company template.
pub struct Converter {
    /// Immutable template bytes. The parsed tree is mutated destructively
    /// during filling, so every CV re-parses from these bytes.
    template_bytes: Vec<u8>,
    extractor: CvExtractor,
    out_dir: PathBuf,
}

impl Converter {
    /// Loads the template and verifies it parses. A template that cannot be
    /// parsed fails the whole batch up front.
    pub fn new(template: &Path, out_dir: &Path, extractor: CvExtractor) -> Result<Self> {
        let template_bytes = std::fs::read(template)?;
        let template_file = parse_template(&template_bytes)?;
        template_file
            .parse()
            .map_err(|err| Error::DocxParse(format!("{err:?}")))?;
        Ok(Self {
            template_bytes,
            extractor,
            out_dir: out_dir.to_path_buf(),
        })
    }

    /// Processes every CV in order. Failures are reported per CV and do not
    /// stop the batch.
    pub fn convert_all(&self, cvs: &[PathBuf]) -> BatchReport {
        let actor = audit::current_actor();
        audit::log_event(&actor, "conversion_started", &format!("{} CVs", cvs.len()));

        let mut report = BatchReport::default();
        for cv in cvs {
            match self.convert_one(cv) {
                Ok(outcome) => {
                    info!("converted {} -> {}", cv.display(), outcome.output_path.display());
                    report.converted.push(outcome);
                }
                Err(err) => {
                    error!("failed to convert {}: {err}", cv.display());
                    audit::log_event(
                        &actor,
                        "conversion_error",
                        &format!("{}: {err}", cv.display()),
                    );
                    report.skipped.push((cv.clone(), err.to_string()));
                }
            }
        }

        audit::log_event(
            &actor,
            "conversion_finished",
            &format!("{} of {} converted", report.converted.len(), report.total()),
        );
        report
    }

    fn convert_one(&self, cv: &Path) -> Result<ConversionOutcome> {
        let text = extract::extract_text(cv)?;
        if text.trim().is_empty() {
            return Err(Error::TextExtraction(format!(
                "no text in {}",
                cv.display()
            )));
        }

        let record = self.extractor.extract(&text);
        let output_path = self.out_dir.join(output_filename(&record, cv));
        self.fill_to_path(&record, &output_path)?;

        Ok(ConversionOutcome {
            candidate_name: record.candidate_name,
            output_path,
        })
    }

    /// Parses a fresh template tree, fills it for `record` and serializes it
    /// to `output`.
    fn fill_to_path(&self, record: &CvRecord, output: &Path) -> Result<()> {
        let resolutions = ResolutionTable::build(record);
        let docx_file = parse_template(&self.template_bytes)?;
        let mut docx = docx_file
            .parse()
            .map_err(|err| Error::DocxParse(format!("{err:?}")))?;
        fill::fill_document(&mut docx, &resolutions);
        docx.write_file(output)
            .map_err(|err| Error::DocxWrite(format!("{err:?}")))?;
        Ok(())
    }
}

fn parse_template(bytes: &[u8]) -> Result<DocxFile> {
    DocxFile::from_reader(Cursor::new(bytes.to_vec()))
        .map_err(|err| Error::DocxParse(format!("{err:?}")))
}

/// Output filename derived from the candidate name, falling back to the
/// input file stem when extraction produced no name.
fn output_filename(record: &CvRecord, cv: &Path) -> String {
    let stem = if record.candidate_name.is_empty() {
        cv.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("output")
            .to_string()
    } else {
        record.candidate_name.clone()
    };
    format!("{}.docx", safe_filename(&format!("{stem}_Formatted")))
}

/// Replaces filesystem-unsafe characters with underscores.
pub fn safe_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "output".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Packages every converted document into one ZIP archive.
pub fn package_zip(outcomes: &[ConversionOutcome], zip_path: &Path) -> Result<()> {
    let file = std::fs::File::create(zip_path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for outcome in outcomes {
        let name = outcome
            .output_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("output.docx");
        writer.start_file(name, options)?;
        writer.write_all(&std::fs::read(&outcome.output_path)?)?;
    }

    writer.finish()?;
    Ok(())
}
