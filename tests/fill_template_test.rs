//! End-to-end template filling over a real DOCX round trip.
//!
//! A placeholder template is generated with the docx_rust builder API,
//! written to disk, filled through the full pipeline path (fresh parse →
//! substitute → prune → serialize) and re-parsed for assertions.

use cv2docx::fill::fill_document;
use cv2docx::model::{CvRecord, Experience};
use cv2docx::resolve::ResolutionTable;
use docx_rust::document::{
    BodyContent, Paragraph, Table, TableCell, TableCellContent, TableRow, TableRowContent,
};
use docx_rust::{Docx, DocxFile};
use std::path::Path;

fn paragraph(text: &str) -> Paragraph<'static> {
    Paragraph::default().push_text(text.to_string())
}

/// Template with a header section and three experience slots: per slot, one
/// header row (company / role / duration) and one responsibility row with
/// five bulleted lines.
fn build_template() -> Docx<'static> {
    let mut docx = Docx::default();
    docx.document.push(paragraph("{{CANDIDATE_NAME}}"));
    docx.document.push(paragraph("{{POSITION}}"));
    docx.document
        .push(paragraph("Summary: {{INTRO_PARAGRAPH}}"));
    docx.document.push(paragraph("{{TECHNICAL_SKILLS_LIST}}"));
    docx.document.push(paragraph("{{CERTIFICATIONS_LIST}}"));

    let mut table = Table::default();
    for slot in 1..=3 {
        table = table.push_row(
            TableRow::default()
                .push_cell(TableCell::paragraph(paragraph(&format!(
                    "{{{{EXP{slot}_COMPANY}}}}"
                ))))
                .push_cell(TableCell::paragraph(paragraph(&format!(
                    "{{{{EXP{slot}_ROLE}}}}"
                ))))
                .push_cell(TableCell::paragraph(paragraph(&format!(
                    "{{{{EXP{slot}_DURATION}}}}"
                )))),
        );

        let mut cell = TableCell::paragraph(paragraph(&format!("- {{{{EXP{slot}_RESP1}}}}")));
        for line in 2..=5 {
            cell.content.push(TableCellContent::Paragraph(paragraph(
                &format!("- {{{{EXP{slot}_RESP{line}}}}}"),
            )));
        }
        table = table.push_row(TableRow::default().push_cell(cell));
    }
    docx.document.body.content.push(BodyContent::Table(table));
    docx
}

fn sample_record() -> CvRecord {
    let mut record = CvRecord::empty();
    record.candidate_name = "Raju Gujar".to_string();
    record.position = "Technical Consultant".to_string();
    record.intro_paragraph = "Oracle specialist with 11 years of experience.".to_string();
    record.technical_skills = vec!["Oracle 19c".to_string(), "UNIX".to_string()];
    record.experiences = vec![
        Experience {
            company: "Seertree Global Services".to_string(),
            role: "Technical Consultant".to_string(),
            duration: "SEP 2015 - Present".to_string(),
            responsibilities: vec![
                "Project Name: GE Appliances, Location: Offshore, Duration: Nov 2023 - Present"
                    .to_string(),
                "Developed the custom packages".to_string(),
                "Modified the standard package".to_string(),
                "Developed custom reports".to_string(),
                "Environment/Technologies: Oracle 19c, TOAD, UNIX".to_string(),
            ],
        },
        Experience {
            company: "ITForce Technology".to_string(),
            role: "Senior Technical Engineer".to_string(),
            duration: "FEB 2023 - Present".to_string(),
            responsibilities: Vec::new(),
        },
    ];
    record
}

/// Runs the full fill over a template file on disk, mirroring the pipeline's
/// fresh-parse-per-CV rule, and returns the re-parsed output path.
fn fill_round_trip(dir: &Path, record: &CvRecord) -> std::path::PathBuf {
    let template_path = dir.join("template.docx");
    let output_path = dir.join("filled.docx");

    let mut template = build_template();
    template
        .write_file(&template_path)
        .expect("failed to write template");

    let resolutions = ResolutionTable::build(record);
    let docx_file = DocxFile::from_file(&template_path).expect("failed to open template");
    let mut docx = docx_file.parse().expect("failed to parse template");
    fill_document(&mut docx, &resolutions);
    docx.write_file(&output_path)
        .expect("failed to write filled document");

    output_path
}

fn body_text(docx: &Docx<'_>) -> String {
    let mut text = String::new();
    for item in &docx.document.body.content {
        match item {
            BodyContent::Paragraph(p) => {
                text.push_str(&p.text());
                text.push('\n');
            }
            BodyContent::Table(t) => {
                for row in &t.rows {
                    for cell in &row.cells {
                        if let TableRowContent::TableCell(cell) = cell {
                            for content in &cell.content {
                                if let TableCellContent::Paragraph(p) = content {
                                    text.push_str(&p.text());
                                    text.push('\n');
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    text
}

#[test]
fn filled_document_round_trips_through_serialization() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output_path = fill_round_trip(dir.path(), &sample_record());

    let docx_file = DocxFile::from_file(&output_path).expect("failed to open output");
    let docx = docx_file.parse().expect("failed to parse output");
    let text = body_text(&docx);

    // Scalars and lists are substituted.
    assert!(text.contains("Raju Gujar"), "missing name in: {text}");
    assert!(text.contains("Summary: Oracle specialist with 11 years of experience."));
    assert!(text.contains("\u{2022} Oracle 19c"));
    assert!(text.contains("N/A"), "empty certifications render as N/A");

    // No placeholder text survives anywhere.
    assert!(!text.contains("{{"), "residual placeholder in: {text}");

    // Slot 1 renders fully, slot 2 renders header only, slot 3 is gone.
    assert!(text.contains("Seertree Global Services"));
    assert!(text.contains("- Developed the custom packages"));
    assert!(text.contains("ITForce Technology"));
    assert!(!text.contains("EXP3"));
}

#[test]
fn unused_slot_rows_are_physically_removed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output_path = fill_round_trip(dir.path(), &sample_record());

    let docx_file = DocxFile::from_file(&output_path).expect("failed to open output");
    let docx = docx_file.parse().expect("failed to parse output");

    let Some(BodyContent::Table(table)) = docx
        .document
        .body
        .content
        .iter()
        .find(|item| matches!(item, BodyContent::Table(_)))
    else {
        panic!("experience table missing from output");
    };

    // Three slots of two rows each in the template; slot 3's rows deleted.
    assert_eq!(table.rows.len(), 4);
}

#[test]
fn slot_without_responsibilities_keeps_its_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output_path = fill_round_trip(dir.path(), &sample_record());

    let docx_file = DocxFile::from_file(&output_path).expect("failed to open output");
    let docx = docx_file.parse().expect("failed to parse output");
    let text = body_text(&docx);

    // Slot 2 has no responsibilities: header fields survive, and none of the
    // five bulleted template lines leave a stray dash behind.
    assert!(text.contains("Senior Technical Engineer"));
    assert!(text.contains("FEB 2023 - Present"));
    assert!(
        !text.lines().any(|line| line.trim() == "-"),
        "unused responsibility bullet left behind: {text}"
    );
}

#[test]
fn empty_record_produces_blank_document_without_panicking() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output_path = fill_round_trip(dir.path(), &CvRecord::empty());

    let docx_file = DocxFile::from_file(&output_path).expect("failed to open output");
    let docx = docx_file.parse().expect("failed to parse output");
    let text = body_text(&docx);

    assert!(!text.contains("{{"), "residual placeholder in: {text}");

    let Some(BodyContent::Table(table)) = docx
        .document
        .body
        .content
        .iter()
        .find(|item| matches!(item, BodyContent::Table(_)))
    else {
        panic!("experience table missing from output");
    };
    assert_eq!(table.rows.len(), 0);
}
