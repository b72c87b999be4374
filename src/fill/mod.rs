//! The template-filling engine.
//!
//! Filling happens in two phases over a freshly parsed template tree:
//! substitution rewrites run text and collects deletion candidates, then the
//! pruner removes the marked structural units. Nothing is deleted while the
//! tree is being walked.

mod paragraph;
mod prune;
mod style;
mod table;

use crate::resolve::ResolutionTable;
use docx_rust::document::BodyContent;
use docx_rust::Docx;

use self::paragraph::{fill_paragraph, ParagraphOutcome};

/// Location of a structural unit inside the document tree. Indices refer to
/// the tree as it stands after substitution, before any pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitRef {
    /// Paragraph at body level.
    BodyParagraph { index: usize },
    /// Paragraph inside a table cell; `index` is the position within the
    /// cell's content.
    CellParagraph {
        table: usize,
        row: usize,
        cell: usize,
        index: usize,
    },
    /// Row of a body-level table.
    TableRow { table: usize, row: usize },
}

/// Structural units marked for removal during substitution.
#[derive(Debug, Default)]
pub(crate) struct DeletionCandidates {
    pub paragraphs: Vec<UnitRef>,
    pub rows: Vec<UnitRef>,
}

/// Fills `docx` in place: substitutes every resolved placeholder, then
/// prunes the structural units that substitution marked for deletion.
///
/// The tree is mutated destructively; callers must parse a fresh tree from
/// the template bytes for every document they fill.
pub fn fill_document(docx: &mut Docx<'_>, resolutions: &ResolutionTable) {
    let candidates = substitute(docx, resolutions);
    prune::prune(docx, candidates);
}

/// Substitution pass. Rewrites paragraphs and cells, returning the deletion
/// candidates for the pruning pass.
fn substitute(docx: &mut Docx<'_>, resolutions: &ResolutionTable) -> DeletionCandidates {
    let mut candidates = DeletionCandidates::default();

    let content = std::mem::take(&mut docx.document.body.content);
    let mut rebuilt = Vec::with_capacity(content.len());

    for item in content {
        match item {
            BodyContent::Paragraph(paragraph) => {
                match fill_paragraph(&paragraph, resolutions) {
                    ParagraphOutcome::Unchanged => {
                        rebuilt.push(BodyContent::Paragraph(paragraph));
                    }
                    ParagraphOutcome::Replaced(paragraphs) => {
                        for replacement in paragraphs {
                            rebuilt.push(BodyContent::Paragraph(replacement));
                        }
                    }
                    ParagraphOutcome::DeleteUnit | ParagraphOutcome::DropLine => {
                        candidates.paragraphs.push(UnitRef::BodyParagraph {
                            index: rebuilt.len(),
                        });
                        rebuilt.push(BodyContent::Paragraph(paragraph));
                    }
                }
            }
            BodyContent::Table(mut tbl) => {
                table::fill_table(&mut tbl, resolutions, rebuilt.len(), &mut candidates);
                rebuilt.push(BodyContent::Table(tbl));
            }
            other => rebuilt.push(other),
        }
    }

    docx.document.body.content = rebuilt;
    candidates
}
