//! Table-level substitution.
//!
//! A table row stands for one experience slot as soon as any placeholder of
//! that slot appears in it. Rows whose placeholders resolve to deletion are
//! recorded as row candidates and their cells are left untouched; every
//! other cell is processed paragraph by paragraph, exactly like free
//! paragraphs at body level.

use crate::fill::paragraph::{fill_paragraph, ParagraphOutcome};
use crate::fill::{DeletionCandidates, UnitRef};
use crate::resolve::{token_regex, Resolution, ResolutionTable};
use docx_rust::document::{Table, TableCell, TableCellContent, TableRow, TableRowContent};

/// Substitutes placeholders throughout `table`, recording deletion
/// candidates under the table's body position `table_index`.
pub(crate) fn fill_table(
    table: &mut Table<'_>,
    resolutions: &ResolutionTable,
    table_index: usize,
    candidates: &mut DeletionCandidates,
) {
    for (row_index, row) in table.rows.iter_mut().enumerate() {
        if row_resolves_to_deletion(row, resolutions) {
            candidates.rows.push(UnitRef::TableRow {
                table: table_index,
                row: row_index,
            });
            continue;
        }

        for (cell_index, content) in row.cells.iter_mut().enumerate() {
            if let TableRowContent::TableCell(cell) = content {
                fill_cell(
                    cell,
                    resolutions,
                    table_index,
                    row_index,
                    cell_index,
                    candidates,
                );
            }
        }
    }
}

/// True when any placeholder in the row's concatenated text resolves to
/// deletion. The whole row goes; a row cannot be partially deleted.
fn row_resolves_to_deletion(row: &TableRow<'_>, resolutions: &ResolutionTable) -> bool {
    let text = row_text(row);
    token_regex()
        .find_iter(&text)
        .any(|token| matches!(resolutions.get(token.as_str()), Some(Resolution::DeleteUnit)))
}

/// All text of a row, cells and paragraphs joined with spaces.
fn row_text(row: &TableRow<'_>) -> String {
    let mut text = String::new();
    for content in &row.cells {
        if let TableRowContent::TableCell(cell) = content {
            for item in &cell.content {
                if let TableCellContent::Paragraph(paragraph) = item {
                    text.push_str(&paragraph.text());
                    text.push(' ');
                }
            }
        }
    }
    text
}

fn fill_cell(
    cell: &mut TableCell<'_>,
    resolutions: &ResolutionTable,
    table_index: usize,
    row_index: usize,
    cell_index: usize,
    candidates: &mut DeletionCandidates,
) {
    let content = std::mem::take(&mut cell.content);
    let mut rebuilt = Vec::with_capacity(content.len());

    for item in content {
        match item {
            TableCellContent::Paragraph(paragraph) => {
                match fill_paragraph(&paragraph, resolutions) {
                    ParagraphOutcome::Unchanged => {
                        rebuilt.push(TableCellContent::Paragraph(paragraph));
                    }
                    ParagraphOutcome::Replaced(paragraphs) => {
                        for replacement in paragraphs {
                            rebuilt.push(TableCellContent::Paragraph(replacement));
                        }
                    }
                    ParagraphOutcome::DropLine => {
                        candidates.paragraphs.push(UnitRef::CellParagraph {
                            table: table_index,
                            row: row_index,
                            cell: cell_index,
                            index: rebuilt.len(),
                        });
                        rebuilt.push(TableCellContent::Paragraph(paragraph));
                    }
                    ParagraphOutcome::DeleteUnit => {
                        // Inside a table the enclosing row is the unit of
                        // deletion. The row scan normally catches this
                        // first; recording it again is harmless.
                        candidates.rows.push(UnitRef::TableRow {
                            table: table_index,
                            row: row_index,
                        });
                        rebuilt.push(TableCellContent::Paragraph(paragraph));
                    }
                }
            }
            other => rebuilt.push(other),
        }
    }

    cell.content = rebuilt;
}
