//! Structural pruning.
//!
//! Deletion candidates collected during substitution are removed in two
//! ordered passes: paragraphs first, then table rows. Rows are removed in
//! descending index order within each table so earlier removals cannot
//! invalidate the indices of rows still pending. A table cell always keeps
//! at least one paragraph; removing the last one would break the cell, so
//! that removal is replaced by emptying the paragraph instead.

use crate::fill::{DeletionCandidates, UnitRef};
use docx_rust::document::{BodyContent, Paragraph, TableCellContent, TableRowContent};
use docx_rust::Docx;

/// Removes every recorded deletion candidate from the document tree.
pub(crate) fn prune(docx: &mut Docx<'_>, candidates: DeletionCandidates) {
    let mut body_paragraphs: Vec<usize> = Vec::new();
    let mut cell_paragraphs: Vec<(usize, usize, usize, usize)> = Vec::new();
    for unit in candidates.paragraphs {
        match unit {
            UnitRef::BodyParagraph { index } => body_paragraphs.push(index),
            UnitRef::CellParagraph {
                table,
                row,
                cell,
                index,
            } => cell_paragraphs.push((table, row, cell, index)),
            UnitRef::TableRow { .. } => {}
        }
    }

    prune_cell_paragraphs(docx, cell_paragraphs);

    // Body paragraph removal shifts the body positions of the tables that
    // follow, so row candidates are remapped before the rows pass.
    body_paragraphs.sort_unstable();
    body_paragraphs.dedup();

    let mut rows: Vec<(usize, usize)> = candidates
        .rows
        .into_iter()
        .filter_map(|unit| match unit {
            UnitRef::TableRow { table, row } => {
                let shift = body_paragraphs
                    .iter()
                    .take_while(|&&removed| removed < table)
                    .count();
                Some((table - shift, row))
            }
            _ => None,
        })
        .collect();

    for &index in body_paragraphs.iter().rev() {
        if index < docx.document.body.content.len() {
            docx.document.body.content.remove(index);
        }
    }

    rows.sort_unstable();
    rows.dedup();
    for &(table_index, row_index) in rows.iter().rev() {
        if let Some(BodyContent::Table(table)) = docx.document.body.content.get_mut(table_index) {
            if row_index < table.rows.len() {
                table.rows.remove(row_index);
            }
        }
    }
}

fn prune_cell_paragraphs(docx: &mut Docx<'_>, mut candidates: Vec<(usize, usize, usize, usize)>) {
    candidates.sort_unstable();
    candidates.dedup();

    for &(table_index, row_index, cell_index, paragraph_index) in candidates.iter().rev() {
        let Some(BodyContent::Table(table)) = docx.document.body.content.get_mut(table_index)
        else {
            continue;
        };
        let Some(row) = table.rows.get_mut(row_index) else {
            continue;
        };
        let Some(TableRowContent::TableCell(cell)) = row.cells.get_mut(cell_index) else {
            continue;
        };

        let remaining_paragraphs = cell
            .content
            .iter()
            .filter(|item| matches!(item, TableCellContent::Paragraph(_)))
            .count();

        match cell.content.get_mut(paragraph_index) {
            Some(slot @ TableCellContent::Paragraph(_)) if remaining_paragraphs <= 1 => {
                // Structural minimum: a cell keeps one (empty) paragraph.
                *slot = TableCellContent::Paragraph(Paragraph::default());
            }
            Some(TableCellContent::Paragraph(_)) => {
                cell.content.remove(paragraph_index);
            }
            _ => {}
        }
    }
}
