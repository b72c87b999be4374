//! Paragraph-level substitution.
//!
//! A paragraph is processed as one unit of text: its runs are concatenated,
//! placeholder tokens are resolved, and the result is either left alone,
//! rebuilt as styled runs, or reported upward as a deletion candidate.
//! Deletion itself never happens here; the pruner owns structural removal.

use crate::fill::style;
use crate::resolve::{token_regex, Resolution, ResolutionTable};
use docx_rust::document::Paragraph;

/// Outcome of substituting one paragraph.
#[derive(Debug)]
pub(crate) enum ParagraphOutcome {
    /// No known placeholder occurred; the paragraph is kept byte-for-byte.
    Unchanged,
    /// The paragraph was rewritten. Multi-line values expand into several
    /// paragraphs, one per line.
    Replaced(Vec<Paragraph<'static>>),
    /// A placeholder resolved to deletion; the enclosing structural unit
    /// (this paragraph, or the row around it) must go.
    DeleteUnit,
    /// The paragraph collapsed to an unused responsibility line and should
    /// be dropped rather than rendered blank.
    DropLine,
}

/// One stretch of output text with a single emphasis setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    pub text: String,
    pub bold: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }
}

/// Substitutes every resolved placeholder in `paragraph`.
pub(crate) fn fill_paragraph(
    paragraph: &Paragraph<'_>,
    resolutions: &ResolutionTable,
) -> ParagraphOutcome {
    let text = paragraph.text().to_string();

    let mut segments: Vec<Segment> = Vec::new();
    let mut matched = false;
    let mut blank_hit = false;
    let mut cursor = 0;

    for token in token_regex().find_iter(&text) {
        if token.start() > cursor {
            segments.push(Segment::plain(&text[cursor..token.start()]));
        }
        cursor = token.end();

        match resolutions.get(token.as_str()) {
            None => {
                // Template/record mismatch tolerance: unknown tokens stay
                // verbatim in the output.
                segments.push(Segment::plain(token.as_str()));
            }
            Some(Resolution::Literal(value)) => {
                matched = true;
                segments.push(Segment::plain(value));
            }
            Some(Resolution::BoldLiteral(value)) => {
                matched = true;
                segments.push(Segment::bold(value));
            }
            Some(Resolution::Blank) => {
                matched = true;
                blank_hit = true;
            }
            Some(Resolution::DeleteUnit) => return ParagraphOutcome::DeleteUnit,
        }
    }

    if !matched {
        return ParagraphOutcome::Unchanged;
    }

    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }

    if blank_hit {
        let remaining: String = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect();
        let remaining = remaining.trim();
        // An unused responsibility slot left alone on its line (allowing a
        // leading bullet) drops the whole line; embedded in a longer line it
        // is simply excised.
        if remaining.is_empty() || remaining == "-" || remaining == "\u{2022}" {
            return ParagraphOutcome::DropLine;
        }
    }

    ParagraphOutcome::Replaced(render(segments))
}

/// Splits segments into lines and rebuilds each line as one styled
/// paragraph.
fn render(segments: Vec<Segment>) -> Vec<Paragraph<'static>> {
    let mut lines: Vec<Vec<Segment>> = vec![Vec::new()];
    for segment in segments {
        for (index, piece) in segment.text.split('\n').enumerate() {
            if index > 0 {
                lines.push(Vec::new());
            }
            if !piece.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.push(Segment {
                        text: piece.to_string(),
                        bold: segment.bold,
                    });
                }
            }
        }
    }

    lines.into_iter().map(render_line).collect()
}

fn render_line(line: Vec<Segment>) -> Paragraph<'static> {
    let mut paragraph = Paragraph::default();
    paragraph.property = Some(style::styled_paragraph_property());

    let full: String = line.iter().map(|segment| segment.text.as_str()).collect();
    if is_project_header(&full) {
        // Project headers render entirely bold, regardless of how the
        // segments were resolved.
        paragraph = paragraph.push(style::styled_run(&full, true));
        return paragraph;
    }

    for segment in line {
        if !segment.text.is_empty() {
            paragraph = paragraph.push(style::styled_run(&segment.text, segment.bold));
        }
    }
    paragraph
}

/// A responsibility line that groups work under one engagement:
/// `Project Name: ..., Location: ..., Duration: ...`.
fn is_project_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("Project Name:")
        && trimmed.contains("Location:")
        && trimmed.contains("Duration:")
}
