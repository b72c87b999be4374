//! Fixed visual style applied to every rewritten run.
//!
//! The company template mandates one look for generated content: Arial,
//! 11 pt, black, 1.5 line spacing. Original template runs that are not
//! rewritten keep whatever formatting they carried.

use docx_rust::document::{Run, RunContent, Text};
use docx_rust::formatting::{
    Bold, CharacterProperty, Color, Fonts, ParagraphProperty, Size, Spacing,
};

const FONT_FAMILY: &str = "Arial";
/// `w:sz` is measured in half-points; 22 renders as 11 pt.
const FONT_SIZE_HALF_POINTS: isize = 22;
const FONT_COLOR: &str = "000000";
/// `w:line` with the default auto rule is measured in 240ths of a line;
/// 360 renders as 1.5 line spacing.
const LINE_SPACING: isize = 360;

/// Builds a run carrying the fixed style.
pub(crate) fn styled_run(text: &str, bold: bool) -> Run<'static> {
    let mut property = CharacterProperty {
        fonts: Some(Fonts {
            ascii: Some(FONT_FAMILY.into()),
            h_ansi: Some(FONT_FAMILY.into()),
            ..Default::default()
        }),
        size: Some(Size {
            value: FONT_SIZE_HALF_POINTS,
        }),
        color: Some(Color {
            value: FONT_COLOR.into(),
        }),
        ..Default::default()
    };
    if bold {
        property.bold = Some(Bold { value: Some(true) });
    }

    let mut run = Run::default();
    run.property = Some(property);
    run.content.push(RunContent::Text(Text {
        text: text.to_string().into(),
        ..Default::default()
    }));
    run
}

/// Paragraph property carrying the fixed 1.5 line spacing.
pub(crate) fn styled_paragraph_property() -> ParagraphProperty<'static> {
    ParagraphProperty {
        spacing: Some(Spacing {
            line: Some(LINE_SPACING),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Reads the effective bold flag of a run, for assertions and row scans.
#[cfg(test)]
pub(crate) fn run_is_bold(run: &Run<'_>) -> bool {
    run.property
        .as_ref()
        .and_then(|property| property.bold.as_ref())
        .map(|bold| bold.value.unwrap_or(true))
        .unwrap_or(false)
}
