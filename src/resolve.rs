//! Placeholder grammar and the resolution table.
//!
//! The template carries literal `{{...}}` tokens. Before any document is
//! touched, the whole grammar is resolved against the record into tagged
//! values; the filling engine then only ever consults this table. Deletion
//! and emphasis are expressed as enum variants, never as marker substrings
//! inside rendered text, so literal CV content can never collide with the
//! protocol.

use crate::model::{CvRecord, DEFAULT_LANGUAGE};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of experience slots the company template provides.
pub const MAX_EXPERIENCE_SLOTS: usize = 20;

/// Number of responsibility lines per experience slot.
pub const MAX_RESPONSIBILITY_SLOTS: usize = 100;

/// Matches one placeholder token, braces included.
pub(crate) fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{[A-Z0-9_]+\}\}").expect("valid regex"))
}

/// The action to perform for one placeholder occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Substitute the literal text.
    Literal(String),
    /// Substitute the literal text rendered in bold.
    BoldLiteral(String),
    /// Render nothing; the line is dropped if nothing else remains on it.
    Blank,
    /// The enclosing structural unit (paragraph or table row) is removed.
    DeleteUnit,
}

/// Mapping from every placeholder token the template may contain to its
/// resolved action.
#[derive(Debug, Default)]
pub struct ResolutionTable {
    entries: HashMap<String, Resolution>,
}

impl ResolutionTable {
    /// Resolves the full placeholder grammar against a normalized record.
    pub fn build(record: &CvRecord) -> Self {
        let mut entries = HashMap::new();

        entries.insert(
            "{{CANDIDATE_NAME}}".to_string(),
            Resolution::Literal(record.candidate_name.clone()),
        );
        entries.insert(
            "{{POSITION}}".to_string(),
            Resolution::Literal(record.position.clone()),
        );
        entries.insert(
            "{{EDUCATION}}".to_string(),
            Resolution::Literal(record.education.clone()),
        );
        entries.insert(
            "{{TOTAL_EXPERIENCE_YEARS}}".to_string(),
            Resolution::Literal(record.total_experience_years.clone()),
        );
        entries.insert(
            "{{PHONE}}".to_string(),
            Resolution::Literal(record.phone.clone()),
        );
        entries.insert(
            "{{EMAIL}}".to_string(),
            Resolution::Literal(record.email.clone()),
        );
        entries.insert(
            "{{INTRO_PARAGRAPH}}".to_string(),
            Resolution::Literal(record.intro_paragraph.clone()),
        );
        entries.insert(
            "{{TECHNICAL_SKILLS_LIST}}".to_string(),
            Resolution::Literal(bullet_list(&record.technical_skills, "")),
        );
        entries.insert(
            "{{CERTIFICATIONS_LIST}}".to_string(),
            Resolution::Literal(bullet_list(&record.certifications, "N/A")),
        );
        entries.insert(
            "{{LANGUAGE_SKILLS_LIST}}".to_string(),
            Resolution::Literal(if record.language_skills.is_empty() {
                DEFAULT_LANGUAGE.to_string()
            } else {
                record.language_skills.join(", ")
            }),
        );

        for slot in 1..=MAX_EXPERIENCE_SLOTS {
            let experience = record
                .experiences
                .get(slot - 1)
                .filter(|experience| experience.is_present());

            match experience {
                Some(experience) => {
                    entries.insert(
                        format!("{{{{EXP{slot}_COMPANY}}}}"),
                        Resolution::BoldLiteral(experience.company.clone()),
                    );
                    entries.insert(
                        format!("{{{{EXP{slot}_ROLE}}}}"),
                        Resolution::Literal(experience.role.clone()),
                    );
                    entries.insert(
                        format!("{{{{EXP{slot}_DURATION}}}}"),
                        Resolution::Literal(experience.duration.clone()),
                    );
                    for line in 1..=MAX_RESPONSIBILITY_SLOTS {
                        let resolution = match experience.responsibilities.get(line - 1) {
                            Some(responsibility) => Resolution::Literal(responsibility.clone()),
                            None => Resolution::Blank,
                        };
                        entries.insert(format!("{{{{EXP{slot}_RESP{line}}}}}"), resolution);
                    }
                }
                None => {
                    entries.insert(
                        format!("{{{{EXP{slot}_COMPANY}}}}"),
                        Resolution::DeleteUnit,
                    );
                    entries.insert(format!("{{{{EXP{slot}_ROLE}}}}"), Resolution::DeleteUnit);
                    entries.insert(
                        format!("{{{{EXP{slot}_DURATION}}}}"),
                        Resolution::DeleteUnit,
                    );
                    for line in 1..=MAX_RESPONSIBILITY_SLOTS {
                        entries.insert(
                            format!("{{{{EXP{slot}_RESP{line}}}}}"),
                            Resolution::DeleteUnit,
                        );
                    }
                }
            }
        }

        Self { entries }
    }

    /// Looks up one token (braces included). Unknown tokens resolve to
    /// `None` and are left verbatim by the engine.
    pub fn get(&self, token: &str) -> Option<&Resolution> {
        self.entries.get(token)
    }
}

/// Joins entries into one multi-line value, one bullet per entry.
/// An empty sequence yields `fallback` without a bullet.
fn bullet_list(entries: &[String], fallback: &str) -> String {
    if entries.is_empty() {
        return fallback.to_string();
    }
    entries
        .iter()
        .map(|entry| format!("\u{2022} {entry}"))
        .collect::<Vec<_>>()
        .join("\n")
}
