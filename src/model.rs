//! The structured record extracted from a CV.
//!
//! The extraction collaborator returns loosely-shaped JSON; everything here
//! is about coercing that payload into a record the filling engine can rely
//! on. Missing fields default, malformed payloads fall back to an empty (but
//! valid) record, and the document-filling stage never sees an error.

use crate::normalize::{normalize_duration, normalize_name};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

/// Default language entry used whenever the CV yields none.
pub const DEFAULT_LANGUAGE: &str = "English - Fluent";

/// One employment entry, most-recent-first in [`CvRecord::experiences`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub responsibilities: Vec<String>,
}

impl Experience {
    /// An experience occupies a template slot only when both company and
    /// role are non-empty; anything less is elided entirely.
    pub fn is_present(&self) -> bool {
        !self.company.is_empty() && !self.role.is_empty()
    }
}

/// Normalized candidate record consumed by the template-filling engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CvRecord {
    pub candidate_name: String,
    pub position: String,
    pub education: String,
    #[serde(deserialize_with = "string_or_number")]
    pub total_experience_years: String,
    pub phone: String,
    pub email: String,
    pub intro_paragraph: String,
    pub experiences: Vec<Experience>,
    pub technical_skills: Vec<String>,
    pub certifications: Vec<String>,
    pub language_skills: Vec<String>,
}

impl CvRecord {
    /// The fallback record: all scalars empty, all sequences empty except
    /// the language default. Always a valid filling input.
    pub fn empty() -> Self {
        Self {
            language_skills: vec![DEFAULT_LANGUAGE.to_string()],
            ..Self::default()
        }
    }

    /// Decodes an extraction payload into a normalized record.
    ///
    /// A payload that cannot be parsed as a record at all yields
    /// [`CvRecord::empty`] rather than an error.
    pub fn from_extraction_json(raw: &str) -> Self {
        let mut record = match serde_json::from_str::<CvRecord>(raw) {
            Ok(record) => record,
            Err(err) => {
                warn!("extraction payload is not a valid record: {err}");
                Self::empty()
            }
        };
        record.normalize();
        record
    }

    /// Applies name casing, duration normalization and the language default.
    ///
    /// The first experience normalizes its duration under the assumption
    /// that a lone start date means the position is ongoing; later
    /// experiences do not.
    pub fn normalize(&mut self) {
        self.candidate_name = normalize_name(&self.candidate_name);
        self.position = normalize_name(&self.position);

        for (index, experience) in self.experiences.iter_mut().enumerate() {
            experience.role = normalize_name(&experience.role);
            experience.duration = normalize_duration(&experience.duration, index == 0);
        }

        if self.language_skills.is_empty() {
            self.language_skills.push(DEFAULT_LANGUAGE.to_string());
        }
    }
}

/// Accepts `"11"`, `11` or `11.5` for the experience-years field; the LLM
/// does not reliably quote it.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => Ok(text),
        Some(Raw::Number(number)) => Ok(number.to_string()),
        None => Ok(String::new()),
    }
}
