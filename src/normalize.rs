//! Date, duration and name normalization applied to extracted records.
//!
//! These are pure functions with a fixed contract: recognized forms are
//! rewritten to the canonical `MON YYYY` / `MON YYYY - MON YYYY` shapes,
//! anything unrecognized passes through unchanged.

use regex::Regex;
use std::sync::OnceLock;

/// Phrases that denote an ongoing position, matched case-insensitively
/// against the whole input.
const ONGOING_MARKERS: [&str; 6] = ["present", "current", "ongoing", "till date", "now", "till now"];

const MONTH_ABBR: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

fn month_word_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z]{3,})[-/ ](\d{4})").expect("valid regex"))
}

fn month_num_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})[/-](\d{4})").expect("valid regex"))
}

fn month_space_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z]+)\s+(\d{4})").expect("valid regex"))
}

fn month_comma_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z]+),?\s+(\d{4})").expect("valid regex"))
}

fn dash_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*[-\u{2013}\u{2014}]\s*").expect("valid regex"))
}

fn month_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)").expect("valid regex")
    })
}

fn abbr_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z]{3})-?(\d{4})").expect("valid regex"))
}

/// Converts a month number ("2", "09") to its 3-letter abbreviation.
/// Out-of-range or non-numeric input is returned unchanged.
fn month_abbr(month_num: &str) -> String {
    match month_num.trim_start_matches('0').parse::<usize>() {
        Ok(n) if (1..=12).contains(&n) => MONTH_ABBR[n - 1].to_string(),
        _ => month_num.to_string(),
    }
}

/// Uppercases the first three letters of a month word: "September" -> "SEP".
fn month_word_abbr(word: &str) -> String {
    word.chars().take(3).collect::<String>().to_uppercase()
}

/// Normalizes a single date to the canonical `MON YYYY` form.
///
/// Ongoing markers ("present", "till date", ...) become `Present`;
/// `Sep-2015`, `09/2015`, `September 2015` and `September, 2015` all become
/// `SEP 2015`; unrecognized input is returned unchanged.
pub fn normalize_date(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }

    let lowered = date.to_lowercase();
    if ONGOING_MARKERS.contains(&lowered.as_str()) {
        return "Present".to_string();
    }

    if let Some(caps) = month_word_year_re().captures(date) {
        return format!("{} {}", month_word_abbr(&caps[1]), &caps[2]);
    }
    if let Some(caps) = month_num_year_re().captures(date) {
        return format!("{} {}", month_abbr(&caps[1]), &caps[2]);
    }
    if let Some(caps) = month_space_year_re().captures(date) {
        return format!("{} {}", month_word_abbr(&caps[1]), &caps[2]);
    }
    if let Some(caps) = month_comma_year_re().captures(date) {
        return format!("{} {}", month_word_abbr(&caps[1]), &caps[2]);
    }

    date.to_string()
}

/// Normalizes a duration string to `MON YYYY - MON YYYY` (or `... - Present`).
///
/// An open range already ending in the literal `Present` keeps that end and
/// only the start date is normalized. A lone start date is turned into an
/// open range when `is_first` is set (the most recent experience is assumed
/// ongoing); otherwise the input is returned unchanged.
pub fn normalize_duration(duration: &str, is_first: bool) -> String {
    if duration.is_empty() {
        return String::new();
    }

    if duration.contains("- Present") {
        if let Some((start, _)) = duration.rsplit_once('-') {
            let start = month_name_re()
                .replace_all(start.trim(), |caps: &regex::Captures<'_>| {
                    caps[1].to_uppercase()
                })
                .to_string();
            let start = abbr_year_re().replace(&start, "$1 $2").to_string();
            return format!("{start} - Present");
        }
    }

    let parts: Vec<&str> = dash_split_re().split(duration).collect();
    match parts.as_slice() {
        [start, end] => format!(
            "{} - {}",
            normalize_date(start.trim()),
            normalize_date(end.trim())
        ),
        [only] if is_first => {
            let start = normalize_date(only.trim());
            if !start.is_empty() && start != "Present" {
                format!("{start} - Present")
            } else {
                start
            }
        }
        _ => duration.to_string(),
    }
}

/// Converts fully upper-case words longer than one character to title case.
/// Mixed-case and single-letter words are left untouched.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
            let all_upper = !letters.is_empty() && letters.iter().all(|c| c.is_uppercase());
            if all_upper && word.chars().count() > 1 {
                capitalize(word)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn date_month_word_forms() {
        assert_eq!(normalize_date("Sep-2015"), "SEP 2015");
        assert_eq!(normalize_date("Sep/2015"), "SEP 2015");
        assert_eq!(normalize_date("Sep 2015"), "SEP 2015");
        assert_eq!(normalize_date("September 2015"), "SEP 2015");
        assert_eq!(normalize_date("September, 2015"), "SEP 2015");
    }

    #[test]
    fn date_month_number_forms() {
        assert_eq!(normalize_date("09/2015"), "SEP 2015");
        assert_eq!(normalize_date("9/2015"), "SEP 2015");
        assert_eq!(normalize_date("02-2021"), "FEB 2021");
    }

    #[test]
    fn date_ongoing_markers() {
        assert_eq!(normalize_date("present"), "Present");
        assert_eq!(normalize_date("Till Date"), "Present");
        assert_eq!(normalize_date("NOW"), "Present");
    }

    #[test]
    fn date_unrecognized_passes_through() {
        assert_eq!(normalize_date("sometime in the past"), "sometime in the past");
        assert_eq!(normalize_date("13/2015"), "13 2015");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn duration_open_range_keeps_present() {
        assert_eq!(
            normalize_duration("Sep 2015 - Present", false),
            "SEP 2015 - Present"
        );
        assert_eq!(
            normalize_duration("Sep-2015 - Present", false),
            "SEP 2015 - Present"
        );
    }

    #[test]
    fn duration_closed_range_normalizes_both_ends() {
        assert_eq!(
            normalize_duration("Sep 2015 - Jun 2018", false),
            "SEP 2015 - JUN 2018"
        );
        assert_eq!(
            normalize_duration("09/2015 \u{2013} 06/2018", false),
            "SEP 2015 - JUN 2018"
        );
    }

    #[test]
    fn duration_lone_start_for_first_experience_becomes_open_range() {
        assert_eq!(normalize_duration("Mar 2020", true), "MAR 2020 - Present");
        assert_eq!(normalize_duration("Mar 2020", false), "Mar 2020");
        assert_eq!(normalize_duration("present", true), "Present");
    }

    #[test]
    fn name_all_caps_becomes_title_case() {
        assert_eq!(normalize_name("RAJU GUJAR"), "Raju Gujar");
        assert_eq!(normalize_name("SENIOR TECHNICAL ENGINEER"), "Senior Technical Engineer");
    }

    #[test]
    fn name_mixed_case_and_initials_untouched() {
        assert_eq!(normalize_name("McDonald SMITH"), "McDonald Smith");
        assert_eq!(normalize_name("J R Tolkien"), "J R Tolkien");
        assert_eq!(normalize_name(""), "");
    }
}
