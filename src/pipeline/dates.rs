use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::ValidationReport;

static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})(?:[T ]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?\s*(?:Z|[+-]\d{2}:?\d{2})?)?$",
    )
    .expect("valid regex")
});
static COMPACT_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid regex"));
static NUMERIC_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})$").expect("valid regex")
});
static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid regex"));

pub(super) fn normalize_date_field(record: &mut Value, field: &str, report: &mut ValidationReport) {
    let Some(slot) = record.get_mut(field) else {
        return;
    };

    let normalized = match &*slot {
        Value::Null => return,
        Value::String(text) if text.is_empty() => Value::Null,
        Value::String(text) => match parse_lenient_date(text) {
            Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            None => {
                report
                    .warnings
                    .push(format!("Could not parse date: '{text}'. Setting to null."));
                Value::Null
            }
        },
        other => {
            report
                .warnings
                .push(format!("Could not parse date: '{other}'. Setting to null."));
            Value::Null
        }
    };

    debug!(field, value = %normalized, "normalized date field");
    *slot = normalized;
}

/// Parses the date formats commonly found in extracted documents: ISO dates
/// (optionally with a time), numeric month-first dates with a day-first
/// fallback, and English textual dates such as "March 3, 2021" or
/// "Wednesday, 3rd of March 2021". Month-and-year resolves to the first of
/// the month.
pub fn parse_lenient_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(captures) = ISO_DATE_RE
        .captures(trimmed)
        .or_else(|| COMPACT_DATE_RE.captures(trimmed))
    {
        return NaiveDate::from_ymd_opt(
            captures[1].parse().ok()?,
            captures[2].parse().ok()?,
            captures[3].parse().ok()?,
        );
    }

    if let Some(captures) = NUMERIC_DATE_RE.captures(trimmed) {
        let first: u32 = captures[1].parse().ok()?;
        let second: u32 = captures[2].parse().ok()?;
        let year = expand_year(&captures[3])?;
        return NaiveDate::from_ymd_opt(year, first, second)
            .or_else(|| NaiveDate::from_ymd_opt(year, second, first));
    }

    parse_textual_date(trimmed)
}

fn parse_textual_date(input: &str) -> Option<NaiveDate> {
    let lowered = input.to_lowercase();
    let without_ordinals = ORDINAL_RE.replace_all(&lowered, "$1");
    let spaced = without_ordinals.replace([',', '.', '-', '/'], " ");

    let mut month = None;
    let mut numbers: Vec<&str> = Vec::new();

    for token in spaced.split_whitespace() {
        if token == "of" || is_weekday(token) {
            continue;
        }
        if let Some(value) = month_number(token) {
            if month.replace(value).is_some() {
                return None;
            }
            continue;
        }
        if token.chars().all(|ch| ch.is_ascii_digit()) {
            numbers.push(token);
            continue;
        }
        return None;
    }

    let month = month?;
    let (day, year) = match numbers.as_slice() {
        [year] if year.len() == 4 => (1, year.parse().ok()?),
        [a, b] if a.len() == 4 && b.len() <= 2 => (b.parse().ok()?, a.parse().ok()?),
        [a, b] if a.len() <= 2 => (a.parse().ok()?, expand_year(b)?),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn expand_year(digits: &str) -> Option<i32> {
    let value: i32 = digits.parse().ok()?;
    match digits.len() {
        4 => Some(value),
        2 if value < 69 => Some(2000 + value),
        2 => Some(1900 + value),
        _ => None,
    }
}

fn month_number(token: &str) -> Option<u32> {
    let month = match token {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

fn is_weekday(token: &str) -> bool {
    matches!(
        token,
        "mon"
            | "monday"
            | "tue"
            | "tues"
            | "tuesday"
            | "wed"
            | "wednesday"
            | "thu"
            | "thur"
            | "thurs"
            | "thursday"
            | "fri"
            | "friday"
            | "sat"
            | "saturday"
            | "sun"
            | "sunday"
    )
}
