//! Normalize statement date cells to `YYYY-MM-DD`.
//!
//! Slash/dot/dash triples are read as month, day, year (US order). This is a fixed
//! assumption, not detected per file.

use chrono::{DateTime, NaiveDate};

/// Free-form layouts tried after the numeric triple. A trailing time is allowed.
const FREEFORM_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%b-%d-%Y",
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
    "%a %b %d %Y",
];

/// Returns ISO form when the input parses, otherwise the input unchanged.
pub fn normalize_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if has_iso_prefix(raw) {
        return raw[..10].to_string();
    }

    if let Some(date) = parse_us_triple(raw) {
        return iso(date);
    }

    if let Some(date) = parse_freeform(raw) {
        return iso(date);
    }

    raw.to_string()
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn has_iso_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// `MM/DD/YYYY`, `M.D.YY`, `MM-DD-YYYY`, ...
fn parse_us_triple(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.trim().split(['/', '.', '-']).collect();
    if parts.len() != 3 {
        return None;
    }
    let month: u32 = parts[0].trim().parse().ok()?;
    let day: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    NaiveDate::from_ymd_opt(expand_year(year), month, day)
}

/// Two-digit years pivot at 50
fn expand_year(year: i32) -> i32 {
    match year {
        0..=49 => year + 2000,
        50..=99 => year + 1900,
        _ => year,
    }
}

fn parse_freeform(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }

    FREEFORM_FORMATS.iter().find_map(|fmt| {
        let (date, rest) = NaiveDate::parse_and_remainder(s, fmt).ok()?;
        let rest_ok = rest.is_empty() || rest.starts_with(' ') || rest.starts_with('T');
        rest_ok.then_some(date)
    })
}
