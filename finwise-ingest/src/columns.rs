//! Guess which statement columns hold the date, description and amount.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{ColumnGuess, RawRow};

static DATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)date|time|when").expect("date header pattern"));

static DESCRIPTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)desc|narration|details|merchant|payee|transaction|particulars")
        .expect("description header pattern")
});

static AMOUNT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)amount|sum|value|debit|credit|payment").expect("amount header pattern")
});

/// Number of leading rows callers pass as `preview`
pub const PREVIEW_ROWS: usize = 5;

/// Suggest a column for each field: the first header (in file order) matching the
/// field's pattern. Fields with no matching header stay unset.
///
/// `preview` is accepted for content-based heuristics but not consulted yet.
pub fn detect_columns(headers: &[String], _preview: &[RawRow]) -> ColumnGuess {
    ColumnGuess {
        date: first_match(headers, &DATE_HEADER),
        description: first_match(headers, &DESCRIPTION_HEADER),
        amount: first_match(headers, &AMOUNT_HEADER),
    }
}

fn first_match(headers: &[String], pattern: &Regex) -> Option<String> {
    headers.iter().find(|h| pattern.is_match(h)).cloned()
}
