//! Apply a confirmed column mapping to raw rows.

use finwise_core::Transaction;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::dates::normalize_date;
use crate::types::{ColumnMapping, RawRow};

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)").expect("number pattern"));

/// Map rows to transactions in file order.
///
/// Ids come from the row's position in `rows`, so they are not renumbered when rows
/// are dropped. Rows with an empty description or a zero amount are skipped.
pub fn map_rows(rows: &[RawRow], mapping: &ColumnMapping) -> Vec<Transaction> {
    let out: Vec<Transaction> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| map_row(i, row, mapping))
        .collect();

    let dropped = rows.len() - out.len();
    if dropped > 0 {
        debug!(dropped, kept = out.len(), "skipped rows without description or amount");
    }
    out
}

fn map_row(index: usize, row: &RawRow, mapping: &ColumnMapping) -> Option<Transaction> {
    let description = row.get(&mapping.description_column).unwrap_or("");
    let amount = parse_amount(row.get(&mapping.amount_column).unwrap_or(""));

    if description.is_empty() || amount == 0.0 {
        return None;
    }

    let date = normalize_date(row.get(&mapping.date_column).unwrap_or(""));
    Some(Transaction::new(
        Transaction::sequence_id(index),
        date,
        description,
        amount,
    ))
}

/// Keep digits, `.` and `-`, then read the leading decimal number. `0` when none.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    LEADING_NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
