//! Read a statement CSV into ordered headers and rows.
//!
//! Any bank layout is accepted; the first record is the header row. Columns are
//! mapped later, so nothing here knows about dates or amounts.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::columns::PREVIEW_ROWS;
use crate::types::RawRow;

/// Headers plus rows in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Statement {
    /// Leading rows handed to column detection
    pub fn preview(&self) -> &[RawRow] {
        &self.rows[..self.rows.len().min(PREVIEW_ROWS)]
    }
}

pub fn read_statement(path: impl AsRef<Path>) -> Result<Statement> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    read_statement_from(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

pub fn read_statement_from<R: Read>(reader: R) -> Result<Statement> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        // Short records leave trailing columns absent; extra cells are ignored
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(Statement { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("fixtures")
            .join("statement.csv")
    }

    #[test]
    fn test_read_fixture() {
        let stmt = read_statement(fixture_path()).expect("should parse fixture");
        assert_eq!(
            stmt.headers,
            vec!["Posting Date", "Payee", "Reference", "Amount"]
        );
        assert!(stmt.rows.len() >= 10);
        assert_eq!(stmt.rows[0].get("Payee"), Some("STARBUCKS #123"));
        assert_eq!(stmt.preview().len(), PREVIEW_ROWS);
    }

    #[test]
    fn test_short_rows_and_bom() {
        let data = "\u{feff}Date, Memo ,Amount\n01/02/2024,Coffee,-3.00\n01/03/2024,Tea\n";
        let stmt = read_statement_from(data.as_bytes()).unwrap();
        assert_eq!(stmt.headers, vec!["Date", "Memo", "Amount"]);
        assert_eq!(stmt.rows.len(), 2);
        assert_eq!(stmt.rows[1].get("Amount"), None);
        assert_eq!(stmt.preview().len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_statement("/nonexistent/statement.csv").is_err());
    }
}
