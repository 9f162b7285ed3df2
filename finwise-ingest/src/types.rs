use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// One statement line as produced by the CSV reader: column name -> cell text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow(HashMap<String, String>);

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The three semantic fields a statement column can be mapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnField {
    Date,
    Description,
    Amount,
}

impl fmt::Display for ColumnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnField::Date => write!(f, "date"),
            ColumnField::Description => write!(f, "description"),
            ColumnField::Amount => write!(f, "amount"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("no column selected for {0}")]
    Missing(ColumnField),

    #[error("column {column:?} selected for {field} is not in the file")]
    UnknownColumn { field: ColumnField, column: String },
}

/// A confirmed mapping; all three columns are set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date_column: String,
    pub description_column: String,
    pub amount_column: String,
}

impl ColumnMapping {
    pub fn new(
        date_column: impl Into<String>,
        description_column: impl Into<String>,
        amount_column: impl Into<String>,
    ) -> Result<Self, MappingError> {
        ColumnGuess {
            date: Some(date_column.into()),
            description: Some(description_column.into()),
            amount: Some(amount_column.into()),
        }
        .confirm()
    }

    /// Check every mapped column exists among `headers`
    pub fn validate_against(&self, headers: &[String]) -> Result<(), MappingError> {
        for (field, column) in [
            (ColumnField::Date, &self.date_column),
            (ColumnField::Description, &self.description_column),
            (ColumnField::Amount, &self.amount_column),
        ] {
            if !headers.iter().any(|h| h == column) {
                return Err(MappingError::UnknownColumn {
                    field,
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Auto-detected suggestion; any field may be unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGuess {
    pub date: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
}

impl ColumnGuess {
    /// Replace guesses with caller choices where given
    pub fn with_overrides(
        mut self,
        date: Option<String>,
        description: Option<String>,
        amount: Option<String>,
    ) -> Self {
        if date.is_some() {
            self.date = date;
        }
        if description.is_some() {
            self.description = description;
        }
        if amount.is_some() {
            self.amount = amount;
        }
        self
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Fields that still need a column
    pub fn missing(&self) -> Vec<ColumnField> {
        let mut out = Vec::new();
        if is_unset(&self.date) {
            out.push(ColumnField::Date);
        }
        if is_unset(&self.description) {
            out.push(ColumnField::Description);
        }
        if is_unset(&self.amount) {
            out.push(ColumnField::Amount);
        }
        out
    }

    /// Turn the guess into a mapping; fails on the first unset field.
    pub fn confirm(self) -> Result<ColumnMapping, MappingError> {
        if let Some(field) = self.missing().into_iter().next() {
            return Err(MappingError::Missing(field));
        }
        Ok(ColumnMapping {
            date_column: self.date.unwrap_or_default(),
            description_column: self.description.unwrap_or_default(),
            amount_column: self.amount.unwrap_or_default(),
        })
    }
}

fn is_unset(column: &Option<String>) -> bool {
    column.as_deref().is_none_or(|c| c.trim().is_empty())
}
