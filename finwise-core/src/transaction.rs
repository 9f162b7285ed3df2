//! Transaction record types shared by the mapper, both classifiers and the aggregator

use serde::{Deserialize, Serialize};

/// A single statement line after column mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Sequence-derived identifier (`tx-<row index>`), unique within a batch
    pub id: String,
    /// Canonical YYYY-MM-DD, or the original string when it could not be parsed
    pub date: String,
    /// Never empty
    pub description: String,
    /// Never zero; sign preserved from the statement
    pub amount: f64,
    /// Empty until a classifier runs
    #[serde(default)]
    pub category: String,
}

impl Transaction {
    /// Create an uncategorized transaction
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            description: description.into(),
            amount,
            category: String::new(),
        }
    }

    /// Id for the row at `index` in the unfiltered input
    pub fn sequence_id(index: usize) -> String {
        format!("tx-{index}")
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Magnitude used for display and in remote prompts
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// False until a classifier has assigned a category
    pub fn is_categorized(&self) -> bool {
        !self.category.is_empty()
    }
}

/// Spend summary for one category, always recomputed from a transaction set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryStat {
    pub category: String,
    pub count: usize,
    /// Signed sum of the amounts in this category
    pub total: f64,
    /// `total` as a share of the signed sum over every transaction
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_creation() {
        let txn = Transaction::new(Transaction::sequence_id(3), "2024-03-15", "STARBUCKS #123", -4.5);
        assert_eq!(txn.id, "tx-3");
        assert_eq!(txn.abs_amount(), 4.5);
        assert!(!txn.is_categorized());
        assert!(txn.with_category("Food & Dining").is_categorized());
    }

    #[test]
    fn test_json_shape() {
        let txn = Transaction::new("tx-0", "2024-03-15", "Uber Trip", -12.0).with_category("Transportation");
        let v = serde_json::to_value(&txn).unwrap();
        assert_eq!(v["id"], "tx-0");
        assert_eq!(v["category"], "Transportation");
        assert_eq!(v.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_category_defaults_to_empty() {
        let txn: Transaction = serde_json::from_str(
            r#"{"id":"tx-1","date":"2024-01-02","description":"Paycheck","amount":2500.0}"#,
        )
        .unwrap();
        assert_eq!(txn.category, "");
    }
}
