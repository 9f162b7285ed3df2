//! Categorization entry point: pick a classifier and validate caller payloads.

use finwise_core::{CategoryTable, Transaction};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::client::Completion;
use crate::error::PayloadError;
use crate::remote::RemoteClassifier;

/// How categories are assigned
pub enum Classifier<C> {
    Keyword(Arc<CategoryTable>),
    Remote(RemoteClassifier<C>),
}

impl<C: Completion> Classifier<C> {
    pub fn mode(&self) -> &'static str {
        match self {
            Classifier::Keyword(_) => "keyword",
            Classifier::Remote(_) => "remote",
        }
    }

    /// Categorize every transaction; never fails and keeps length and order.
    pub async fn classify(&self, mut transactions: Vec<Transaction>) -> Vec<Transaction> {
        let count = transactions.len();
        let out = match self {
            Classifier::Keyword(table) => {
                table.assign_categories(&mut transactions);
                transactions
            }
            Classifier::Remote(remote) => remote.classify(transactions).await,
        };
        info!(mode = self.mode(), count, "categorized transactions");
        out
    }
}

/// Request and response body of the categorization boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorizeBody {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Extract the transaction list, rejecting anything structurally wrong.
///
/// Only the payload shape can fail. Elements are read field by field: a missing `id`
/// becomes `tx-<index>`, and other missing or mistyped fields fall back to empty values.
pub fn parse_payload(payload: &Value) -> Result<Vec<Transaction>, PayloadError> {
    let obj = payload.as_object().ok_or(PayloadError::NotAnObject)?;
    let items = match obj.get("transactions") {
        None | Some(Value::Null) => return Err(PayloadError::MissingTransactions),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(PayloadError::NotAnArray),
    };

    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| read_transaction(index, item))
        .collect())
}

fn read_transaction(index: usize, item: &Value) -> Transaction {
    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let amount = match item.get("amount") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| Transaction::sequence_id(index));

    Transaction::new(id, text("date"), text("description"), amount).with_category(text("category"))
}

pub async fn handle_payload<C: Completion>(
    classifier: &Classifier<C>,
    payload: &Value,
) -> Result<CategorizeBody, PayloadError> {
    let transactions = parse_payload(payload)?;
    Ok(CategorizeBody {
        transactions: classifier.classify(transactions).await,
    })
}

/// Run raw JSON text through the boundary, returning a status and the body to send.
pub async fn handle_json<C: Completion>(classifier: &Classifier<C>, body: &str) -> (u16, Value) {
    let result = match serde_json::from_str::<Value>(body) {
        Ok(payload) => handle_payload(classifier, &payload).await,
        Err(e) => Err(PayloadError::InvalidJson(e)),
    };

    match result {
        Ok(out) => (200, serde_json::json!(out)),
        Err(e) => (
            e.status_code(),
            serde_json::json!(ErrorBody {
                error: e.to_string()
            }),
        ),
    }
}
