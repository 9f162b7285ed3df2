//! Batched remote classification with per-batch keyword fallback.

use finwise_core::{CategoryTable, Transaction};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::{
    ChatRequest, Completion, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::error::ClassifyError;
use crate::prompt::{build_prompt, parse_reply};

pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Fixed request parameters for every batch
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub batch_size: usize,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

pub struct RemoteClassifier<C> {
    completion: C,
    table: Arc<CategoryTable>,
    settings: RemoteSettings,
}

impl<C: Completion> RemoteClassifier<C> {
    pub fn new(completion: C, table: Arc<CategoryTable>, settings: RemoteSettings) -> Self {
        Self {
            completion,
            table,
            settings,
        }
    }

    /// Split into request-sized slices; only the last one may be short.
    pub fn batches<'t>(&self, transactions: &'t [Transaction]) -> std::slice::Chunks<'t, Transaction> {
        transactions.chunks(self.settings.batch_size.max(1))
    }

    pub fn request_for(&self, batch: &[Transaction]) -> ChatRequest {
        ChatRequest::user(
            self.settings.model.clone(),
            build_prompt(&self.table, batch),
            self.settings.temperature,
            self.settings.max_tokens,
        )
    }

    /// Categorize every transaction. All batches are in flight at once; the result
    /// has the input's length and order whatever the model host does.
    pub async fn classify(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        let pending = self
            .batches(&transactions)
            .enumerate()
            .map(|(i, batch)| self.classify_batch(i, batch));
        let categories: Vec<String> = join_all(pending).await.into_iter().flatten().collect();

        transactions
            .into_iter()
            .zip(categories)
            .map(|(txn, category)| txn.with_category(category))
            .collect()
    }

    /// One category per transaction in `batch`, from the model when its answer
    /// lines up, otherwise from the keyword table.
    async fn classify_batch(&self, index: usize, batch: &[Transaction]) -> Vec<String> {
        debug!(batch = index, size = batch.len(), "dispatching remote batch");
        match self.try_batch(batch).await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(batch = index, error = %e, "remote classification failed, using keyword rules");
                self.fallback(batch)
            }
        }
    }

    async fn try_batch(&self, batch: &[Transaction]) -> Result<Vec<String>, ClassifyError> {
        let request = self.request_for(batch);
        let reply = self.completion.complete(&request).await?;
        parse_reply(&reply, batch.len(), &self.table)
    }

    fn fallback(&self, batch: &[Transaction]) -> Vec<String> {
        batch
            .iter()
            .map(|t| self.table.categorize(&t.description).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Completion for Unreachable {
        async fn complete(&self, _request: &ChatRequest) -> Result<String, ClassifyError> {
            Err(ClassifyError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    fn classifier() -> RemoteClassifier<Unreachable> {
        RemoteClassifier::new(
            Unreachable,
            Arc::new(CategoryTable::canonical()),
            RemoteSettings::default(),
        )
    }

    #[test]
    fn test_batches_of_ten() {
        let txns: Vec<Transaction> = (0..25)
            .map(|i| Transaction::new(Transaction::sequence_id(i), "", "x", 1.0))
            .collect();
        let sizes: Vec<usize> = classifier().batches(&txns).map(<[Transaction]>::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
    }

    #[test]
    fn test_request_uses_fixed_parameters() {
        let c = classifier();
        let req = c.request_for(&[Transaction::new("tx-0", "", "Uber Trip", -12.0)]);
        assert_eq!(req.model, "fiqa-mistral-7b-lora");
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, 256);
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
        assert!(req.prompt().contains("Transaction: Uber Trip, Amount: 12.00"));
    }

    #[test]
    fn test_fallback_uses_keyword_table() {
        let c = classifier();
        let batch = vec![
            Transaction::new("tx-0", "", "STARBUCKS #123", -4.5),
            Transaction::new("tx-1", "", "random text xyz", -1.0),
        ];
        assert_eq!(c.fallback(&batch), vec!["Food & Dining", "Uncategorized"]);
    }
}
