//! finwise-classify: remote (LLM) transaction classification with keyword fallback,
//! and the categorization payload boundary.

pub mod client;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod remote;

pub use client::{ChatMessage, ChatRequest, Completion, HttpCompletion};
pub use error::{ClassifyError, PayloadError};
pub use pipeline::{CategorizeBody, Classifier, ErrorBody, handle_json, handle_payload, parse_payload};
pub use remote::{RemoteClassifier, RemoteSettings};
