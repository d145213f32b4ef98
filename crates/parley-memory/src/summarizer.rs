//! The summarization seam.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use parley_core::messages::Message;
use parley_llm::{ModelError, ModelService, PromptRequest};

/// Why a summarization call failed.
///
/// Callers treat any variant the same way: fall back to inlining the raw
/// batch. The distinction only matters for logs.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The underlying model call failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The summarizer produced unusable output.
    #[error("summarizer produced no usable digest: {0}")]
    EmptyDigest(String),
}

/// Condenses a batch of older messages into a short digest.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `batch` (chronological) into a few sentences.
    ///
    /// The digest must preserve stated decisions, stated commitments, open
    /// questions, and any deadlines or dates mentioned.
    async fn summarize(&self, batch: &[Message]) -> Result<String, SummarizeError>;
}

const DIGEST_SYSTEM_PROMPT: &str = "\
You condense email threads. Summarize the given messages in at most five \
sentences. You MUST preserve: stated decisions, stated commitments, open \
questions, and any deadlines or dates mentioned. Omit pleasantries.";

/// [`Summarizer`] backed by the model service's plain prompt path.
pub struct ModelSummarizer {
    model: Arc<dyn ModelService>,
}

impl ModelSummarizer {
    /// Wrap a model service.
    #[must_use]
    pub fn new(model: Arc<dyn ModelService>) -> Self {
        Self { model }
    }

    fn render_batch(batch: &[Message]) -> String {
        let mut out = String::new();
        for message in batch {
            out.push_str(&format!(
                "From: {}\nDate: {}\nSubject: {}\n{}\n\n",
                message.from,
                message.timestamp.to_rfc3339(),
                message.subject,
                message.body
            ));
        }
        out
    }
}

#[async_trait]
impl Summarizer for ModelSummarizer {
    async fn summarize(&self, batch: &[Message]) -> Result<String, SummarizeError> {
        let request = PromptRequest {
            system_prompt: DIGEST_SYSTEM_PROMPT.to_owned(),
            user_prompt: Self::render_batch(batch),
            temperature: Some(0.0),
        };
        let digest = self.model.prompt(&request).await?;
        let digest = digest.trim();
        if digest.is_empty() {
            return Err(SummarizeError::EmptyDigest("blank response".into()));
        }
        debug!(batch_len = batch.len(), digest_len = digest.len(), "batch summarized");
        Ok(digest.to_owned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
