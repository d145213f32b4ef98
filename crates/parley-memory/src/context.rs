//! The per-query context bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parley_core::acts::SpeechAct;
use parley_core::knowledge::KnowledgeEntry;
use parley_core::messages::Message;

/// A condensed digest of one batch of older messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    /// Timestamp of the earliest message in the batch.
    pub first_timestamp: DateTime<Utc>,
    /// Timestamp of the latest message in the batch.
    pub last_timestamp: DateTime<Utc>,
    /// How many messages the digest covers.
    pub message_count: usize,
    /// The digest text — or the raw batch rendering on fallback.
    pub text: String,
    /// True when the summarizer failed and the raw batch text was inlined
    /// verbatim instead (larger, but nothing lost).
    pub verbatim_fallback: bool,
}

/// Everything assembled for one query, already access-filtered by the
/// caller. Ephemeral — built per query, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryContext {
    /// Newest messages, verbatim, oldest first.
    pub recent_messages: Vec<Message>,
    /// Digests of older history, oldest batch first.
    pub summaries: Vec<HistorySummary>,
    /// Access-filtered speech acts for the prompt.
    pub relevant_speech_acts: Vec<SpeechAct>,
    /// Access-filtered knowledge entries for the prompt.
    pub relevant_knowledge: Vec<KnowledgeEntry>,
    /// Heuristic token estimate of the whole bundle.
    pub estimated_tokens: u64,
    /// True when at least one summarization call failed and its batch was
    /// inlined verbatim.
    pub degraded: bool,
}

impl MemoryContext {
    /// Ids of the messages the prompt will show verbatim.
    #[must_use]
    pub fn recent_message_ids(&self) -> Vec<String> {
        self.recent_messages.iter().map(|m| m.id.clone()).collect()
    }
}
