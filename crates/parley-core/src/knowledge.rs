//! Curated knowledge entries distilled from conversations.

use serde::{Deserialize, Serialize};

/// A knowledge-base entry derived from one or more messages.
///
/// Audience semantics match [`crate::acts::SpeechAct`]: `participants` is the
/// set of emails entitled to see the entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
    /// Unique entry id.
    pub id: String,
    /// Free-form category label (e.g. "process", "decision-log").
    pub category: String,
    /// Short title.
    pub title: String,
    /// Entry body.
    pub content: String,
    /// Emails entitled to see this entry.
    pub participants: Vec<String>,
    /// Messages this entry was distilled from.
    #[serde(default)]
    pub source_message_ids: Vec<String>,
    /// Categorization tags.
    #[serde(default)]
    pub tags: Vec<String>,
}
