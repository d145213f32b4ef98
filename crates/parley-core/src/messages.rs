//! Immutable conversation messages and their audiences.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The set of email addresses entitled to see a message.
///
/// Ordered so that rendering and serialization are deterministic.
pub type Audience = BTreeSet<String>;

/// An immutable multi-party message record.
///
/// Messages are created once by the ingestion collaborator and never edited
/// in place; a re-ingested id replaces the whole record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message id.
    pub id: String,
    /// Conversation thread this message belongs to.
    pub thread_id: String,
    /// Sender email.
    pub from: String,
    /// Direct recipient emails.
    pub to: Vec<String>,
    /// Carbon-copy recipient emails.
    #[serde(default)]
    pub cc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Message body text.
    pub body: String,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
    /// Id of the message this replies to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,
}

impl Message {
    /// The audience of this message: `{from} ∪ to ∪ cc`.
    ///
    /// Always contains the sender, so an audience is never empty.
    #[must_use]
    pub fn audience(&self) -> Audience {
        let mut set = Audience::new();
        let _ = set.insert(self.from.clone());
        set.extend(self.to.iter().cloned());
        set.extend(self.cc.iter().cloned());
        set
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
