//! Participant identity.
//!
//! A participant is anyone who appears in a conversation's from/to/cc lines.
//! Identity is the exact email string — case-sensitive, no normalization.
//! Two records with the same email but different display names are the same
//! participant.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A conversation participant, identified by email address.
///
/// Equality and hashing consider only [`Participant::email`]; the display
/// name is cosmetic. Emails are compared byte-for-byte — `Alice@x.com` and
/// `alice@x.com` are distinct participants.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Email address — the identity key.
    pub email: String,
    /// Optional human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Participant {
    /// Create a participant with no display name.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
        }
    }

    /// Create a participant with a display name.
    #[must_use]
    pub fn named(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: Some(display_name.into()),
        }
    }

    /// The name to show in rendered output: display name if present,
    /// otherwise the email itself.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{name} <{}>", self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
