//! The shared audience registry.

use dashmap::DashMap;
use tracing::debug;

use parley_core::messages::{Audience, Message};
use parley_core::participants::Participant;

use crate::visibility::HasAudience;

/// Records which participants were present on each tracked message and
/// answers visibility queries against that record.
///
/// An explicit shared instance — pass it by `Arc` to every collaborator,
/// never hold it as a global. Writes are per-key atomic: a message's whole
/// audience set is inserted in one map operation, so readers never observe a
/// partially-written audience.
#[derive(Debug, Default)]
pub struct AccessTracker {
    /// Message id → full audience at send time.
    audiences: DashMap<String, Audience>,
    /// Every address ever seen, keyed by email.
    participants: DashMap<String, Participant>,
}

impl AccessTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Recording ───────────────────────────────────────────────────────

    /// Record a message's audience and register its addresses.
    ///
    /// Never fails; tracking the same id again replaces its audience.
    pub fn track(&self, message: &Message) {
        let audience = message.audience();
        for email in &audience {
            // Keep an existing display name; an address line alone has none.
            let _ = self
                .participants
                .entry(email.clone())
                .or_insert_with(|| Participant::new(email.clone()));
        }
        debug!(message_id = %message.id, audience_size = audience.len(), "tracked audience");
        let _ = self.audiences.insert(message.id.clone(), audience);
    }

    /// Record a batch of messages.
    pub fn track_batch<'a>(&self, messages: impl IntoIterator<Item = &'a Message>) {
        for message in messages {
            self.track(message);
        }
    }

    /// Register a participant with a display name.
    ///
    /// Addresses discovered via [`AccessTracker::track`] carry no display
    /// name; ingestion can enrich them here. A richer record always wins.
    pub fn register_participant(&self, participant: Participant) {
        match self.participants.entry(participant.email.clone()) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                if occupied.get().display_name.is_none() && participant.display_name.is_some() {
                    let _ = occupied.insert(participant);
                }
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                let _ = vacant.insert(participant);
            }
        }
    }

    /// Forget a tracked message. Returns whether anything was removed.
    pub fn untrack(&self, message_id: &str) -> bool {
        self.audiences.remove(message_id).is_some()
    }

    // ── Visibility queries ──────────────────────────────────────────────

    /// The subset-visibility rule: may `requesting` see content whose
    /// original audience was `source`?
    ///
    /// True iff every requesting participant was in the source audience.
    #[must_use]
    pub fn can_access(source: &Audience, requesting: &[Participant]) -> bool {
        requesting.iter().all(|p| source.contains(&p.email))
    }

    /// Whether a single address was in a tracked message's audience.
    ///
    /// Unknown message ids are unreadable (fail closed).
    #[must_use]
    pub fn has_access(&self, email: &str, message_id: &str) -> bool {
        self.audiences
            .get(message_id)
            .is_some_and(|aud| aud.contains(email))
    }

    /// The recorded audience of a tracked message.
    #[must_use]
    pub fn audience_of(&self, message_id: &str) -> Option<Audience> {
        self.audiences.get(message_id).map(|aud| aud.clone())
    }

    /// Keep only the items whose audience contains *every* current
    /// participant. Input order is preserved.
    #[must_use]
    pub fn filter<T: HasAudience + Clone>(&self, items: &[T], current: &[Participant]) -> Vec<T> {
        items
            .iter()
            .filter(|item| Self::can_access(&item.audience(), current))
            .cloned()
            .collect()
    }

    // ── Registry ────────────────────────────────────────────────────────

    /// Every participant ever seen, sorted by email for determinism.
    #[must_use]
    pub fn all_participants(&self) -> Vec<Participant> {
        let mut out: Vec<Participant> = self
            .participants
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| a.email.cmp(&b.email));
        out
    }

    /// Number of tracked messages.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.audiences.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
