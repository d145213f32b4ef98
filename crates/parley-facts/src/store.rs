//! The fact table and its query interface.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use parley_core::acts::{SpeechAct, SpeechActKind};

use crate::errors::StoreError;

/// A stored act plus its insertion sequence number.
///
/// The sequence is the stable tie-break for equal timestamps and survives
/// serialize/restore so ordering is reproducible.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredFact {
    act: SpeechAct,
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    facts: HashMap<String, StoredFact>,
    next_seq: u64,
}

/// Filter for [`FactStore::query`]. Unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct FactQuery {
    /// Restrict to one act kind.
    pub kind: Option<SpeechActKind>,
    /// Restrict to one thread.
    pub thread_id: Option<String>,
    /// Require this email among the act's participants.
    pub participant_email: Option<String>,
    /// Only acts strictly after this instant.
    pub after: Option<DateTime<Utc>>,
    /// Only acts strictly before this instant.
    pub before: Option<DateTime<Utc>>,
    /// Minimum extractor confidence (inclusive).
    pub min_confidence: Option<f64>,
}

impl FactQuery {
    /// Match everything.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to one kind.
    #[must_use]
    pub fn kind(mut self, kind: SpeechActKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict to one thread.
    #[must_use]
    pub fn in_thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// Require an email among the act's participants.
    #[must_use]
    pub fn involving(mut self, email: impl Into<String>) -> Self {
        self.participant_email = Some(email.into());
        self
    }

    /// Only acts strictly after `instant`.
    #[must_use]
    pub fn after(mut self, instant: DateTime<Utc>) -> Self {
        self.after = Some(instant);
        self
    }

    /// Only acts strictly before `instant`.
    #[must_use]
    pub fn before(mut self, instant: DateTime<Utc>) -> Self {
        self.before = Some(instant);
        self
    }

    /// Minimum confidence, inclusive.
    #[must_use]
    pub fn min_confidence(mut self, min: f64) -> Self {
        self.min_confidence = Some(min);
        self
    }

    fn matches(&self, act: &SpeechAct) -> bool {
        if self.kind.is_some_and(|k| k != act.kind) {
            return false;
        }
        if self.thread_id.as_deref().is_some_and(|t| t != act.thread_id) {
            return false;
        }
        if self
            .participant_email
            .as_deref()
            .is_some_and(|e| !act.participants.iter().any(|p| p == e))
        {
            return false;
        }
        if self.after.is_some_and(|t| act.timestamp <= t) {
            return false;
        }
        if self.before.is_some_and(|t| act.timestamp >= t) {
            return false;
        }
        if self.min_confidence.is_some_and(|m| act.confidence < m) {
            return false;
        }
        true
    }
}

/// Upsert store for speech acts with ordered queries.
///
/// Shared via `Arc` like the access tracker; readers run
/// concurrently and writers replace whole records under the write lock,
/// never field-by-field.
#[derive(Debug, Default)]
pub struct FactStore {
    inner: RwLock<Inner>,
}

impl FactStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ────────────────────────────────────────────────────────

    /// Insert or replace an act by id (last write wins).
    pub fn add(&self, act: SpeechAct) {
        let mut inner = self.inner.write();
        let seq = match inner.facts.get(&act.id) {
            // A replaced act keeps its original insertion slot.
            Some(existing) => existing.seq,
            None => {
                let seq = inner.next_seq;
                inner.next_seq += 1;
                seq
            }
        };
        debug!(act_id = %act.id, kind = %act.kind, seq, "fact upserted");
        let _ = inner.facts.insert(act.id.clone(), StoredFact { act, seq });
    }

    /// Insert or replace a batch of acts.
    pub fn add_many(&self, acts: impl IntoIterator<Item = SpeechAct>) {
        for act in acts {
            self.add(act);
        }
    }

    /// Remove everything.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.facts.clear();
        inner.next_seq = 0;
    }

    // ── Lookup ──────────────────────────────────────────────────────────

    /// Fetch one act by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<SpeechAct> {
        self.inner.read().facts.get(id).map(|f| f.act.clone())
    }

    /// Number of stored acts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.read().facts.len()
    }

    /// Acts matching `query`, newest timestamp first, earlier insertion
    /// first on timestamp ties.
    #[must_use]
    pub fn query(&self, query: &FactQuery) -> Vec<SpeechAct> {
        let inner = self.inner.read();
        let mut hits: Vec<&StoredFact> = inner
            .facts
            .values()
            .filter(|f| query.matches(&f.act))
            .collect();
        hits.sort_by(|a, b| {
            b.act
                .timestamp
                .cmp(&a.act.timestamp)
                .then(a.seq.cmp(&b.seq))
        });
        hits.into_iter().map(|f| f.act.clone()).collect()
    }

    /// All acts of one kind, in query order.
    #[must_use]
    pub fn get_by_kind(&self, kind: SpeechActKind) -> Vec<SpeechAct> {
        self.query(&FactQuery::any().kind(kind))
    }

    /// All acts in one thread, in query order.
    #[must_use]
    pub fn get_by_thread(&self, thread_id: &str) -> Vec<SpeechAct> {
        self.query(&FactQuery::any().in_thread(thread_id))
    }

    /// Acts that *mention* the given participant.
    ///
    /// This is a membership test (`email ∈ participants`) — intentionally
    /// weaker than the subset rule used for query-time filtering. The two
    /// semantics coexist by design; do not merge them.
    #[must_use]
    pub fn get_visible_to(&self, email: &str) -> Vec<SpeechAct> {
        self.query(&FactQuery::any().involving(email))
    }

    /// Per-kind tallies of the stored set.
    #[must_use]
    pub fn counts_by_kind(&self) -> Vec<(SpeechActKind, usize)> {
        let inner = self.inner.read();
        SpeechActKind::ALL
            .iter()
            .map(|&kind| {
                let n = inner.facts.values().filter(|f| f.act.kind == kind).count();
                (kind, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    // ── Snapshot ────────────────────────────────────────────────────────

    /// Serialize the full stored set, including insertion order.
    pub fn serialize(&self) -> Result<String, StoreError> {
        let inner = self.inner.read();
        let mut facts: Vec<&StoredFact> = inner.facts.values().collect();
        facts.sort_by_key(|f| f.seq);
        Ok(serde_json::to_string(&facts)?)
    }

    /// Replace the stored set from a [`FactStore::serialize`] snapshot.
    pub fn restore(&self, snapshot: &str) -> Result<(), StoreError> {
        let facts: Vec<StoredFact> = serde_json::from_str(snapshot)?;
        let mut inner = self.inner.write();
        inner.next_seq = facts.iter().map(|f| f.seq + 1).max().unwrap_or(0);
        inner.facts = facts.into_iter().map(|f| (f.act.id.clone(), f)).collect();
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
