//! Confidentiality disclosure: the explanatory side of filtering.
//!
//! Filtering itself happens in parley-access before any model call. This
//! module only explains the outcome to the caller: whether anything was
//! withheld, and which of the people currently present caused it. Nothing
//! here feeds back into what the model sees.

use parley_access::AccessTracker;
use parley_core::messages::Message;
use parley_core::participants::Participant;

/// What confidentiality filtering did to this query's inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disclosure {
    /// Whether any of the three collections was narrowed.
    pub privacy_restricted: bool,
    /// Human-readable note naming who lacked access, when restricted.
    pub restricted_info: Option<String>,
}

/// Counts of each collection before and after filtering.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterCounts {
    /// Messages in scope before access filtering.
    pub messages_before: usize,
    /// Messages that survived access filtering.
    pub messages_after: usize,
    /// Facts in scope before access filtering.
    pub facts_before: usize,
    /// Facts that survived access filtering.
    pub facts_after: usize,
    /// Knowledge entries before access filtering.
    pub knowledge_before: usize,
    /// Knowledge entries that survived access filtering.
    pub knowledge_after: usize,
}

impl FilterCounts {
    fn narrowed(&self) -> bool {
        self.messages_after < self.messages_before
            || self.facts_after < self.facts_before
            || self.knowledge_after < self.knowledge_before
    }
}

/// Compute the disclosure for one query.
///
/// When anything was withheld, each current participant is tested against
/// every original (unfiltered) message; those lacking access to at least
/// one are named in the note. The note explains, it never re-filters.
#[must_use]
pub fn compute(
    tracker: &AccessTracker,
    counts: &FilterCounts,
    original_messages: &[Message],
    current: &[Participant],
) -> Disclosure {
    if !counts.narrowed() {
        return Disclosure {
            privacy_restricted: false,
            restricted_info: None,
        };
    }

    let mut lacking: Vec<&str> = current
        .iter()
        .filter(|p| {
            original_messages
                .iter()
                .any(|m| !tracker.has_access(&p.email, &m.id))
        })
        .map(|p| p.email.as_str())
        .collect();
    lacking.sort_unstable();

    let restricted_info = if lacking.is_empty() {
        Some("Some information was withheld from this answer.".to_owned())
    } else {
        Some(format!(
            "Some information was withheld because {} lack{} access to parts of this conversation.",
            lacking.join(", "),
            if lacking.len() == 1 { "s" } else { "" },
        ))
    };

    Disclosure {
        privacy_restricted: true,
        restricted_info,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
