//! The audience seam shared by everything that can be filtered.

use parley_core::acts::SpeechAct;
use parley_core::knowledge::KnowledgeEntry;
use parley_core::messages::{Audience, Message};

/// Anything with a set of participants entitled to see it.
///
/// Implemented by [`Message`] (audience derived from its address lines) and
/// by [`SpeechAct`] / [`KnowledgeEntry`] (their own `participants` field,
/// recorded at extraction time).
pub trait HasAudience {
    /// The emails entitled to see this item.
    fn audience(&self) -> Audience;
}

impl HasAudience for Message {
    fn audience(&self) -> Audience {
        Message::audience(self)
    }
}

impl HasAudience for SpeechAct {
    fn audience(&self) -> Audience {
        self.participants.iter().cloned().collect()
    }
}

impl HasAudience for KnowledgeEntry {
    fn audience(&self) -> Audience {
        self.participants.iter().cloned().collect()
    }
}
