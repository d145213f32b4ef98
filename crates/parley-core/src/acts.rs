//! Extracted speech acts.
//!
//! Speech acts are structured facts produced by an upstream extraction
//! collaborator. This core treats them as opaque records: it stores, filters,
//! and surfaces them, but never re-derives them from text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of speech-act categories.
///
/// Exhaustively matched everywhere — a new category is a compile error at
/// every match site, never a silently mishandled string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeechActKind {
    /// Someone asked someone to do something.
    Request,
    /// An open question addressed to the thread.
    Question,
    /// A stated promise to do something.
    Commitment,
    /// A decision the thread settled on.
    Decision,
    /// Receipt acknowledged without taking a position.
    Acknowledgment,
    /// Explicit agreement with a prior act.
    Agreement,
    /// Explicit disagreement with a prior act.
    Objection,
    /// A statement of fact with no action attached.
    Inform,
}

impl SpeechActKind {
    /// All kinds, in grouping order used by context rendering.
    pub const ALL: [Self; 8] = [
        Self::Decision,
        Self::Commitment,
        Self::Request,
        Self::Question,
        Self::Agreement,
        Self::Objection,
        Self::Acknowledgment,
        Self::Inform,
    ];
}

impl std::fmt::Display for SpeechActKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Request => "REQUEST",
            Self::Question => "QUESTION",
            Self::Commitment => "COMMITMENT",
            Self::Decision => "DECISION",
            Self::Acknowledgment => "ACKNOWLEDGMENT",
            Self::Agreement => "AGREEMENT",
            Self::Objection => "OBJECTION",
            Self::Inform => "INFORM",
        };
        write!(f, "{s}")
    }
}

/// A single extracted speech act.
///
/// `participants` is the audience of the act at extraction time, which equals
/// its source message's audience unless the extractor says otherwise.
/// `confidence` is the extractor's score in `[0, 1]`; out-of-range values are
/// a producer bug, not something this core defends against at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechAct {
    /// Unique act id.
    pub id: String,
    /// Act category.
    pub kind: SpeechActKind,
    /// Extracted content text.
    pub content: String,
    /// Email of the participant who performed the act.
    pub actor: String,
    /// Emails entitled to see this act.
    pub participants: Vec<String>,
    /// Extractor confidence in `[0, 1]`.
    pub confidence: f64,
    /// Id of the message the act was extracted from.
    pub source_message_id: String,
    /// Thread the source message belongs to.
    pub thread_id: String,
    /// Timestamp of the source message.
    pub timestamp: DateTime<Utc>,
    /// Extractor-specific extras.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn act(kind: SpeechActKind) -> SpeechAct {
        SpeechAct {
            id: "a1".into(),
            kind,
            content: "Ship the release by Friday".into(),
            actor: "alice@x.com".into(),
            participants: vec!["alice@x.com".into(), "bob@x.com".into()],
            confidence: 0.9,
            source_message_id: "m1".into(),
            thread_id: "t1".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
            metadata: None,
        }
    }

    #[test]
    fn kind_wire_format_is_screaming_snake() {
        let json = serde_json::to_value(SpeechActKind::Acknowledgment).unwrap();
        assert_eq!(json, "ACKNOWLEDGMENT");
        let back: SpeechActKind = serde_json::from_value("DECISION".into()).unwrap();
        assert_eq!(back, SpeechActKind::Decision);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<SpeechActKind, _> = serde_json::from_value("SPECULATION".into());
        assert!(result.is_err());
    }

    #[test]
    fn display_matches_wire_format() {
        for kind in SpeechActKind::ALL {
            let wire = serde_json::to_value(kind).unwrap();
            assert_eq!(wire, kind.to_string());
        }
    }

    #[test]
    fn act_serde_roundtrip() {
        let a = act(SpeechActKind::Commitment);
        let json = serde_json::to_string(&a).unwrap();
        let back: SpeechAct = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn all_covers_every_kind() {
        // Grouping order puts decisions and commitments first.
        assert_eq!(SpeechActKind::ALL[0], SpeechActKind::Decision);
        assert_eq!(SpeechActKind::ALL[1], SpeechActKind::Commitment);
        assert_eq!(SpeechActKind::ALL.len(), 8);
    }
}
