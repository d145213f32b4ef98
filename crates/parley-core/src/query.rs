//! Query request/response types and the confidence vocabulary.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::participants::Participant;

/// How well-supported a model answer is.
///
/// Wire format is the exact uppercase word used by the inline
/// `CONFIDENCE:` marker protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    /// Directly supported by the assembled context.
    High,
    /// Partially supported; some inference involved.
    Medium,
    /// Weakly supported; mostly inference.
    Low,
    /// The model could not answer from the available context.
    Unable,
}

impl Confidence {
    /// Parse the exact marker word. Anything else is `None`.
    #[must_use]
    pub fn from_marker(s: &str) -> Option<Self> {
        match s {
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            "UNABLE" => Some(Self::Unable),
            _ => None,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unable => "UNABLE",
        };
        write!(f, "{s}")
    }
}

/// A natural-language question about the conversation corpus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// The question text.
    pub query: String,
    /// Who is asking.
    pub asker: Participant,
    /// Everyone else currently present for the answer.
    #[serde(default)]
    pub context_participants: Vec<Participant>,
    /// Restrict the query to a single thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl QueryRequest {
    /// Reject malformed requests up front.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.query.trim().is_empty() {
            return Err(CoreError::Validation("query text is empty".into()));
        }
        if self.asker.email.trim().is_empty() {
            return Err(CoreError::Validation("asker email is empty".into()));
        }
        Ok(())
    }

    /// The full current participant set: asker plus everyone present.
    ///
    /// Deduplicated by email, asker first.
    #[must_use]
    pub fn all_participants(&self) -> Vec<Participant> {
        let mut out = vec![self.asker.clone()];
        for p in &self.context_participants {
            if !out.contains(p) {
                out.push(p.clone());
            }
        }
        out
    }
}

/// The typed answer to a [`QueryRequest`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// The answer text, with marker lines stripped.
    pub answer: String,
    /// Message ids shown to the model, plus `tool:<name>` entries for every
    /// tool invocation in dispatch order.
    pub sources: Vec<String>,
    /// Whether confidentiality filtering withheld anything from this answer.
    pub privacy_restricted: bool,
    /// Human-readable note naming who lacked access, when restricted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_info: Option<String>,
    /// Confidence marker parsed from the model output, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Free-text skill suggestion when the model judged the query
    /// unanswerable from current capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_skill_name: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_from_marker_closed_set() {
        assert_eq!(Confidence::from_marker("HIGH"), Some(Confidence::High));
        assert_eq!(Confidence::from_marker("UNABLE"), Some(Confidence::Unable));
        assert_eq!(Confidence::from_marker("high"), None);
        assert_eq!(Confidence::from_marker("CERTAIN"), None);
    }

    #[test]
    fn confidence_display_roundtrips_through_marker() {
        for c in [
            Confidence::High,
            Confidence::Medium,
            Confidence::Low,
            Confidence::Unable,
        ] {
            assert_eq!(Confidence::from_marker(&c.to_string()), Some(c));
        }
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut req = QueryRequest {
            query: "who decided?".into(),
            asker: Participant::new("alice@x.com"),
            context_participants: vec![],
            thread_id: None,
        };
        assert!(req.validate().is_ok());
        req.query = "  \n".into();
        assert!(req.validate().is_err());
        req.query = "who decided?".into();
        req.asker = Participant::new("");
        assert!(req.validate().is_err());
    }

    #[test]
    fn all_participants_dedupes_asker() {
        let req = QueryRequest {
            query: "who decided?".into(),
            asker: Participant::new("alice@x.com"),
            context_participants: vec![
                Participant::new("bob@x.com"),
                Participant::new("alice@x.com"),
            ],
            thread_id: None,
        };
        let all = req.all_participants();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].email, "alice@x.com");
    }

    #[test]
    fn response_serde_skips_absent_fields() {
        let resp = QueryResponse {
            answer: "Yes.".into(),
            sources: vec!["m1".into()],
            privacy_restricted: false,
            restricted_info: None,
            confidence: None,
            suggested_skill_name: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("restrictedInfo").is_none());
        assert!(json.get("confidence").is_none());
        assert_eq!(json["privacyRestricted"], false);
    }
}
