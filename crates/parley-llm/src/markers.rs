//! The inline answer-marker protocol.
//!
//! The model ends its free-form answer with up to two trailing marker lines:
//!
//! ```text
//! ...answer text...
//! CONFIDENCE: HIGH
//! SUGGESTED_SKILL: calendar-sync
//! ```
//!
//! `CONFIDENCE:` carries one of the closed words `HIGH|MEDIUM|LOW|UNABLE`;
//! `SUGGESTED_SKILL:` carries free text, used when the model judged the
//! query unanswerable from current capabilities. Both lines are stripped
//! from the user-visible answer. Markers may appear in either order, but
//! only in the trailing lines — the same literal in the middle of an answer
//! is content, not a marker.
//!
//! This is a wire format shared with the model service; the exact prefixes
//! and the closed confidence vocabulary must not drift.

use parley_core::query::Confidence;

const CONFIDENCE_PREFIX: &str = "CONFIDENCE:";
const SKILL_PREFIX: &str = "SUGGESTED_SKILL:";

/// A model answer with trailing markers parsed out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedAnswer {
    /// The answer with marker lines and trailing whitespace removed.
    pub answer: String,
    /// Parsed `CONFIDENCE:` marker, if present and well-formed.
    pub confidence: Option<Confidence>,
    /// Parsed `SUGGESTED_SKILL:` text, if present and non-empty.
    pub suggested_skill: Option<String>,
}

/// Parse and strip the trailing marker lines from raw model output.
///
/// Scans backwards from the last line: blank lines are skipped, marker
/// lines are consumed (at most one of each), and the scan stops at the
/// first ordinary line. A `CONFIDENCE:` line with a word outside the closed
/// set is not a marker and terminates the scan as ordinary content.
#[must_use]
pub fn parse_markers(raw: &str) -> ParsedAnswer {
    let lines: Vec<&str> = raw.lines().collect();
    let mut confidence = None;
    let mut suggested_skill: Option<String> = None;
    let mut cut = lines.len();

    for (idx, line) in lines.iter().enumerate().rev() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix(CONFIDENCE_PREFIX) {
            if confidence.is_none() {
                if let Some(parsed) = Confidence::from_marker(rest.trim()) {
                    confidence = Some(parsed);
                    cut = idx;
                    continue;
                }
            }
            break;
        }
        if let Some(rest) = trimmed.strip_prefix(SKILL_PREFIX) {
            let text = rest.trim();
            if suggested_skill.is_none() && !text.is_empty() {
                suggested_skill = Some(text.to_owned());
                cut = idx;
                continue;
            }
            break;
        }
        break;
    }

    let answer = lines[..cut].join("\n").trim_end().to_owned();
    ParsedAnswer {
        answer,
        confidence,
        suggested_skill,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_answer_untouched() {
        let parsed = parse_markers("The decision was made on Tuesday.");
        assert_eq!(parsed.answer, "The decision was made on Tuesday.");
        assert!(parsed.confidence.is_none());
        assert!(parsed.suggested_skill.is_none());
    }

    #[test]
    fn confidence_marker_parsed_and_stripped() {
        let parsed = parse_markers("Bob agreed to ship Friday.\nCONFIDENCE: HIGH");
        assert_eq!(parsed.answer, "Bob agreed to ship Friday.");
        assert_eq!(parsed.confidence, Some(Confidence::High));
    }

    #[test]
    fn skill_marker_parsed_and_stripped() {
        let parsed = parse_markers("I can't check calendars.\nSUGGESTED_SKILL: calendar-sync");
        assert_eq!(parsed.answer, "I can't check calendars.");
        assert_eq!(parsed.suggested_skill.as_deref(), Some("calendar-sync"));
    }

    #[test]
    fn both_markers_either_order() {
        let a = parse_markers("Answer.\nCONFIDENCE: LOW\nSUGGESTED_SKILL: search");
        assert_eq!(a.answer, "Answer.");
        assert_eq!(a.confidence, Some(Confidence::Low));
        assert_eq!(a.suggested_skill.as_deref(), Some("search"));

        let b = parse_markers("Answer.\nSUGGESTED_SKILL: search\nCONFIDENCE: UNABLE");
        assert_eq!(b.answer, "Answer.");
        assert_eq!(b.confidence, Some(Confidence::Unable));
        assert_eq!(b.suggested_skill.as_deref(), Some("search"));
    }

    #[test]
    fn blank_lines_before_markers_removed() {
        let parsed = parse_markers("Answer.\n\nCONFIDENCE: MEDIUM\n");
        assert_eq!(parsed.answer, "Answer.");
        assert_eq!(parsed.confidence, Some(Confidence::Medium));
    }

    #[test]
    fn marker_mid_answer_is_content() {
        let raw = "They wrote CONFIDENCE: HIGH in the report.\nMore text.";
        let parsed = parse_markers(raw);
        assert_eq!(parsed.answer, raw);
        assert!(parsed.confidence.is_none());
    }

    #[test]
    fn unknown_confidence_word_is_content() {
        let raw = "Answer.\nCONFIDENCE: ABSOLUTE";
        let parsed = parse_markers(raw);
        assert_eq!(parsed.answer, raw);
        assert!(parsed.confidence.is_none());
    }

    #[test]
    fn lowercase_prefix_is_content() {
        let raw = "Answer.\nconfidence: HIGH";
        let parsed = parse_markers(raw);
        assert_eq!(parsed.answer, raw);
        assert!(parsed.confidence.is_none());
    }

    #[test]
    fn empty_skill_text_is_content() {
        let raw = "Answer.\nSUGGESTED_SKILL:";
        let parsed = parse_markers(raw);
        assert_eq!(parsed.answer, raw);
        assert!(parsed.suggested_skill.is_none());
    }

    #[test]
    fn duplicate_confidence_stops_at_second() {
        // Only the trailing marker counts; a second one above it is content.
        let parsed = parse_markers("Answer.\nCONFIDENCE: LOW\nCONFIDENCE: HIGH");
        assert_eq!(parsed.confidence, Some(Confidence::High));
        assert_eq!(parsed.answer, "Answer.\nCONFIDENCE: LOW");
    }

    #[test]
    fn marker_only_output_yields_empty_answer() {
        let parsed = parse_markers("CONFIDENCE: UNABLE");
        assert_eq!(parsed.answer, "");
        assert_eq!(parsed.confidence, Some(Confidence::Unable));
    }

    #[test]
    fn whitespace_around_marker_tolerated() {
        let parsed = parse_markers("Answer.\n  CONFIDENCE:   HIGH  ");
        assert_eq!(parsed.confidence, Some(Confidence::High));
        assert_eq!(parsed.answer, "Answer.");
    }
}
