//! Context assembly, token estimation, trimming, and rendering.

use tracing::{debug, warn};

use parley_core::acts::{SpeechAct, SpeechActKind};
use parley_core::knowledge::KnowledgeEntry;
use parley_core::messages::Message;

use crate::constants::{CHARS_PER_TOKEN, DEFAULT_BATCH_SIZE, DEFAULT_RECENT_WINDOW};
use crate::context::{HistorySummary, MemoryContext};
use crate::summarizer::Summarizer;

/// Tuning knobs for context assembly.
#[derive(Clone, Copy, Debug)]
pub struct MemoryConfig {
    /// Newest messages kept verbatim.
    pub recent_window: usize,
    /// Older messages condensed per digest.
    pub batch_size: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            recent_window: DEFAULT_RECENT_WINDOW,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Builds bounded [`MemoryContext`] bundles from access-filtered inputs.
///
/// The manager never filters for confidentiality itself — callers hand it
/// already-filtered items (see parley-access).
#[derive(Clone, Debug, Default)]
pub struct MemoryManager {
    config: MemoryConfig,
}

impl MemoryManager {
    /// Create a manager with the given configuration.
    #[must_use]
    pub fn new(config: MemoryConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    // ── Assembly ────────────────────────────────────────────────────────

    /// Direct mode: no compression. The newest `recent_window` messages are
    /// kept verbatim and everything older is omitted.
    #[must_use]
    pub fn build_direct(
        &self,
        messages: &[Message],
        acts: Vec<SpeechAct>,
        knowledge: Vec<KnowledgeEntry>,
    ) -> MemoryContext {
        let ordered = chronological(messages);
        let split = ordered.len().saturating_sub(self.config.recent_window);
        let mut context = MemoryContext {
            recent_messages: ordered[split..].to_vec(),
            summaries: Vec::new(),
            relevant_speech_acts: acts,
            relevant_knowledge: knowledge,
            estimated_tokens: 0,
            degraded: false,
        };
        context.estimated_tokens = estimate_tokens(&context);
        context
    }

    /// Hybrid mode: newest `recent_window` messages verbatim, older history
    /// condensed batch-by-batch through `summarizer`.
    ///
    /// A failed summarization call does not abort assembly and does not
    /// drop the batch: its raw text is inlined as a `verbatim_fallback`
    /// digest and the context is marked degraded. Larger prompt, nothing
    /// lost.
    pub async fn build_context(
        &self,
        messages: &[Message],
        acts: Vec<SpeechAct>,
        knowledge: Vec<KnowledgeEntry>,
        summarizer: &dyn Summarizer,
    ) -> MemoryContext {
        let ordered = chronological(messages);
        let split = ordered.len().saturating_sub(self.config.recent_window);
        let (older, recent) = ordered.split_at(split);

        let mut summaries = Vec::new();
        let mut degraded = false;
        for batch in older.chunks(self.config.batch_size.max(1)) {
            let summary = match summarizer.summarize(batch).await {
                Ok(text) => HistorySummary {
                    first_timestamp: batch[0].timestamp,
                    last_timestamp: batch[batch.len() - 1].timestamp,
                    message_count: batch.len(),
                    text,
                    verbatim_fallback: false,
                },
                Err(err) => {
                    warn!(error = %err, batch_len = batch.len(), "summarization failed, inlining batch verbatim");
                    degraded = true;
                    HistorySummary {
                        first_timestamp: batch[0].timestamp,
                        last_timestamp: batch[batch.len() - 1].timestamp,
                        message_count: batch.len(),
                        text: render_verbatim_batch(batch),
                        verbatim_fallback: true,
                    }
                }
            };
            summaries.push(summary);
        }

        let mut context = MemoryContext {
            recent_messages: recent.to_vec(),
            summaries,
            relevant_speech_acts: acts,
            relevant_knowledge: knowledge,
            estimated_tokens: 0,
            degraded,
        };
        context.estimated_tokens = estimate_tokens(&context);
        debug!(
            recent = context.recent_messages.len(),
            summaries = context.summaries.len(),
            estimated_tokens = context.estimated_tokens,
            degraded,
            "context assembled"
        );
        context
    }

    // ── Trimming ────────────────────────────────────────────────────────

    /// Shrink `context` until its estimate fits `budget` tokens.
    ///
    /// Drops the oldest summaries first, then the oldest recent messages.
    /// The single newest message always survives, so a context is never
    /// trimmed to nothing while any message exists.
    pub fn trim_context(context: &mut MemoryContext, budget: u64) {
        context.estimated_tokens = estimate_tokens(context);
        while context.estimated_tokens > budget {
            if !context.summaries.is_empty() {
                let _ = context.summaries.remove(0);
            } else if context.recent_messages.len() > 1 {
                let _ = context.recent_messages.remove(0);
            } else {
                break;
            }
            context.estimated_tokens = estimate_tokens(context);
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Render a context into prompt text.
    ///
    /// Deterministic section order: participants, summarized history,
    /// verbatim recent messages, then speech acts grouped as decisions,
    /// commitments, open requests, questions, and finally background
    /// knowledge. Empty sections are omitted.
    #[must_use]
    pub fn format_context(context: &MemoryContext) -> String {
        let mut out = String::new();

        let mut participants: Vec<String> = context
            .recent_messages
            .iter()
            .flat_map(Message::audience)
            .collect();
        participants.sort();
        participants.dedup();
        if !participants.is_empty() {
            out.push_str("## Participants\n");
            for email in &participants {
                out.push_str(&format!("- {email}\n"));
            }
            out.push('\n');
        }

        if !context.summaries.is_empty() {
            out.push_str("## Earlier conversation (summarized)\n");
            for summary in &context.summaries {
                out.push_str(&format!(
                    "[{} → {}, {} messages] {}\n",
                    summary.first_timestamp.format("%Y-%m-%d"),
                    summary.last_timestamp.format("%Y-%m-%d"),
                    summary.message_count,
                    summary.text
                ));
            }
            out.push('\n');
        }

        if !context.recent_messages.is_empty() {
            out.push_str("## Recent messages\n");
            for message in &context.recent_messages {
                out.push_str(&format!(
                    "From: {} | {} | {}\n{}\n\n",
                    message.from,
                    message.timestamp.to_rfc3339(),
                    message.subject,
                    message.body
                ));
            }
        }

        let groups: [(&str, SpeechActKind); 4] = [
            ("## Decisions", SpeechActKind::Decision),
            ("## Commitments", SpeechActKind::Commitment),
            ("## Open requests", SpeechActKind::Request),
            ("## Questions", SpeechActKind::Question),
        ];
        for (header, kind) in groups {
            let acts: Vec<&SpeechAct> = context
                .relevant_speech_acts
                .iter()
                .filter(|a| a.kind == kind)
                .collect();
            if acts.is_empty() {
                continue;
            }
            out.push_str(header);
            out.push('\n');
            for act in acts {
                out.push_str(&format!("- [{}] {}\n", act.actor, act.content));
            }
            out.push('\n');
        }

        if !context.relevant_knowledge.is_empty() {
            out.push_str("## Background knowledge\n");
            for entry in &context.relevant_knowledge {
                out.push_str(&format!("- {}: {}\n", entry.title, entry.content));
            }
        }

        out.trim_end().to_owned()
    }
}

/// Sort messages chronologically (stable, so equal timestamps keep input
/// order).
fn chronological(messages: &[Message]) -> Vec<Message> {
    let mut ordered = messages.to_vec();
    ordered.sort_by_key(|m| m.timestamp);
    ordered
}

/// Raw rendering of a batch whose summarization failed.
fn render_verbatim_batch(batch: &[Message]) -> String {
    let mut out = String::new();
    for message in batch {
        out.push_str(&format!(
            "From {} on {} ({}): {}\n",
            message.from,
            message.timestamp.format("%Y-%m-%d"),
            message.subject,
            message.body
        ));
    }
    out.trim_end().to_owned()
}

/// The token estimation heuristic: total characters of every textual field,
/// divided by [`CHARS_PER_TOKEN`] with ceiling division.
///
/// Counted fields: each recent message's `from`, `subject`, and `body`;
/// each summary's text; each act's content; each knowledge entry's title
/// and content. Not a tokenizer — deterministic and cheap is the contract.
#[must_use]
pub fn estimate_tokens(context: &MemoryContext) -> u64 {
    let mut chars: u64 = 0;
    for message in &context.recent_messages {
        chars += (message.from.len() + message.subject.len() + message.body.len()) as u64;
    }
    for summary in &context.summaries {
        chars += summary.text.len() as u64;
    }
    for act in &context.relevant_speech_acts {
        chars += act.content.len() as u64;
    }
    for entry in &context.relevant_knowledge {
        chars += (entry.title.len() + entry.content.len()) as u64;
    }
    chars.div_ceil(CHARS_PER_TOKEN)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;

    use crate::summarizer::SummarizeError;

    fn msg(i: usize) -> Message {
        Message {
            id: format!("m{i}"),
            thread_id: "t1".into(),
            from: "alice@x.com".into(),
            to: vec!["bob@x.com".into()],
            cc: vec![],
            subject: format!("Update {i}"),
            body: format!("Body of message {i}."),
            timestamp: Utc
                .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
                .unwrap()
                .checked_add_signed(chrono::Duration::hours(i as i64))
                .unwrap(),
            in_reply_to: None,
        }
    }

    fn messages(n: usize) -> Vec<Message> {
        (0..n).map(msg).collect()
    }

    /// Summarizer that always returns a fixed digest and counts calls.
    struct FixedSummarizer {
        calls: Mutex<usize>,
    }

    impl FixedSummarizer {
        fn new() -> Self {
            Self { calls: Mutex::new(0) }
        }
    }

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _batch: &[Message]) -> Result<String, SummarizeError> {
            *self.calls.lock() += 1;
            Ok("Digest: decision to ship Friday; bob committed to tests.".into())
        }
    }

    /// Summarizer that always fails.
    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _batch: &[Message]) -> Result<String, SummarizeError> {
            Err(SummarizeError::EmptyDigest("unavailable".into()))
        }
    }

    fn manager() -> MemoryManager {
        MemoryManager::new(MemoryConfig {
            recent_window: 10,
            batch_size: 8,
        })
    }

    // ── direct mode ──────────────────────────────────────────────────────

    #[test]
    fn direct_mode_keeps_newest_window() {
        let ctx = manager().build_direct(&messages(25), Vec::new(), Vec::new());
        assert_eq!(ctx.recent_messages.len(), 10);
        assert!(ctx.summaries.is_empty());
        // Newest last, oldest of the window first.
        assert_eq!(ctx.recent_messages[0].id, "m15");
        assert_eq!(ctx.recent_messages[9].id, "m24");
        assert!(ctx.estimated_tokens > 0);
    }

    #[test]
    fn direct_mode_small_corpus_keeps_everything() {
        let ctx = manager().build_direct(&messages(3), Vec::new(), Vec::new());
        assert_eq!(ctx.recent_messages.len(), 3);
    }

    // ── hybrid mode ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn hybrid_mode_splits_window_and_batches() {
        // 25 messages, window 10 → 10 verbatim + 15 older in batches of 8
        // → 2 summaries.
        let summarizer = FixedSummarizer::new();
        let ctx = manager()
            .build_context(&messages(25), Vec::new(), Vec::new(), &summarizer)
            .await;

        assert_eq!(ctx.recent_messages.len(), 10);
        assert_eq!(ctx.summaries.len(), 2);
        assert_eq!(*summarizer.calls.lock(), 2);
        assert!(!ctx.degraded);

        // Batch spans: 8 then 7 messages, chronological.
        assert_eq!(ctx.summaries[0].message_count, 8);
        assert_eq!(ctx.summaries[1].message_count, 7);
        assert!(ctx.summaries[0].first_timestamp < ctx.summaries[1].first_timestamp);
    }

    #[tokio::test]
    async fn hybrid_mode_nothing_older_means_no_summaries() {
        let summarizer = FixedSummarizer::new();
        let ctx = manager()
            .build_context(&messages(5), Vec::new(), Vec::new(), &summarizer)
            .await;
        assert_eq!(ctx.recent_messages.len(), 5);
        assert!(ctx.summaries.is_empty());
        assert_eq!(*summarizer.calls.lock(), 0);
    }

    #[tokio::test]
    async fn summarizer_failure_degrades_to_verbatim() {
        let ctx = manager()
            .build_context(&messages(25), Vec::new(), Vec::new(), &FailingSummarizer)
            .await;

        assert!(ctx.degraded);
        assert_eq!(ctx.summaries.len(), 2);
        for summary in &ctx.summaries {
            assert!(summary.verbatim_fallback);
        }
        // The raw batch text is carried, not dropped.
        assert!(ctx.summaries[0].text.contains("Body of message 0."));
        assert!(ctx.summaries[1].text.contains("Body of message 14."));
    }

    #[tokio::test]
    async fn unsorted_input_is_ordered_by_timestamp() {
        let mut shuffled = messages(12);
        shuffled.reverse();
        let ctx = manager()
            .build_context(&shuffled, Vec::new(), Vec::new(), &FixedSummarizer::new())
            .await;
        assert_eq!(ctx.recent_messages[9].id, "m11");
        assert_eq!(ctx.summaries[0].message_count, 2);
    }

    // ── estimation ───────────────────────────────────────────────────────

    #[test]
    fn estimate_is_chars_over_four_ceiling() {
        let mut ctx = MemoryContext::default();
        ctx.recent_messages.push(msg(0));
        let m = &ctx.recent_messages[0];
        let chars = (m.from.len() + m.subject.len() + m.body.len()) as u64;
        assert_eq!(estimate_tokens(&ctx), chars.div_ceil(4));
    }

    #[test]
    fn estimate_counts_all_sections() {
        let empty = estimate_tokens(&MemoryContext::default());
        assert_eq!(empty, 0);

        let mut ctx = MemoryContext::default();
        ctx.summaries.push(HistorySummary {
            first_timestamp: msg(0).timestamp,
            last_timestamp: msg(0).timestamp,
            message_count: 1,
            text: "x".repeat(40),
            verbatim_fallback: false,
        });
        assert_eq!(estimate_tokens(&ctx), 10);
    }

    // ── trimming ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn trim_drops_summaries_before_messages() {
        let mut ctx = manager()
            .build_context(&messages(25), Vec::new(), Vec::new(), &FixedSummarizer::new())
            .await;
        let before = ctx.estimated_tokens;

        // A budget that forces out the summaries but not the window.
        let recent_only = {
            let mut only = ctx.clone();
            only.summaries.clear();
            estimate_tokens(&only)
        };
        MemoryManager::trim_context(&mut ctx, recent_only);

        assert!(ctx.estimated_tokens < before);
        assert!(ctx.summaries.is_empty());
        assert_eq!(ctx.recent_messages.len(), 10);
    }

    #[tokio::test]
    async fn trim_never_drops_newest_message() {
        let mut ctx = manager()
            .build_context(&messages(25), Vec::new(), Vec::new(), &FixedSummarizer::new())
            .await;
        MemoryManager::trim_context(&mut ctx, 1);

        assert_eq!(ctx.recent_messages.len(), 1);
        assert_eq!(ctx.recent_messages[0].id, "m24");
        assert!(ctx.summaries.is_empty());
    }

    #[test]
    fn trim_under_budget_is_a_no_op() {
        let mut ctx = manager().build_direct(&messages(5), Vec::new(), Vec::new());
        let before = ctx.clone();
        MemoryManager::trim_context(&mut ctx, u64::MAX);
        assert_eq!(ctx, before);
    }

    #[tokio::test]
    async fn trim_strictly_reduces_estimate_when_over() {
        let mut ctx = manager()
            .build_context(&messages(25), Vec::new(), Vec::new(), &FixedSummarizer::new())
            .await;
        let before = ctx.estimated_tokens;
        MemoryManager::trim_context(&mut ctx, before / 2);
        assert!(ctx.estimated_tokens < before);
    }

    // ── rendering ────────────────────────────────────────────────────────

    fn act(kind: SpeechActKind, content: &str) -> SpeechAct {
        SpeechAct {
            id: format!("a-{content}"),
            kind,
            content: content.into(),
            actor: "alice@x.com".into(),
            participants: vec!["alice@x.com".into()],
            confidence: 0.9,
            source_message_id: "m0".into(),
            thread_id: "t1".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn format_renders_sections_in_order() {
        let acts = vec![
            act(SpeechActKind::Question, "When do we ship?"),
            act(SpeechActKind::Decision, "Ship Friday"),
            act(SpeechActKind::Commitment, "Bob writes tests"),
            act(SpeechActKind::Request, "Review the PR"),
        ];
        let knowledge = vec![KnowledgeEntry {
            id: "k1".into(),
            category: "process".into(),
            title: "Cadence".into(),
            content: "Biweekly releases".into(),
            participants: vec!["alice@x.com".into()],
            source_message_ids: vec![],
            tags: vec![],
        }];
        let ctx = manager()
            .build_context(&messages(15), acts, knowledge, &FixedSummarizer::new())
            .await;
        let text = MemoryManager::format_context(&ctx);

        let order = [
            "## Participants",
            "## Earlier conversation (summarized)",
            "## Recent messages",
            "## Decisions",
            "## Commitments",
            "## Open requests",
            "## Questions",
            "## Background knowledge",
        ];
        let mut last = 0;
        for section in order {
            let pos = text.find(section).unwrap_or_else(|| panic!("missing {section}"));
            assert!(pos >= last, "{section} out of order");
            last = pos;
        }
        assert!(text.contains("- [alice@x.com] Ship Friday"));
        assert!(text.contains("- Cadence: Biweekly releases"));
    }

    #[test]
    fn format_omits_empty_sections() {
        let ctx = manager().build_direct(&messages(2), Vec::new(), Vec::new());
        let text = MemoryManager::format_context(&ctx);
        assert!(!text.contains("## Earlier conversation"));
        assert!(!text.contains("## Decisions"));
        assert!(!text.contains("## Background knowledge"));
        assert!(text.contains("## Recent messages"));
    }

    #[test]
    fn format_is_deterministic() {
        let ctx = manager().build_direct(&messages(4), Vec::new(), Vec::new());
        assert_eq!(
            MemoryManager::format_context(&ctx),
            MemoryManager::format_context(&ctx)
        );
    }
}
