//! Tuning constants for context assembly.

/// Characters per token for the estimation heuristic.
///
/// Deliberately a coarse divisor, not a tokenizer — estimates only need to
/// be deterministic and directionally right for budget decisions.
pub const CHARS_PER_TOKEN: u64 = 4;

/// Messages kept verbatim at the tail of the conversation.
pub const DEFAULT_RECENT_WINDOW: usize = 10;

/// Older messages condensed per summarization call.
pub const DEFAULT_BATCH_SIZE: usize = 8;
