//! UTF-8-safe text helpers for digest and preview rendering.
//!
//! Message bodies are arbitrary user text; slicing `&str[..n]` panics when
//! `n` lands inside a multi-byte character, so all truncation goes through
//! these boundary-aware helpers.

/// Longest prefix of `s` at most `max_bytes` long that ends on a char
/// boundary.
#[inline]
#[must_use]
pub fn clip(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Clip `s` to `max_bytes`, appending `…` when anything was cut.
///
/// The result never exceeds `max_bytes` bytes including the ellipsis.
#[must_use]
pub fn clip_ellipsis(s: &str, max_bytes: usize) -> String {
    const ELLIPSIS: &str = "…"; // 3 bytes
    if s.len() <= max_bytes {
        return s.to_owned();
    }
    let body = clip(s, max_bytes.saturating_sub(ELLIPSIS.len()));
    format!("{body}{ELLIPSIS}")
}

/// First line of `s`, clipped to `max_bytes` — used for one-line message
/// previews inside summaries and disclosure notes.
#[must_use]
pub fn preview_line(s: &str, max_bytes: usize) -> String {
    let first = s.lines().next().unwrap_or("");
    clip_ellipsis(first, max_bytes)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
