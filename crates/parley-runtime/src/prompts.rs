//! System and user prompt assembly.
//!
//! The confidentiality directive is fixed and always first in the system
//! prompt; a persona overlay, when configured, is appended after it and can
//! shape tone but never override the directive.

use parley_core::query::QueryRequest;
use parley_memory::{MemoryContext, MemoryManager};

/// The non-overridable confidentiality directive.
///
/// Every answer is produced against a context that was already filtered to
/// what everyone currently present may see; this directive tells the model
/// not to speculate past that boundary.
pub const CONFIDENTIALITY_DIRECTIVE: &str = "\
You are a coordination assistant answering questions about a conversation \
corpus. Everything in your context has already been filtered so that every \
person currently present is entitled to see it. You must not reference, \
reconstruct, or speculate about messages, decisions, or people outside the \
provided context, even if asked directly. If the context is insufficient, \
say so.

End your answer with a line `CONFIDENCE: HIGH`, `CONFIDENCE: MEDIUM`, \
`CONFIDENCE: LOW`, or `CONFIDENCE: UNABLE`. If the question would need a \
capability you do not have, also add a line `SUGGESTED_SKILL: <name>`.";

/// Build the system prompt: directive first, persona (if any) after.
#[must_use]
pub fn system_prompt(persona: Option<&str>) -> String {
    match persona {
        Some(overlay) if !overlay.trim().is_empty() => {
            format!("{CONFIDENTIALITY_DIRECTIVE}\n\n{}", overlay.trim())
        }
        _ => CONFIDENTIALITY_DIRECTIVE.to_owned(),
    }
}

/// Build the user prompt: rendered context, then the question.
#[must_use]
pub fn user_prompt(context: &MemoryContext, request: &QueryRequest) -> String {
    let rendered = MemoryManager::format_context(context);
    if rendered.is_empty() {
        format!("Question from {}: {}", request.asker.email, request.query)
    } else {
        format!(
            "{rendered}\n\nQuestion from {}: {}",
            request.asker.email, request.query
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
