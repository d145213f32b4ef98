//! # parley-memory
//!
//! Bounded context assembly for model prompts.
//!
//! Long threads do not fit a prompt window. The memory manager keeps the
//! newest messages verbatim and condenses everything older into short
//! digests, one per fixed-size batch, via a [`summarizer::Summarizer`] call.
//! When summarization fails the raw batch text is inlined instead — history
//! is never silently dropped, and the degradation is surfaced as data on
//! the produced context.
//!
//! - **[`context`]**: the per-query [`context::MemoryContext`] bundle
//! - **[`summarizer`]**: the summarization seam and its model-backed adapter
//! - **[`manager`]**: assembly, token estimation, trimming, rendering
//!
//! ## Crate Position
//!
//! Depends on: parley-core, parley-llm. Depended on by: parley-runtime.

#![deny(unsafe_code)]

pub mod constants;
pub mod context;
pub mod manager;
pub mod summarizer;

pub use context::{HistorySummary, MemoryContext};
pub use manager::{MemoryConfig, MemoryManager, estimate_tokens};
pub use summarizer::{ModelSummarizer, SummarizeError, Summarizer};
