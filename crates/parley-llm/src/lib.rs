//! # parley-llm
//!
//! The language-model boundary.
//!
//! The transport itself is out of scope — a deployment supplies an
//! implementation of [`service::ModelService`] backed by whatever provider
//! it uses. This crate owns:
//!
//! - **[`service`]**: request/turn types and the `ModelService` trait, in
//!   plain and tool-augmented flavors
//! - **[`markers`]**: the inline `CONFIDENCE:` / `SUGGESTED_SKILL:` answer
//!   protocol — a de facto wire format reproduced exactly
//! - **[`testutil`]**: a scripted model double for driving the orchestrator
//!   in tests without a live service
//!
//! ## Crate Position
//!
//! Depends on: parley-core. Depended on by: parley-memory, parley-runtime.

#![deny(unsafe_code)]

pub mod errors;
pub mod markers;
pub mod service;
pub mod testutil;

pub use errors::ModelError;
pub use service::{ModelService, ModelTurn, PromptRequest, ToolResultSubmission, ToolTurnRequest, ToolUse};
