//! # parley-runtime
//!
//! The query pipeline, end to end.
//!
//! A query enters through [`orchestrator::QueryOrchestrator::handle_query`]
//! and comes out as a typed [`parley_core::query::QueryResponse`]. Along the
//! way:
//!
//! - **[`orchestrator`]**: validation, access filtering, context assembly,
//!   model dispatch, response shaping
//! - **[`tool_loop`]**: the bounded tool-use conversation as an explicit
//!   state machine
//! - **[`prompts`]**: the fixed confidentiality directive and prompt
//!   assembly
//! - **[`disclosure`]**: the explanatory confidentiality flag and note
//!
//! ## Crate Position
//!
//! Depends on: every other parley crate. The top of the workspace.

#![deny(unsafe_code)]

pub mod disclosure;
pub mod errors;
pub mod orchestrator;
pub mod prompts;
pub mod tool_loop;

pub use errors::RuntimeError;
pub use orchestrator::{ContextMode, QueryCorpus, QueryOrchestrator};
pub use tool_loop::{LoopResult, LoopState, MAX_TOOL_ROUNDS};
