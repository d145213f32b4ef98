//! # parley-core
//!
//! Foundation types, errors, and utilities for the Parley assistant.
//!
//! This crate provides the shared vocabulary that all other Parley crates
//! depend on:
//!
//! - **Participants**: [`participants::Participant`], keyed by email
//! - **Messages**: [`messages::Message`] immutable conversation records with
//!   a derived audience
//! - **Speech acts**: [`acts::SpeechAct`] with the closed [`acts::SpeechActKind`]
//!   enum, plus [`knowledge::KnowledgeEntry`]
//! - **Queries**: [`query::QueryRequest`] / [`query::QueryResponse`] and the
//!   [`query::Confidence`] marker vocabulary
//! - **Tools**: [`tools::ToolDescriptor`] / [`tools::ToolOutcome`] shared by
//!   the model and registry boundaries
//! - **Errors**: [`errors::CoreError`] hierarchy via `thiserror`
//! - **Text**: UTF-8-safe truncation helpers in [`text`]
//! - **Logging**: tracing subscriber setup in [`logging`]
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other parley crates.

#![deny(unsafe_code)]

pub mod acts;
pub mod errors;
pub mod knowledge;
pub mod logging;
pub mod messages;
pub mod participants;
pub mod query;
pub mod text;
pub mod tools;
