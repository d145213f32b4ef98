//! # parley-tools
//!
//! The tool-registry boundary for tool-augmented queries.
//!
//! Concrete tools (calendar lookups, directory search, ticket systems) live
//! outside this workspace; the orchestrator only needs descriptors to show
//! the model and an `invoke` call that never raises — failures come back as
//! error-tagged [`parley_core::tools::ToolOutcome`]s.
//!
//! ## Crate Position
//!
//! Depends on: parley-core. Depended on by: parley-runtime.

#![deny(unsafe_code)]

pub mod registry;
pub mod schema;
pub mod testutil;

pub use registry::{RegisteredTool, StaticToolRegistry, ToolRegistry};
pub use schema::DescriptorBuilder;
