//! # parley-access
//!
//! Per-message audience tracking and subset-visibility filtering.
//!
//! The confidentiality rule this crate enforces: an item is visible to a
//! current participant set `P` only if the *entire* set was part of the
//! item's original audience (`P ⊆ audience`). Overlap is not enough — a new
//! participant joining a thread never retroactively sees earlier,
//! narrower-audience content.
//!
//! ## Crate Position
//!
//! Depends on: parley-core. Depended on by: parley-runtime.

#![deny(unsafe_code)]

pub mod tracker;
pub mod visibility;

pub use tracker::AccessTracker;
pub use visibility::HasAudience;
