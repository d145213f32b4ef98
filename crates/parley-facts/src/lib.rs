//! # parley-facts
//!
//! Append/upsert store for extracted speech acts.
//!
//! - Upsert by id — re-adding an id overwrites, never duplicates
//! - Ordered queries: newest timestamp first, insertion sequence as the
//!   stable tie-break
//! - Membership visibility (`get_visible_to`) — deliberately distinct from
//!   the subset rule enforced in parley-access; both semantics coexist
//! - Full JSON serialize/restore round-trip
//!
//! The store is in-memory behind a `RwLock` (concurrent readers, serialized
//! whole-record writers). A multi-process deployment would back the same
//! interface with an external keyed store.
//!
//! ## Crate Position
//!
//! Depends on: parley-core. Depended on by: parley-runtime.

#![deny(unsafe_code)]

pub mod errors;
pub mod store;

pub use errors::StoreError;
pub use store::{FactQuery, FactStore};
