//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value storage contract used for the session snapshot.
//! - Isolate SQLite and JSON details from lifecycle orchestration.
//!
//! # Invariants
//! - The persisted snapshot is always a complete replacement of the prior one.

pub mod session_store;
pub mod snapshot_storage;
