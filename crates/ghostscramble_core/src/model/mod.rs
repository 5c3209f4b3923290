//! Journaling domain model.
//!
//! # Responsibility
//! - Define the static prompt catalog, the draft buffer, and saved sessions.
//!
//! # Invariants
//! - Drafts only ever hold copies of saved session fields.
//! - Saved sessions are immutable snapshots.

pub mod draft;
pub mod prompt;
pub mod session;
