//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate draft and store transitions into use-case level APIs.
//! - Keep front-ends decoupled from storage and export details.

pub mod collaborators;
pub mod export_service;
pub mod session_service;
