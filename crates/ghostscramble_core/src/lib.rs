//! Core domain logic for Ghost Scramble.
//! This crate is the single source of truth for journaling session invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::draft::{Cursor, DraftBuffer};
pub use model::prompt::{
    catalog, catalog_size, prompt_at, prompt_index, CatalogError, PromptDefinition,
    REFLECTION_PLACEHOLDER,
};
pub use model::session::{count_words, SessionId, SessionRecord};
pub use repo::session_store::{decode_snapshot, encode_snapshot, SessionStore};
pub use repo::snapshot_storage::{
    InMemorySnapshotStorage, RepoError, RepoResult, SnapshotStorage, SqliteSnapshotStorage,
    SESSIONS_KEY,
};
pub use service::collaborators::{Clock, SystemClock, UserPrompter};
pub use service::export_service::{
    build_document, export_file_name, format_export, format_session_export, DirectoryExportSink,
    ExportDocument, ExportError, ExportSink, EXPORT_MIME_TYPE,
};
pub use service::session_service::{
    SessionService, SessionServiceError, ServiceResult, COPY_TITLE_SUFFIX,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
