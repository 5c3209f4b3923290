//! Session lifecycle use-case service.
//!
//! # Responsibility
//! - Own the single draft buffer and the session store.
//! - Move state between them: save, load-as-copy, start-new, delete.
//! - Drive user confirmations and alerts through `UserPrompter`.
//!
//! # Invariants
//! - A failed or declined operation leaves draft and store unchanged.
//! - The draft only ever holds copies of stored record fields.
//! - Save, load and start-new always leave the cursor on prompt 0.

use crate::model::draft::DraftBuffer;
use crate::model::prompt::CatalogError;
use crate::model::session::{count_words, SessionId, SessionRecord};
use crate::repo::session_store::SessionStore;
use crate::repo::snapshot_storage::{RepoError, SnapshotStorage};
use crate::service::collaborators::{Clock, SystemClock, UserPrompter};
use crate::service::export_service::{build_document, ExportDocument, ExportError, ExportSink};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Appended to a loaded session's title so a re-save is told apart from the source.
pub const COPY_TITLE_SUFFIX: &str = " (copy)";

pub const MISSING_TITLE_MESSAGE: &str = "Please add a title for your session";
pub const SAVED_MESSAGE: &str = "Session saved successfully!";
pub const CONFIRM_NEW_MESSAGE: &str = "Start a new session? Any unsaved work will be lost.";
pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this session?";

/// Errors from lifecycle operations.
#[derive(Debug)]
pub enum SessionServiceError {
    /// Title is empty or whitespace-only at save time.
    MissingTitle,
    /// No stored record has this id.
    SessionNotFound(SessionId),
    /// Invalid prompt index or key.
    Catalog(CatalogError),
    /// Snapshot persistence failed.
    Repo(RepoError),
    /// Export delivery failed.
    Export(ExportError),
}

impl Display for SessionServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "session title must not be blank"),
            Self::SessionNotFound(id) => write!(f, "session not found: {id}"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::MissingTitle | Self::SessionNotFound(_) => None,
        }
    }
}

impl From<CatalogError> for SessionServiceError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<RepoError> for SessionServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ExportError> for SessionServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

pub type ServiceResult<T> = Result<T, SessionServiceError>;

/// Lifecycle facade over the draft buffer and session store.
pub struct SessionService<S: SnapshotStorage, P: UserPrompter, C: Clock = SystemClock> {
    draft: DraftBuffer,
    store: SessionStore<S>,
    prompter: P,
    clock: C,
}

impl<S: SnapshotStorage, P: UserPrompter> SessionService<S, P> {
    /// Creates a service with an empty draft and the system clock.
    pub fn new(store: SessionStore<S>, prompter: P) -> Self {
        Self::with_clock(store, prompter, SystemClock)
    }
}

impl<S: SnapshotStorage, P: UserPrompter, C: Clock> SessionService<S, P, C> {
    pub fn with_clock(store: SessionStore<S>, prompter: P, clock: C) -> Self {
        Self {
            draft: DraftBuffer::new(),
            store,
            prompter,
            clock,
        }
    }

    pub fn draft(&self) -> &DraftBuffer {
        &self.draft
    }

    /// Mutable draft access for navigation and editing.
    pub fn draft_mut(&mut self) -> &mut DraftBuffer {
        &mut self.draft
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Saved sessions, newest first.
    pub fn sessions(&self) -> &[SessionRecord] {
        self.store.records()
    }

    pub fn session(&self, id: SessionId) -> Option<&SessionRecord> {
        self.store.get(id)
    }

    /// Snapshots the draft into a new record and resets the draft.
    ///
    /// # Errors
    /// - `MissingTitle` when the trimmed title is empty; the user is alerted.
    /// - `Repo` when persistence fails; the draft is kept.
    pub fn save(&mut self) -> ServiceResult<SessionId> {
        if self.draft.title().trim().is_empty() {
            self.prompter.alert(MISSING_TITLE_MESSAGE);
            return Err(SessionServiceError::MissingTitle);
        }

        let responses = self.draft.responses().clone();
        let reflection = self.draft.reflection().to_string();
        let record = SessionRecord {
            id: self.store.next_id(self.clock.now_ms()),
            title: self.draft.title().to_string(),
            date: self.clock.today(),
            word_count: count_words(responses.values(), &reflection),
            responses,
            reflection,
        };
        let id = record.id;
        let word_count = record.word_count;

        self.store.prepend(record)?;
        self.draft.clear();

        info!(
            "event=session_save module=service status=ok session_id={} word_count={} records={}",
            id,
            word_count,
            self.store.len()
        );
        self.prompter.alert(SAVED_MESSAGE);
        Ok(id)
    }

    /// Replaces the draft with a copy of a stored record.
    ///
    /// The title gets `COPY_TITLE_SUFFIX`; the stored record is untouched.
    pub fn load_for_editing(&mut self, id: SessionId) -> ServiceResult<()> {
        let Some(record) = self.store.get(id) else {
            warn!("event=session_load module=service status=not_found session_id={id}");
            return Err(SessionServiceError::SessionNotFound(id));
        };

        self.draft = DraftBuffer::from_parts(
            &record.responses,
            &record.reflection,
            format!("{}{COPY_TITLE_SUFFIX}", record.title),
        );
        info!("event=session_load module=service status=ok session_id={id}");
        Ok(())
    }

    /// Discards the draft, asking first when it holds any work.
    ///
    /// Returns `false` when the user declined.
    pub fn start_new(&mut self) -> bool {
        if !self.draft.is_empty() && !self.prompter.confirm(CONFIRM_NEW_MESSAGE) {
            info!("event=session_new module=service status=declined");
            return false;
        }

        self.draft.clear();
        info!("event=session_new module=service status=ok");
        true
    }

    /// Deletes a stored record after confirmation.
    ///
    /// Returns `Ok(false)` when declined or when `id` is unknown. The draft is
    /// never touched, even if it was loaded from this record.
    pub fn delete(&mut self, id: SessionId) -> ServiceResult<bool> {
        if !self.prompter.confirm(CONFIRM_DELETE_MESSAGE) {
            info!("event=session_delete module=service status=declined session_id={id}");
            return Ok(false);
        }

        let removed = self.store.remove(id)?;
        info!(
            "event=session_delete module=service status=ok session_id={id} removed={removed} records={}",
            self.store.len()
        );
        Ok(removed)
    }

    /// Renders the current draft stamped with today's date.
    pub fn export(&self) -> ExportDocument {
        build_document(&self.draft, &self.clock.today())
    }

    /// Renders the current draft and hands it to `sink`.
    pub fn export_to(&self, sink: &mut dyn ExportSink) -> ServiceResult<Option<PathBuf>> {
        let document = self.export();
        let location = sink.deliver(&document)?;
        info!(
            "event=session_export module=service status=ok bytes={}",
            document.text.len()
        );
        Ok(location)
    }
}
