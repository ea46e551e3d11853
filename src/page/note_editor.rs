//! Note editor page controller

use super::{Completion, LoadState, PageError, PageScope};
use crate::client::{NotesApi, RequestScope};
use crate::domain::{Note, NoteDraft};
use crate::error::{ApiError, AppError, ErrorKind, Result};
use tracing::{info, warn};

/// Loads an existing note into a [`NoteDraft`] and saves it back, in one
/// request scope (default or account).
pub struct NoteEditor {
    api: NotesApi,
    scope: RequestScope,
    page: PageScope,
    note_id: Option<String>,
    pub draft: NoteDraft,
    state: LoadState<Note>,
}

impl NoteEditor {
    /// Editor for a new note
    pub fn create(api: NotesApi, scope: RequestScope) -> Self {
        Self {
            api,
            scope,
            page: PageScope::new(),
            note_id: None,
            draft: NoteDraft::default(),
            state: LoadState::Idle,
        }
    }

    pub fn edit(api: NotesApi, scope: RequestScope, note_id: impl Into<String>) -> Self {
        Self {
            note_id: Some(note_id.into()),
            ..Self::create(api, scope)
        }
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    pub fn state(&self) -> &LoadState<Note> {
        &self.state
    }

    pub fn is_new(&self) -> bool {
        self.note_id.is_none()
    }

    /// Fetch the note being edited and copy it into the draft.
    pub async fn load(&mut self) -> &LoadState<Note> {
        let Some(note_id) = self.note_id.clone() else {
            return &self.state;
        };

        self.state.start();
        let api = self.api.clone();
        let scope = self.scope.clone();
        let completion = self
            .page
            .run(async move {
                api.scoped(&scope)
                    .get(&note_id)
                    .await
                    .map(|response| response.data)
            })
            .await;

        // A forbidden note is one the user may not edit
        let changed = self.state.apply_with(completion, |err| match err.kind() {
            ErrorKind::Forbidden => PageError::from_api(&err, "note", "edit"),
            _ => PageError::from_api(&err, "note", "load"),
        });
        if changed {
            if let LoadState::Success(note) = &self.state {
                self.draft = NoteDraft::from(note);
            }
        }
        &self.state
    }

    /// Validate the draft and create or update the note.
    ///
    /// The request runs in the page scope like [`NoteEditor::load`]. A
    /// created note switches the editor into edit mode for its new id. A
    /// save that is cancelled or superseded returns [`ApiError::Cancelled`].
    pub async fn save(&mut self) -> Result<Note> {
        let input = self.draft.to_input()?;

        self.state.start();
        let api = self.api.clone();
        let scope = self.scope.clone();
        let note_id = self.note_id.clone();
        let completion = self
            .page
            .run(async move {
                let notes = api.scoped(&scope);
                let response = match note_id {
                    Some(id) => notes.update(&id, &input).await,
                    None => notes.create(&input).await,
                };
                response.map(|response| response.data)
            })
            .await;

        let note = match completion {
            Completion::Current(Ok(note)) => note,
            Completion::Current(Err(err)) => {
                warn!(note_id = ?self.note_id, error = %err, "note save failed");
                self.state =
                    LoadState::Error(PageError::with_server_message(&err, "note", "save"));
                return Err(err.into());
            }
            Completion::Stale | Completion::Cancelled => {
                return Err(ApiError::Cancelled.into());
            }
        };

        if self.note_id.is_none() {
            self.note_id = note.id.clone();
        }
        info!(note_id = ?note.id, "note saved");
        self.state = LoadState::Success(note.clone());
        Ok(note)
    }

    /// Where the page goes after a successful save: `/notes/{id}`.
    pub fn note_path(&self) -> Option<String> {
        self.note_id
            .as_deref()
            .map(|id| format!("/notes/{}", urlencoding::encode(id)))
    }

    /// Cancel in-flight requests, as when the page is unmounted.
    pub fn cancel(&self) {
        self.page.cancel();
    }

    /// Message to show for a failed save
    pub fn save_error_message(err: &AppError) -> String {
        match err {
            AppError::Api(api) => PageError::with_server_message(api, "note", "save").message,
            AppError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
