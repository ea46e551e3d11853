//! Notes API

use super::resource::{Resource, ResourceClient};
use super::transport::{ApiResult, RequestScope, Transport};
use crate::domain::{AccountId, Note, NoteInput, NoteQuery};

pub struct Notes;

impl Resource for Notes {
    const PATH: &'static str = "/notes";
    const ITEM_KEY: &'static str = "note";
    const LIST_KEY: &'static str = "notes";

    type Item = Note;
    type Input = NoteInput;
}

/// Note endpoints, in the caller's default context or in an account context
#[derive(Clone)]
pub struct NotesApi {
    inner: ResourceClient<Notes>,
}

impl NotesApi {
    pub fn new(transport: Transport) -> Self {
        Self {
            inner: ResourceClient::new(transport),
        }
    }

    pub async fn list(&self, query: &NoteQuery) -> ApiResult<Vec<Note>> {
        self.inner.list(&RequestScope::Default, query).await
    }

    pub async fn list_in_account(
        &self,
        account_id: &AccountId,
        query: &NoteQuery,
    ) -> ApiResult<Vec<Note>> {
        self.inner
            .list(&RequestScope::Account(account_id.clone()), query)
            .await
    }

    pub async fn get(&self, note_id: &str) -> ApiResult<Note> {
        self.inner.get(&RequestScope::Default, note_id).await
    }

    pub async fn get_in_account(&self, account_id: &AccountId, note_id: &str) -> ApiResult<Note> {
        self.inner
            .get(&RequestScope::Account(account_id.clone()), note_id)
            .await
    }

    pub async fn create(&self, input: &NoteInput) -> ApiResult<Note> {
        self.inner.create(&RequestScope::Default, input).await
    }

    pub async fn create_in_account(
        &self,
        account_id: &AccountId,
        input: &NoteInput,
    ) -> ApiResult<Note> {
        self.inner
            .create(&RequestScope::Account(account_id.clone()), input)
            .await
    }

    pub async fn update(&self, note_id: &str, input: &NoteInput) -> ApiResult<Note> {
        self.inner
            .update(&RequestScope::Default, note_id, input)
            .await
    }

    pub async fn update_in_account(
        &self,
        account_id: &AccountId,
        note_id: &str,
        input: &NoteInput,
    ) -> ApiResult<Note> {
        self.inner
            .update(&RequestScope::Account(account_id.clone()), note_id, input)
            .await
    }

    pub async fn delete(&self, note_id: &str) -> ApiResult<()> {
        self.inner.delete(&RequestScope::Default, note_id).await
    }

    pub async fn delete_in_account(&self, account_id: &AccountId, note_id: &str) -> ApiResult<()> {
        self.inner
            .delete(&RequestScope::Account(account_id.clone()), note_id)
            .await
    }

    /// Dispatch on an already-chosen scope (see `AccountContextStore::scope`).
    pub fn scoped<'a>(&'a self, scope: &'a RequestScope) -> ScopedNotes<'a> {
        ScopedNotes { api: self, scope }
    }
}

/// Notes API bound to one scope
pub struct ScopedNotes<'a> {
    api: &'a NotesApi,
    scope: &'a RequestScope,
}

impl ScopedNotes<'_> {
    pub async fn list(&self, query: &NoteQuery) -> ApiResult<Vec<Note>> {
        self.api.inner.list(self.scope, query).await
    }

    pub async fn get(&self, note_id: &str) -> ApiResult<Note> {
        self.api.inner.get(self.scope, note_id).await
    }

    pub async fn create(&self, input: &NoteInput) -> ApiResult<Note> {
        self.api.inner.create(self.scope, input).await
    }

    pub async fn update(&self, note_id: &str, input: &NoteInput) -> ApiResult<Note> {
        self.api.inner.update(self.scope, note_id, input).await
    }

    pub async fn delete(&self, note_id: &str) -> ApiResult<()> {
        self.api.inner.delete(self.scope, note_id).await
    }
}
