//! Page-level request lifecycle
//!
//! Each page runs an `idle -> loading -> success | error` machine
//! ([`LoadState`]) and owns a [`PageScope`]. Requests issued through the
//! scope are cancelled when the page goes away, and a request superseded by
//! a newer one reports [`Completion::Stale`] instead of its result.

pub mod note_editor;

pub use note_editor::NoteEditor;

use crate::error::{ApiError, ErrorKind};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

/// Error shown by a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageError {
    pub kind: ErrorKind,
    pub message: String,
}

impl PageError {
    /// Fixed message for the failure class, e.g. "Note not found".
    pub fn from_api(err: &ApiError, resource: &str, action: &str) -> Self {
        let kind = err.kind();
        Self {
            kind,
            message: kind.message(resource, action),
        }
    }

    /// The server's own `error` message, else the generic
    /// "Failed to {action} {resource}" whatever the status (used for saves).
    pub fn with_server_message(err: &ApiError, resource: &str, action: &str) -> Self {
        Self {
            kind: err.kind(),
            message: err
                .server_message()
                .unwrap_or_else(|| ErrorKind::Generic.message(resource, action)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(PageError),
}

impl<T> LoadState<T> {
    pub fn start(&mut self) {
        *self = LoadState::Loading;
    }

    /// Apply a request completion. Stale and cancelled completions leave the
    /// state untouched; returns whether the state changed.
    pub fn apply(&mut self, completion: Completion<T>, resource: &str, action: &str) -> bool {
        self.apply_with(completion, |err| PageError::from_api(&err, resource, action))
    }

    /// Like [`LoadState::apply`] with a page-specific error mapping.
    pub fn apply_with<F>(&mut self, completion: Completion<T>, on_error: F) -> bool
    where
        F: FnOnce(ApiError) -> PageError,
    {
        match completion {
            Completion::Current(Ok(value)) => {
                *self = LoadState::Success(value);
                true
            }
            Completion::Current(Err(err)) => {
                *self = LoadState::Error(on_error(err));
                true
            }
            Completion::Stale | Completion::Cancelled => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PageError> {
        match self {
            LoadState::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// How a scoped request ended
#[derive(Debug)]
pub enum Completion<T> {
    /// Latest request of the scope; carries its result
    Current(Result<T, ApiError>),
    /// A newer request was issued while this one was in flight
    Stale,
    /// The scope was cancelled or dropped
    Cancelled,
}

/// Request scope of one mounted page
pub struct PageScope {
    token: CancellationToken,
    generation: Arc<AtomicU64>,
    _cancel_on_drop: DropGuard,
}

impl Default for PageScope {
    fn default() -> Self {
        Self::new()
    }
}

impl PageScope {
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Scope nested under a parent token (e.g. the application's).
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self::with_token(parent.child_token())
    }

    fn with_token(token: CancellationToken) -> Self {
        Self {
            _cancel_on_drop: token.clone().drop_guard(),
            token,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Issue `request` in this scope.
    ///
    /// The returned future does not borrow the scope, so it can outlive it;
    /// it then resolves to [`Completion::Cancelled`].
    pub fn run<F, T>(&self, request: F) -> impl Future<Output = Completion<T>>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let token = self.token.child_token();

        async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(generation, "page request cancelled");
                    return Completion::Cancelled;
                }
                result = request => result,
            };

            if latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "discarding stale page response");
                return Completion::Stale;
            }
            Completion::Current(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tokio::sync::oneshot;

    fn not_found() -> ApiError {
        ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        }
    }

    #[test]
    fn test_load_state_transitions() {
        let mut state: LoadState<u32> = LoadState::default();
        assert_eq!(state, LoadState::Idle);

        state.start();
        assert!(state.is_loading());

        assert!(state.apply(Completion::Current(Ok(7)), "note", "load"));
        assert_eq!(state.value(), Some(&7));

        state.start();
        assert!(state.apply(Completion::Current(Err(not_found())), "note", "load"));
        assert_eq!(
            state.error(),
            Some(&PageError {
                kind: ErrorKind::NotFound,
                message: "Note not found".to_string(),
            })
        );
    }

    #[test]
    fn test_stale_and_cancelled_leave_state_alone() {
        let mut state: LoadState<u32> = LoadState::Loading;
        assert!(!state.apply(Completion::Stale, "note", "load"));
        assert!(!state.apply(Completion::Cancelled, "note", "load"));
        assert!(state.is_loading());
    }

    #[test]
    fn test_server_message_preferred_for_saves() {
        let err = ApiError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: r#"{"error":"Title too long"}"#.to_string(),
        };
        assert_eq!(
            PageError::with_server_message(&err, "note", "save").message,
            "Title too long"
        );
        assert_eq!(
            PageError::from_api(&err, "note", "save").message,
            "Failed to save note"
        );
    }

    #[test]
    fn test_save_message_falls_back_to_generic() {
        for status in [StatusCode::FORBIDDEN, StatusCode::NOT_FOUND] {
            let err = ApiError::Status {
                status,
                body: String::new(),
            };
            let page_error = PageError::with_server_message(&err, "note", "save");
            assert_eq!(page_error.kind, ErrorKind::from_status(status));
            assert_eq!(page_error.message, "Failed to save note");
        }
    }

    #[tokio::test]
    async fn test_current_request_completes() {
        let scope = PageScope::new();
        let outcome = scope.run(async { Ok::<_, ApiError>(1) }).await;
        assert!(matches!(outcome, Completion::Current(Ok(1))));
    }

    #[tokio::test]
    async fn test_drop_cancels_in_flight_request() {
        let scope = PageScope::new();
        let (_tx, rx) = oneshot::channel::<()>();
        let mut request = tokio_test::task::spawn(scope.run(async move {
            let _ = rx.await;
            Ok::<_, ApiError>(1)
        }));
        tokio_test::assert_pending!(request.poll());

        drop(scope);
        assert!(request.is_woken());
        let outcome = tokio_test::assert_ready!(request.poll());
        assert!(matches!(outcome, Completion::Cancelled));
    }

    #[tokio::test]
    async fn test_parent_cancellation_reaches_scope() {
        let parent = CancellationToken::new();
        let scope = PageScope::child_of(&parent);
        parent.cancel();
        assert!(scope.is_cancelled());

        let outcome = scope.run(async { Ok::<_, ApiError>(1) }).await;
        assert!(matches!(outcome, Completion::Cancelled));
    }

    #[tokio::test]
    async fn test_superseded_request_is_stale() {
        let scope = PageScope::new();
        let (tx, rx) = oneshot::channel::<()>();
        let first = scope.run(async move {
            let _ = rx.await;
            Ok::<_, ApiError>("first")
        });
        let second = scope.run(async { Ok::<_, ApiError>("second") });

        tx.send(()).unwrap();
        assert!(matches!(first.await, Completion::Stale));
        assert!(matches!(second.await, Completion::Current(Ok("second"))));
    }
}
