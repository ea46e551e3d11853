//! Unified error handling for Portal Core

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Coarse classification for page-level messaging.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Api(e) => e.kind(),
            AppError::Unauthenticated => ErrorKind::Unauthenticated,
            _ => ErrorKind::Generic,
        }
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Errors produced by the resource client.
///
/// Non-2xx responses are never interpreted here: status and body are handed
/// back to the caller exactly as the server sent them.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.status()
            .map(ErrorKind::from_status)
            .unwrap_or(ErrorKind::Generic)
    }

    /// The `error` field of a JSON error body, when the server provided one.
    pub fn server_message(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }

        let ApiError::Status { body, .. } = self else {
            return None;
        };
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed.error.filter(|m| !m.is_empty())
    }
}

/// Failure taxonomy surfaced to pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Unauthenticated,
    Generic,
}

impl ErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::FORBIDDEN => ErrorKind::Forbidden,
            StatusCode::UNAUTHORIZED => ErrorKind::Unauthenticated,
            _ => ErrorKind::Generic,
        }
    }

    /// User-facing message, e.g. `message("note", "edit")` for a 403 gives
    /// "You do not have permission to edit this note".
    pub fn message(self, resource: &str, action: &str) -> String {
        match self {
            ErrorKind::NotFound => format!("{} not found", capitalize(resource)),
            ErrorKind::Forbidden => {
                format!("You do not have permission to {} this {}", action, resource)
            }
            ErrorKind::Unauthenticated => format!("Please sign in to {} this {}", action, resource),
            ErrorKind::Generic => format!("Failed to {} {}", action, resource),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Routing failures. Guard redirects are not errors; these are.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Redirect loop starting at {path} ({hops} hops)")]
    RedirectLoop { path: String, hops: usize },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
