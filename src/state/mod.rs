//! Shared application state
//!
//! Each container has exactly one writer (the store) and any number of
//! read-only handles, backed by `tokio::sync::watch`.

pub mod account;
pub mod flags;
pub mod session;

pub use account::{AccountContextStore, AccountHandle};
pub use flags::{FlagHandle, FlagSource, FlagState, FlagStore};
pub use session::{AuthBackend, SessionHandle, SessionStore};
