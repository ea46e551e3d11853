//! Portal Core - client-side core of the notes/blog/admin portal
//!
//! This crate provides the session and feature-flag state containers, the
//! route table with role-gated guards, navigation menu composition and a
//! typed HTTP client for the portal API. Rendering is left to the UI layer.

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod navigation;
pub mod page;
pub mod routing;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
