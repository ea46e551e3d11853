//! Domain models for Portal Core

pub mod account;
pub mod auth;
pub mod blog;
pub mod feature_flag;
pub mod note;
pub mod role;
pub mod session;

pub use account::*;
pub use auth::*;
pub use blog::*;
pub use feature_flag::*;
pub use note::*;
pub use role::*;
pub use session::*;
