//! Portal API client
//!
//! One request per operation, no caching and no retries. Each resource API
//! offers default-context and account-context entry points; which one to
//! call is the caller's decision.

pub mod accounts;
pub mod auth;
pub mod blog;
pub mod flags;
pub mod notes;
pub mod resource;
pub mod transport;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use blog::BlogApi;
pub use flags::FlagsApi;
pub use notes::NotesApi;
pub use resource::{Resource, ResourceClient};
pub use transport::{
    ApiResponse, ApiResult, RequestScope, SharedToken, TokenProvider, Transport, ACCOUNT_HEADER,
};

use crate::config::ApiConfig;
use crate::error::ApiError;
use std::sync::Arc;

/// All resource APIs over one shared transport
#[derive(Clone)]
pub struct PortalClient {
    transport: Transport,
    notes: NotesApi,
    blog: BlogApi,
    accounts: AccountsApi,
    auth: AuthApi,
    flags: FlagsApi,
}

impl PortalClient {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        Ok(Self::with_transport(Transport::new(config, tokens)?))
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self {
            notes: NotesApi::new(transport.clone()),
            blog: BlogApi::new(transport.clone()),
            accounts: AccountsApi::new(transport.clone()),
            auth: AuthApi::new(transport.clone()),
            flags: FlagsApi::new(transport.clone()),
            transport,
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn notes(&self) -> &NotesApi {
        &self.notes
    }

    pub fn blog(&self) -> &BlogApi {
        &self.blog
    }

    pub fn accounts(&self) -> &AccountsApi {
        &self.accounts
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn flags(&self) -> &FlagsApi {
        &self.flags
    }
}
