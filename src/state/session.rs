//! Session state provider
//!
//! `SessionStore` is the single writer of the current [`Session`]. Guards,
//! the navigator and the menu composer read it through cloned
//! [`SessionHandle`]s and never mutate it.

use crate::client::transport::{SharedToken, TokenProvider};
use crate::domain::{AuthPayload, Identity, LoginInput, ProfileUpdate, RegisterInput, Session};
use crate::error::{ApiError, AppError, ErrorKind, Result};
use crate::telemetry::metrics;
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, warn};
use validator::Validate;

/// Remote authentication operations the session store depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, input: &LoginInput) -> std::result::Result<AuthPayload, ApiError>;
    async fn register(&self, input: &RegisterInput)
        -> std::result::Result<AuthPayload, ApiError>;
    /// Resolve the identity behind the current credential
    async fn current_user(&self) -> std::result::Result<Identity, ApiError>;
    async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> std::result::Result<Identity, ApiError>;
    async fn logout(&self) -> std::result::Result<(), ApiError>;
}

/// Read-only view of the session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Session>,
}

impl SessionHandle {
    /// Handle over a session that never changes
    pub fn fixed(session: Session) -> Self {
        let (_tx, rx) = watch::channel(session);
        Self { rx }
    }

    pub fn snapshot(&self) -> Session {
        self.rx.borrow().clone()
    }

    /// Wait until the session is no longer loading.
    ///
    /// There is no timeout: if identity resolution never completes (or the
    /// store goes away while loading) this never returns.
    pub async fn resolved(&mut self) -> Session {
        let resolved = self
            .rx
            .wait_for(|session| !session.is_loading)
            .await
            .map(|session| Session::clone(&session));
        match resolved {
            Ok(session) => session,
            Err(_) => std::future::pending().await,
        }
    }

    /// Wait for the next change; `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Session> {
        self.rx.changed().await.ok()?;
        Some(self.snapshot())
    }
}

/// Owner of the session state
pub struct SessionStore<B> {
    backend: B,
    token: SharedToken,
    tx: watch::Sender<Session>,
}

impl<B: AuthBackend> SessionStore<B> {
    /// Create a store in the loading state. `token` is the credential the
    /// transport attaches to requests.
    pub fn new(backend: B, token: SharedToken) -> Self {
        let (tx, _rx) = watch::channel(Session::loading());
        Self { backend, token, tx }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.tx.subscribe(),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn publish(&self, session: Session, transition: &'static str) {
        metrics::record_session_transition(transition);
        self.tx.send_replace(session);
    }

    /// Resolve the identity for a stored credential, if any.
    ///
    /// Without a credential the session resolves to anonymous immediately.
    /// A rejected credential (401) is discarded; any other failure leaves it
    /// in place but still resolves the session as anonymous.
    pub async fn initialize(&self) -> Session {
        if self.token.token().is_none() {
            self.publish(Session::anonymous(), "resolved");
            return self.snapshot();
        }

        match self.backend.current_user().await {
            Ok(identity) => {
                info!(user_id = %identity.id, role = %identity.role, "session restored");
                self.publish(Session::authenticated(identity), "resolved");
            }
            Err(e) => {
                if e.kind() == ErrorKind::Unauthenticated {
                    self.token.clear();
                }
                warn!(error = %e, "could not restore session");
                self.publish(Session::anonymous(), "resolved");
            }
        }
        self.snapshot()
    }

    pub async fn login(&self, input: &LoginInput) -> Result<Identity> {
        input.validate()?;
        let payload = self.backend.login(input).await?;
        Ok(self.accept(payload, "login"))
    }

    pub async fn register(&self, input: &RegisterInput) -> Result<Identity> {
        input.validate()?;
        let payload = self.backend.register(input).await?;
        Ok(self.accept(payload, "register"))
    }

    fn accept(&self, payload: AuthPayload, transition: &'static str) -> Identity {
        self.token.set(Some(payload.token));
        info!(user_id = %payload.user.id, role = %payload.user.role, "signed in");
        self.publish(Session::authenticated(payload.user.clone()), transition);
        payload.user
    }

    /// Sign out. The server call is best effort; local state is always cleared.
    pub async fn logout(&self) {
        if let Err(e) = self.backend.logout().await {
            warn!(error = %e, "logout request failed, clearing local session anyway");
        }
        self.token.clear();
        info!("signed out");
        self.publish(Session::anonymous(), "logout");
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Identity> {
        if !self.snapshot().is_authenticated {
            return Err(AppError::Unauthenticated);
        }
        update.validate()?;
        let identity = self.backend.update_profile(update).await?;
        self.publish(Session::authenticated(identity.clone()), "profile");
        Ok(identity)
    }
}
