//! History-backed navigator
//!
//! Resolves a path, runs its guard against the latest session snapshot and
//! follows guard redirects. Redirects replace the current history entry, so
//! a gated path never ends up in back-history.

use super::guard::{GuardOutcome, GuardPaths};
use super::table::{normalize, resolve, RouteMatch};
use crate::error::NavigationError;
use crate::state::SessionHandle;
use crate::telemetry::metrics;
use tracing::debug;

/// Redirect chains longer than this are treated as a loop
pub const MAX_REDIRECTS: usize = 8;

/// Browser-like history stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Push a new entry, dropping anything ahead of the cursor.
    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.into());
        self.index = self.entries.len() - 1;
    }

    pub fn replace(&mut self, path: impl Into<String>) {
        self.entries[self.index] = path.into();
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Result of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Rendered(RouteMatch),
    /// Guard is waiting on the session; nothing rendered yet
    Pending { path: String },
}

pub struct Navigator {
    session: SessionHandle,
    paths: GuardPaths,
    history: History,
}

impl Navigator {
    pub fn new(session: SessionHandle, paths: GuardPaths) -> Self {
        Self {
            session,
            paths,
            history: History::new("/"),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> &str {
        self.history.current()
    }

    pub fn navigate(&mut self, path: &str) -> Result<NavigationOutcome, NavigationError> {
        let path = normalize(path)?;
        let before = self.history.clone();
        self.history.push(path.as_str());
        self.settle_or_restore(before)
    }

    /// Re-run the guard for the current entry, e.g. after a session change.
    pub fn refresh(&mut self) -> Result<NavigationOutcome, NavigationError> {
        let before = self.history.clone();
        self.settle_or_restore(before)
    }

    pub fn back(&mut self) -> Option<Result<NavigationOutcome, NavigationError>> {
        let before = self.history.clone();
        self.history.back()?;
        Some(self.settle_or_restore(before))
    }

    pub fn forward(&mut self) -> Option<Result<NavigationOutcome, NavigationError>> {
        let before = self.history.clone();
        self.history.forward()?;
        Some(self.settle_or_restore(before))
    }

    /// Navigate once the session has resolved. Waits indefinitely.
    pub async fn navigate_when_resolved(
        &mut self,
        path: &str,
    ) -> Result<NavigationOutcome, NavigationError> {
        self.session.resolved().await;
        self.navigate(path)
    }

    /// Re-run the guard for the current entry once the session has resolved.
    pub async fn settle_when_resolved(&mut self) -> Result<NavigationOutcome, NavigationError> {
        self.session.resolved().await;
        self.refresh()
    }

    /// Settle the current entry; a failed navigation leaves history as
    /// it was before.
    fn settle_or_restore(
        &mut self,
        before: History,
    ) -> Result<NavigationOutcome, NavigationError> {
        let outcome = self.settle();
        if outcome.is_err() {
            self.history = before;
        }
        outcome
    }

    fn settle(&mut self) -> Result<NavigationOutcome, NavigationError> {
        let session = self.session.snapshot();
        let origin = self.history.current().to_string();

        for _ in 0..=MAX_REDIRECTS {
            let route = resolve(self.history.current());
            match route.access.check(&session, &self.paths) {
                GuardOutcome::Render => return Ok(NavigationOutcome::Rendered(route)),
                GuardOutcome::Placeholder => {
                    return Ok(NavigationOutcome::Pending { path: route.path })
                }
                GuardOutcome::Redirect { to, replace } => {
                    let to = normalize(&to)?;
                    debug!(from = %route.path, to = %to, "guard redirect");
                    metrics::record_redirect(&to);
                    if replace {
                        self.history.replace(to);
                    } else {
                        self.history.push(to);
                    }
                }
            }
        }

        Err(NavigationError::RedirectLoop {
            path: origin,
            hops: MAX_REDIRECTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SharedToken;
    use crate::domain::{AuthPayload, Identity, LoginInput, Preferences, Role};
    use crate::routing::Page;
    use crate::state::session::MockAuthBackend;
    use crate::state::SessionStore;

    fn identity(role: Role) -> Identity {
        Identity {
            id: "u1".to_string(),
            email: "ada@example.com".to_string(),
            name: None,
            role,
            preferences: Preferences::default(),
        }
    }

    fn page(outcome: NavigationOutcome) -> Page {
        match outcome {
            NavigationOutcome::Rendered(route) => route.page,
            other => panic!("expected a rendered page, got {other:?}"),
        }
    }

    async fn store_with(role: Option<Role>) -> SessionStore<MockAuthBackend> {
        let mut backend = MockAuthBackend::new();
        let token = match role {
            Some(role) => {
                backend
                    .expect_current_user()
                    .returning(move || Ok(identity(role)));
                SharedToken::new(Some("t".into()))
            }
            None => SharedToken::default(),
        };
        let store = SessionStore::new(backend, token);
        store.initialize().await;
        store
    }

    #[test]
    fn test_history_push_truncates_forward_entries() {
        let mut history = History::new("/");
        history.push("/a");
        history.push("/b");
        assert_eq!(history.back(), Some("/a"));
        history.push("/c");
        assert_eq!(history.entries(), ["/", "/a", "/c"]);
        assert_eq!(history.forward(), None);
        assert_eq!(history.back(), Some("/a"));
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_history_replace() {
        let mut history = History::new("/");
        history.push("/dashboard");
        history.replace("/login");
        assert_eq!(history.entries(), ["/", "/login"]);
        assert_eq!(history.current(), "/login");
    }

    #[tokio::test]
    async fn test_pending_while_loading() {
        let store = SessionStore::new(MockAuthBackend::new(), SharedToken::default());
        let mut nav = Navigator::new(store.handle(), GuardPaths::default());

        let outcome = nav.navigate("/admin/feature-flags").unwrap();
        assert_eq!(
            outcome,
            NavigationOutcome::Pending {
                path: "/admin/feature-flags".to_string()
            }
        );

        // Open routes do not wait
        assert_eq!(page(nav.navigate("/blog").unwrap()), Page::BlogList);
    }

    #[tokio::test]
    async fn test_anonymous_dashboard_to_login_and_back_after_sign_in() {
        let mut backend = MockAuthBackend::new();
        backend.expect_login().returning(|_| {
            Ok(AuthPayload {
                token: "fresh".to_string(),
                user: identity(Role::User),
            })
        });
        let store = SessionStore::new(backend, SharedToken::default());
        store.initialize().await;
        let mut nav = Navigator::new(store.handle(), GuardPaths::default());

        assert_eq!(page(nav.navigate("/dashboard").unwrap()), Page::Login);
        assert_eq!(nav.current(), "/login");
        assert!(!nav.history().entries().iter().any(|e| e == "/dashboard"));

        store
            .login(&LoginInput {
                email: "ada@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(page(nav.refresh().unwrap()), Page::Dashboard);
        assert_eq!(nav.history().entries(), ["/", "/dashboard"]);
        assert!(!nav.history().entries().iter().any(|e| e == "/login"));
    }

    #[tokio::test]
    async fn test_role_downgrade_lands_on_dashboard() {
        let store = store_with(Some(Role::Admin)).await;
        let mut nav = Navigator::new(store.handle(), GuardPaths::default());

        assert_eq!(page(nav.navigate("/admin/qstash").unwrap()), Page::Dashboard);
        assert_eq!(nav.current(), "/dashboard");
    }

    #[tokio::test]
    async fn test_super_admin_reaches_admin_pages() {
        let store = store_with(Some(Role::SuperAdmin)).await;
        let mut nav = Navigator::new(store.handle(), GuardPaths::default());

        let outcome = nav.navigate("/admin/feature-flags/").unwrap();
        assert_eq!(page(outcome), Page::FeatureFlags);
    }

    #[tokio::test]
    async fn test_back_reevaluates_guard() {
        let mut backend = MockAuthBackend::new();
        backend
            .expect_current_user()
            .returning(|| Ok(identity(Role::User)));
        backend.expect_logout().returning(|| Ok(()));
        let store = SessionStore::new(backend, SharedToken::new(Some("t".into())));
        store.initialize().await;

        let mut nav = Navigator::new(store.handle(), GuardPaths::default());
        nav.navigate("/notes").unwrap();
        nav.navigate("/blog").unwrap();

        store.logout().await;
        let outcome = nav.back().unwrap().unwrap();
        assert_eq!(page(outcome), Page::Login);
    }

    #[tokio::test]
    async fn test_redirect_loop_is_an_error() {
        let store = store_with(Some(Role::User)).await;
        let paths = GuardPaths {
            landing: "/login".to_string(),
            login: "/login".to_string(),
        };
        let mut nav = Navigator::new(store.handle(), paths);
        assert_eq!(page(nav.navigate("/blog").unwrap()), Page::BlogList);

        let err = nav.navigate("/register").unwrap_err();
        assert_eq!(
            err,
            NavigationError::RedirectLoop {
                path: "/register".to_string(),
                hops: MAX_REDIRECTS
            }
        );
        // History is left as it was before the failed navigation
        assert_eq!(nav.history().entries(), ["/", "/blog"]);
        assert_eq!(nav.current(), "/blog");
    }

    #[tokio::test]
    async fn test_redirect_loop_on_back_keeps_cursor() {
        let mut backend = MockAuthBackend::new();
        backend
            .expect_current_user()
            .returning(|| Ok(identity(Role::User)));
        backend.expect_logout().returning(|| Ok(()));
        let store = SessionStore::new(backend, SharedToken::new(Some("t".into())));
        store.initialize().await;

        // Signed out, the login route is itself gated
        let paths = GuardPaths {
            landing: "/dashboard".to_string(),
            login: "/dashboard".to_string(),
        };
        let mut nav = Navigator::new(store.handle(), paths);
        nav.navigate("/notes").unwrap();
        nav.navigate("/blog").unwrap();

        store.logout().await;
        let err = nav.back().unwrap().unwrap_err();
        assert!(matches!(err, NavigationError::RedirectLoop { .. }));
        assert_eq!(nav.history().entries(), ["/", "/notes", "/blog"]);
        assert_eq!(nav.current(), "/blog");
    }

    #[tokio::test]
    async fn test_invalid_path() {
        let store = store_with(None).await;
        let mut nav = Navigator::new(store.handle(), GuardPaths::default());
        assert!(matches!(
            nav.navigate("dashboard"),
            Err(NavigationError::InvalidPath(_))
        ));
        assert_eq!(nav.history().entries(), ["/"]);
    }

    #[tokio::test]
    async fn test_navigate_when_resolved_waits_for_session() {
        let mut backend = MockAuthBackend::new();
        backend
            .expect_current_user()
            .returning(|| Ok(identity(Role::SuperAdmin)));
        let store = SessionStore::new(backend, SharedToken::new(Some("t".into())));
        let mut nav = Navigator::new(store.handle(), GuardPaths::default());

        let (outcome, _) = tokio::join!(
            nav.navigate_when_resolved("/admin/qstash"),
            store.initialize()
        );
        assert_eq!(page(outcome.unwrap()), Page::TaskQueue);
    }
}
