//! Route guards
//!
//! One guard, parameterized by an access predicate. The loading check lives
//! here once: while the session is loading every guarded route renders the
//! placeholder, whatever the identity fields say.

use crate::config::RouteConfig;
use crate::domain::{Role, Session};

/// Routes the guards redirect to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    /// Default landing route for authenticated users
    pub landing: String,
    pub login: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self::from(&RouteConfig::default())
    }
}

impl From<&RouteConfig> for GuardPaths {
    fn from(config: &RouteConfig) -> Self {
        Self {
            landing: config.landing_path.clone(),
            login: config.login_path.clone(),
        }
    }
}

/// Decision of an access predicate on a resolved session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    RedirectTo(String),
}

/// What the guarded route should do right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session still loading; no decision yet
    Placeholder,
    Render,
    /// Navigate away. `replace` keeps the guarded path out of history.
    Redirect { to: String, replace: bool },
}

/// Access requirement attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No guard at all
    Open,
    /// Only for signed-out users (login, register)
    PublicOnly,
    RequireAuth,
    RequireRole(Role),
}

impl Access {
    /// Predicate for a resolved session.
    pub fn verdict(&self, session: &Session, paths: &GuardPaths) -> Verdict {
        match self {
            Access::Open => Verdict::Allow,
            Access::PublicOnly => {
                if session.is_authenticated {
                    Verdict::RedirectTo(paths.landing.clone())
                } else {
                    Verdict::Allow
                }
            }
            Access::RequireAuth => {
                if session.is_authenticated {
                    Verdict::Allow
                } else {
                    Verdict::RedirectTo(paths.login.clone())
                }
            }
            Access::RequireRole(role) => {
                if !session.is_authenticated {
                    Verdict::RedirectTo(paths.login.clone())
                } else if session.role() != Some(*role) {
                    // Silent downgrade, not an error page
                    Verdict::RedirectTo(paths.landing.clone())
                } else {
                    Verdict::Allow
                }
            }
        }
    }

    /// Evaluate this requirement against the current session.
    ///
    /// Open routes have no guard and render even while loading.
    pub fn check(&self, session: &Session, paths: &GuardPaths) -> GuardOutcome {
        match self {
            Access::Open => GuardOutcome::Render,
            _ => evaluate(session, |s| self.verdict(s, paths)),
        }
    }

    pub fn is_guarded(&self) -> bool {
        !matches!(self, Access::Open)
    }
}

/// Run `predicate` unless the session is still loading.
pub fn evaluate<P>(session: &Session, predicate: P) -> GuardOutcome
where
    P: FnOnce(&Session) -> Verdict,
{
    if session.is_loading {
        return GuardOutcome::Placeholder;
    }

    match predicate(session) {
        Verdict::Allow => GuardOutcome::Render,
        Verdict::RedirectTo(to) => GuardOutcome::Redirect { to, replace: true },
    }
}
