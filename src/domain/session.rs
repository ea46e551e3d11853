//! Session and identity models

use super::role::Role;
use serde::{Deserialize, Serialize};

/// Where the navigation menu is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuLayout {
    #[default]
    Sidebar,
    Header,
}

/// Per-user UI preferences stored server-side
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub menu_layout: MenuLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// The authenticated user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Current authentication state of the application user.
///
/// Starts out loading; the session store is the only writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Session {
    /// Identity not resolved yet
    pub fn loading() -> Self {
        Self {
            identity: None,
            is_authenticated: false,
            is_loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            identity: None,
            is_authenticated: false,
            is_loading: false,
        }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            is_authenticated: true,
            is_loading: false,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    /// True only for a resolved, authenticated session whose identity holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        !self.is_loading && self.is_authenticated && self.role() == Some(role)
    }

    pub fn menu_layout(&self) -> MenuLayout {
        self.identity
            .as_ref()
            .map(|i| i.preferences.menu_layout)
            .unwrap_or_default()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}
