//! Menu composition
//!
//! A pure function of role, flags and current path. Catalogs are filtered
//! and concatenated, never mutated.

use super::catalog::{NavEntry, ADMIN_CATALOG, BASE_CATALOG};
use crate::domain::{FeatureFlagSet, Role, Session, QSTASH_FLAG};
use crate::error::NavigationError;
use crate::routing::normalize;
use serde::Serialize;
use std::collections::HashSet;

/// Inputs to [`compose`]
#[derive(Debug, Clone)]
pub struct NavContext<'a> {
    /// `None` for signed-out or still-loading sessions
    pub role: Option<Role>,
    pub flags: &'a FeatureFlagSet,
    pub current_path: &'a str,
    pub landing_path: &'a str,
}

impl<'a> NavContext<'a> {
    /// Context for a session snapshot. Loading sessions carry no role.
    pub fn for_session(
        session: &Session,
        flags: &'a FeatureFlagSet,
        current_path: &'a str,
        landing_path: &'a str,
    ) -> Self {
        let role = if session.is_loading || !session.is_authenticated {
            None
        } else {
            session.role()
        };
        Self {
            role,
            flags,
            current_path,
            landing_path,
        }
    }

    fn is_privileged(&self) -> bool {
        self.role.is_some_and(Role::is_privileged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedEntry {
    #[serde(flatten)]
    pub entry: NavEntry,
    pub active: bool,
}

/// Header block shown above the admin entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSection {
    pub title: &'static str,
    pub badges: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationMenu {
    pub entries: Vec<ComposedEntry>,
    /// Present only for the privileged role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_section: Option<AdminSection>,
}

impl NavigationMenu {
    pub fn hrefs(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.entry.href).collect()
    }

    pub fn active(&self) -> Option<&ComposedEntry> {
        self.entries.iter().find(|e| e.active)
    }
}

/// Exact match, or prefix match for anything but the landing entry.
pub fn is_active(href: &str, current_path: &str, landing_path: &str) -> bool {
    current_path == href || (href != landing_path && current_path.starts_with(href))
}

fn visible(entry: &NavEntry, ctx: &NavContext<'_>) -> bool {
    if entry.admin_only && !ctx.is_privileged() {
        return false;
    }
    entry
        .required_flag
        .map_or(true, |flag| ctx.flags.is_enabled(flag))
}

/// Build the menu from a base and an admin catalog.
pub fn compose(base: &[NavEntry], admin: &[NavEntry], ctx: &NavContext<'_>) -> NavigationMenu {
    let admin: &[NavEntry] = if ctx.is_privileged() { admin } else { &[] };

    let mut seen = HashSet::new();
    let entries = base
        .iter()
        .chain(admin)
        .filter(|entry| visible(entry, ctx))
        .filter(|entry| seen.insert(entry.href))
        .map(|entry| ComposedEntry {
            entry: *entry,
            active: is_active(entry.href, ctx.current_path, ctx.landing_path),
        })
        .collect();

    let admin_section = ctx.is_privileged().then(|| AdminSection {
        title: "Super Administration",
        badges: if ctx.flags.is_enabled(QSTASH_FLAG) {
            vec!["QStash Active"]
        } else {
            Vec::new()
        },
    });

    NavigationMenu {
        entries,
        admin_section,
    }
}

/// [`compose`] over the built-in catalogs
pub fn compose_default(ctx: &NavContext<'_>) -> NavigationMenu {
    compose(BASE_CATALOG, ADMIN_CATALOG, ctx)
}

/// Menu for a raw location such as `/dashboard/?tab=1`, normalized the way
/// the navigator normalizes it before matching.
pub fn menu_for_path(
    session: &Session,
    flags: &FeatureFlagSet,
    path: &str,
    landing_path: &str,
) -> Result<NavigationMenu, NavigationError> {
    let path = normalize(path)?;
    let ctx = NavContext::for_session(session, flags, &path, landing_path);
    Ok(compose_default(&ctx))
}
