//! Route table and path matching

use super::guard::Access;
use crate::domain::Role;
use crate::error::NavigationError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Page rendered for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    Login,
    Register,
    BlogList,
    BlogPost,
    Examples,
    Dashboard,
    Notes,
    NoteNew,
    NoteDetail,
    NoteEdit,
    BlogAdmin,
    BlogAdminNew,
    BlogAdminEdit,
    FeatureFlags,
    TaskQueue,
    Profile,
    Settings,
    Accounts,
    TestTools,
    NotFound,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    /// Slash-separated pattern; `:name` segments capture a parameter
    pub pattern: &'static str,
    pub page: Page,
    pub access: Access,
}

const fn route(pattern: &'static str, page: Page, access: Access) -> RouteDef {
    RouteDef {
        pattern,
        page,
        access,
    }
}

pub const ROUTES: &[RouteDef] = &[
    route("/", Page::Home, Access::Open),
    route("/login", Page::Login, Access::PublicOnly),
    route("/register", Page::Register, Access::PublicOnly),
    route("/blog", Page::BlogList, Access::Open),
    route("/blog/:slug", Page::BlogPost, Access::Open),
    route("/examples", Page::Examples, Access::Open),
    route("/dashboard", Page::Dashboard, Access::RequireAuth),
    route("/notes", Page::Notes, Access::RequireAuth),
    route("/notes/new", Page::NoteNew, Access::RequireAuth),
    route("/notes/:id", Page::NoteDetail, Access::RequireAuth),
    route("/notes/:id/edit", Page::NoteEdit, Access::RequireAuth),
    route("/admin/blog", Page::BlogAdmin, Access::RequireAuth),
    route("/admin/blog/new", Page::BlogAdminNew, Access::RequireAuth),
    route("/admin/blog/:slug/edit", Page::BlogAdminEdit, Access::RequireAuth),
    route(
        "/admin/feature-flags",
        Page::FeatureFlags,
        Access::RequireRole(Role::PRIVILEGED),
    ),
    route(
        "/admin/qstash",
        Page::TaskQueue,
        Access::RequireRole(Role::PRIVILEGED),
    ),
    route("/profile", Page::Profile, Access::RequireAuth),
    route("/settings", Page::Settings, Access::RequireAuth),
    route("/accounts", Page::Accounts, Access::RequireAuth),
    route("/test", Page::TestTools, Access::RequireAuth),
];

/// A resolved route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: String,
    pub page: Page,
    pub access: Access,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Canonical form of a location: no query or fragment, no empty or
/// trailing segments.
pub fn normalize(path: &str) -> Result<String, NavigationError> {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    if !path.starts_with('/') {
        return Err(NavigationError::InvalidPath(path.to_string()));
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(NavigationError::InvalidPath(path.to_string()));
    }
    Ok(format!("/{}", segments.join("/")))
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Match a pattern; returns the captured params and the number of literal
/// segments (used to prefer `/notes/new` over `/notes/:id`).
fn match_pattern(pattern: &str, path: &[&str]) -> Option<(BTreeMap<String, String>, usize)> {
    let pattern = segments(pattern);
    if pattern.len() != path.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    let mut literals = 0;
    for (want, got) in pattern.iter().zip(path) {
        if let Some(name) = want.strip_prefix(':') {
            params.insert(name.to_string(), (*got).to_string());
        } else if want == got {
            literals += 1;
        } else {
            return None;
        }
    }
    Some((params, literals))
}

/// Resolve a normalized path against [`ROUTES`]. Unknown paths resolve to
/// the open not-found page.
pub fn resolve(path: &str) -> RouteMatch {
    let parts = segments(path);

    let best = ROUTES
        .iter()
        .filter_map(|def| match_pattern(def.pattern, &parts).map(|(p, lit)| (def, p, lit)))
        .max_by_key(|(_, _, literals)| *literals);

    match best {
        Some((def, params, _)) => RouteMatch {
            path: path.to_string(),
            page: def.page,
            access: def.access,
            params,
        },
        None => RouteMatch {
            path: path.to_string(),
            page: Page::NotFound,
            access: Access::Open,
            params: BTreeMap::new(),
        },
    }
}
