//! Static navigation catalogs

use crate::domain::QSTASH_FLAG;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Dashboard,
    Notes,
    Blog,
    Globe,
    Code,
    Users,
    User,
    Settings,
    Flask,
    Flag,
    Queue,
}

/// Which catalog an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Base,
    Admin,
}

/// One menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: Icon,
    /// Visible only to the privileged role
    pub admin_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    /// Visible only while this feature flag is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_flag: Option<&'static str>,
    pub section: Section,
}

const fn base(label: &'static str, href: &'static str, icon: Icon) -> NavEntry {
    NavEntry {
        label,
        href,
        icon,
        admin_only: false,
        badge: None,
        required_flag: None,
        section: Section::Base,
    }
}

pub const SUPER_ADMIN_BADGE: &str = "Super Admin";

pub const BASE_CATALOG: &[NavEntry] = &[
    base("Dashboard", "/dashboard", Icon::Dashboard),
    base("Notes", "/notes", Icon::Notes),
    NavEntry {
        admin_only: true,
        badge: Some(SUPER_ADMIN_BADGE),
        ..base("Blog Admin", "/admin/blog", Icon::Blog)
    },
    base("Public Blog", "/blog", Icon::Globe),
    base("Examples", "/examples", Icon::Code),
    base("Accounts", "/accounts", Icon::Users),
    base("Profile", "/profile", Icon::User),
    base("Settings", "/settings", Icon::Settings),
    base("Test Suite", "/test", Icon::Flask),
];

pub const ADMIN_CATALOG: &[NavEntry] = &[
    NavEntry {
        label: "Feature Flags",
        href: "/admin/feature-flags",
        icon: Icon::Flag,
        admin_only: true,
        badge: Some(SUPER_ADMIN_BADGE),
        required_flag: None,
        section: Section::Admin,
    },
    NavEntry {
        label: "Task Queue",
        href: "/admin/qstash",
        icon: Icon::Queue,
        admin_only: true,
        badge: Some("QStash"),
        required_flag: Some(QSTASH_FLAG),
        section: Section::Admin,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{resolve, Page};
    use std::collections::HashSet;

    #[test]
    fn test_hrefs_are_unique() {
        let hrefs: HashSet<_> = BASE_CATALOG
            .iter()
            .chain(ADMIN_CATALOG)
            .map(|e| e.href)
            .collect();
        assert_eq!(hrefs.len(), BASE_CATALOG.len() + ADMIN_CATALOG.len());
    }

    #[test]
    fn test_every_entry_points_at_a_route() {
        for entry in BASE_CATALOG.iter().chain(ADMIN_CATALOG) {
            assert_ne!(resolve(entry.href).page, Page::NotFound, "{}", entry.href);
        }
    }

    #[test]
    fn test_sections() {
        assert!(BASE_CATALOG.iter().all(|e| e.section == Section::Base));
        assert!(ADMIN_CATALOG
            .iter()
            .all(|e| e.section == Section::Admin && e.admin_only));
    }
}
