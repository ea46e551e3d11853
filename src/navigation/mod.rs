//! Navigation menus and layout chrome

pub mod catalog;
pub mod composer;
pub mod layout;

pub use catalog::{Icon, NavEntry, Section, ADMIN_CATALOG, BASE_CATALOG};
pub use composer::{
    compose, compose_default, is_active, menu_for_path, AdminSection, ComposedEntry, NavContext,
    NavigationMenu,
};
pub use layout::{chrome, ChromeLayout};
