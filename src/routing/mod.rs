//! Client-side routing: route table, access guards and the navigator

pub mod guard;
pub mod navigator;
pub mod table;

pub use guard::{evaluate, Access, GuardOutcome, GuardPaths, Verdict};
pub use navigator::{History, NavigationOutcome, Navigator, MAX_REDIRECTS};
pub use table::{normalize, resolve, Page, RouteDef, RouteMatch, ROUTES};
