//! Layout chrome driven by the session's menu preference

use crate::domain::{MenuLayout, Session};
use serde::Serialize;

/// Which menu surfaces the main layout shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeLayout {
    pub show_sidebar: bool,
    pub show_header_menu: bool,
    /// Header stays pinned to the top while scrolling
    pub header_fixed: bool,
}

pub fn chrome(session: &Session) -> ChromeLayout {
    let header_layout = session.menu_layout() == MenuLayout::Header;
    let show_sidebar = session.is_authenticated && !header_layout;
    let show_header_menu = !session.is_authenticated || header_layout;

    ChromeLayout {
        show_sidebar,
        show_header_menu,
        header_fixed: show_header_menu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, Preferences, Role};

    fn signed_in(layout: MenuLayout) -> Session {
        Session::authenticated(Identity {
            id: "u1".into(),
            email: "a@example.com".into(),
            name: None,
            role: Role::User,
            preferences: Preferences {
                menu_layout: layout,
                theme: None,
            },
        })
    }

    #[test]
    fn test_signed_out_uses_header() {
        let layout = chrome(&Session::anonymous());
        assert!(!layout.show_sidebar);
        assert!(layout.show_header_menu);
        assert!(layout.header_fixed);
    }

    #[test]
    fn test_sidebar_preference() {
        assert_eq!(
            chrome(&signed_in(MenuLayout::Sidebar)),
            ChromeLayout {
                show_sidebar: true,
                show_header_menu: false,
                header_fixed: false,
            }
        );
    }

    #[test]
    fn test_header_preference() {
        assert_eq!(
            chrome(&signed_in(MenuLayout::Header)),
            ChromeLayout {
                show_sidebar: false,
                show_header_menu: true,
                header_fixed: true,
            }
        );
    }
}
