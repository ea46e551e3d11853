//! Portal roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by an authenticated identity.
///
/// Role strings the client does not know deserialize to [`Role::Unknown`],
/// which never satisfies a role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    #[default]
    User,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// The role that unlocks admin-only routes and navigation
    pub const PRIVILEGED: Role = Role::SuperAdmin;

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::User => "user",
            Role::Unknown => "unknown",
        }
    }

    pub fn is_privileged(self) -> bool {
        self == Self::PRIVILEGED
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "super-admin" => Role::SuperAdmin,
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Unknown,
        })
    }
}
