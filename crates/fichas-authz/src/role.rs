//! Canonical dashboard roles.
//!
//! # Purpose
//! Enumerates the five roles the policy table is keyed by.
//!
//! # Key invariants
//! - Tokens are exact and case-sensitive (`superadmin`, `admin`, `manager`,
//!   `editor`, `viewer`).
//! - Only `SuperAdmin` dominates the others; `Manager` and `Editor` are not
//!   comparable across every resource, so `Role` deliberately has no `Ord`.
//!
//! # Common pitfalls
//! - `FromStr` is strict and does not know the legacy `usuario` alias. Use
//!   [`crate::normalize_role`] for anything that comes off a session.
use crate::{AuthzError, AuthzResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Editor,
    Viewer,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Editor,
        Role::Viewer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    pub fn is_super_admin(self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Strict parse of a canonical token.
    pub fn parse(value: &str) -> AuthzResult<Self> {
        value.parse()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "superadmin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            _ => Err(AuthzError::InvalidRole(value.to_string())),
        }
    }
}
