use crate::{AuthzError, AuthzResult};
use serde::{Deserialize, Serialize};

/// Operation a grant allows on a resource.
///
/// Levels are independent grants: `Write` does not imply `Read`. The single
/// exception is `Admin`, which implies every level on the same resource when
/// checked through [`crate::has_permission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Read,
    Write,
    Delete,
    Admin,
}

impl PermissionLevel {
    pub const ALL: [PermissionLevel; 4] = [
        PermissionLevel::Read,
        PermissionLevel::Write,
        PermissionLevel::Delete,
        PermissionLevel::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::Read => "read",
            PermissionLevel::Write => "write",
            PermissionLevel::Delete => "delete",
            PermissionLevel::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> AuthzResult<Self> {
        value.parse()
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PermissionLevel {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(PermissionLevel::Read),
            "write" => Ok(PermissionLevel::Write),
            "delete" => Ok(PermissionLevel::Delete),
            "admin" => Ok(PermissionLevel::Admin),
            _ => Err(AuthzError::InvalidLevel(value.to_string())),
        }
    }
}
