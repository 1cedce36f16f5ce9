//! Protected resource identifiers.
//!
//! # Purpose
//! Names the entity classes the dashboard protects (`users`, `fichas`,
//! `budget`, ...) plus the `*` wildcard that stands for all of them.
//!
//! # How it fits
//! The policy table is keyed by these values, and grants pair one of them
//! with a [`crate::PermissionLevel`].
//!
//! # Key invariants
//! - Resources are opaque; an identifier missing from [`Resource::known`] is
//!   legal and simply has no grants.
//! - The name is never empty. [`Resource::new`] and deserialization reject
//!   `""`, so every grant renders to a `resource:level` string that parses
//!   back.
//! - Only the exact token `*` is a wildcard. There is no glob matching on
//!   prefixes such as `fich*`.
//!
//! # Examples
//! ```rust
//! use fichas_authz::Resource;
//!
//! let fichas = Resource::new("fichas").expect("resource");
//! assert_eq!(fichas, Resource::FICHAS);
//! assert!(Resource::new("").is_err());
//! assert!(Resource::wildcard().is_wildcard());
//! ```
use crate::{AuthzError, AuthzResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

static KNOWN_RESOURCES: [Resource; 10] = [
    Resource::USERS,
    Resource::ROLES,
    Resource::DOCUMENTS,
    Resource::SETTINGS,
    Resource::FICHAS,
    Resource::HISTORY,
    Resource::FINANCES,
    Resource::REPORTS,
    Resource::BUDGET,
    Resource::CENTERS,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resource(Cow<'static, str>);

impl Resource {
    /// Token meaning "every resource".
    pub const WILDCARD: Resource = Resource::from_static("*");

    pub const USERS: Resource = Resource::from_static("users");
    pub const ROLES: Resource = Resource::from_static("roles");
    pub const DOCUMENTS: Resource = Resource::from_static("documents");
    pub const SETTINGS: Resource = Resource::from_static("settings");
    pub const FICHAS: Resource = Resource::from_static("fichas");
    pub const HISTORY: Resource = Resource::from_static("history");
    pub const FINANCES: Resource = Resource::from_static("finances");
    pub const REPORTS: Resource = Resource::from_static("reports");
    pub const BUDGET: Resource = Resource::from_static("budget");
    pub const CENTERS: Resource = Resource::from_static("centers");

    /// Wrap a resource name.
    ///
    /// # Errors
    /// - [`AuthzError::InvalidResource`] if `value` is empty.
    pub fn new(value: impl Into<Cow<'static, str>>) -> AuthzResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(AuthzError::InvalidResource(value.into_owned()));
        }
        Ok(Self(value))
    }

    // Only for the non-empty constants above.
    const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    pub fn wildcard() -> Self {
        Self::WILDCARD
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resources the dashboard knows about, wildcard excluded.
    pub fn known() -> &'static [Resource] {
        &KNOWN_RESOURCES
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Resource {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value.to_string())
    }
}

impl TryFrom<String> for Resource {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.0.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::Resource;
    use crate::AuthzError;

    fn resource(name: &'static str) -> Resource {
        Resource::new(name).expect("resource")
    }

    #[test]
    fn owned_and_static_resources_compare_equal() {
        let owned = Resource::new(String::from("budget")).expect("resource");
        assert_eq!(owned, Resource::BUDGET);
        assert_eq!(owned.as_str(), "budget");
        assert_eq!(owned.to_string(), "budget");
    }

    #[test]
    fn only_star_is_wildcard() {
        assert!(Resource::WILDCARD.is_wildcard());
        assert!(resource("*").is_wildcard());
        assert!(!resource("**").is_wildcard());
        assert!(!resource("fich*").is_wildcard());
        assert!(!Resource::USERS.is_wildcard());
    }

    #[test]
    fn known_resources_exclude_wildcard() {
        let known = Resource::known();
        assert_eq!(known.len(), 10);
        assert!(known.iter().all(|resource| !resource.is_wildcard()));
        assert!(known.contains(&Resource::CENTERS));
    }

    #[test]
    fn serde_uses_plain_string() {
        let json = serde_json::to_string(&Resource::FINANCES).expect("serialize");
        assert_eq!(json, "\"finances\"");
        let parsed: Resource = serde_json::from_str("\"reports\"").expect("deserialize");
        assert_eq!(parsed, Resource::REPORTS);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Resource::new("").expect_err("empty name");
        assert!(matches!(err, AuthzError::InvalidResource(name) if name.is_empty()));
        assert!("".parse::<Resource>().is_err());
        assert!(serde_json::from_str::<Resource>("\"\"").is_err());
        assert_eq!("centers".parse::<Resource>().expect("parse"), Resource::CENTERS);
    }
}
