//! Grant and grant-set primitives.
//!
//! # Purpose
//! Defines the `(resource, level)` pair the whole model is built from, its
//! `resource:level` string form, and a materialized set of grants.
//!
//! # How it fits
//! The policy table flattens into grants, sessions cache grant lists as
//! strings, and the list-form evaluator checks a requested grant against a
//! [`GrantSet`].
//!
//! # Key invariants
//! - Grant strings are `resource:level`; the level is the segment after the
//!   last colon.
//! - The resource segment is never empty. [`Resource`] refuses empty names,
//!   so every `Grant` value serializes to a string that deserializes back.
//!
//! # Examples
//! ```rust
//! use fichas_authz::{Grant, PermissionLevel, Resource};
//!
//! let grant = Grant::new(Resource::FICHAS, PermissionLevel::Write);
//! assert_eq!(grant.to_string(), "fichas:write");
//! assert_eq!(Grant::parse("fichas:write").expect("parse"), grant);
//! ```
//!
//! # Common pitfalls
//! - Writing the level first (`write:fichas`) fails with
//!   [`crate::AuthzError::InvalidLevel`].
use crate::{AuthzError, AuthzResult, PermissionLevel, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Permission to perform `level` on `resource`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Grant {
    pub resource: Resource,
    pub level: PermissionLevel,
}

impl Grant {
    pub fn new(resource: Resource, level: PermissionLevel) -> Self {
        Self { resource, level }
    }

    /// The super-grant: `Admin` on every resource.
    pub fn super_admin() -> Self {
        Self::new(Resource::WILDCARD, PermissionLevel::Admin)
    }

    pub fn is_super_admin(&self) -> bool {
        self.resource.is_wildcard() && self.level == PermissionLevel::Admin
    }

    /// Render the grant as `resource:level`.
    ///
    /// # Performance
    /// - Allocates a new `String` each call.
    pub fn as_string(&self) -> String {
        format!("{}:{}", self.resource, self.level)
    }

    /// Parse a `resource:level` string.
    ///
    /// # Errors
    /// - [`AuthzError::InvalidGrant`] if the colon or the resource is missing.
    /// - [`AuthzError::InvalidLevel`] if the level is unknown.
    pub fn parse(value: &str) -> AuthzResult<Self> {
        value.parse()
    }
}

impl std::str::FromStr for Grant {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (resource, level) = value
            .rsplit_once(':')
            .ok_or_else(|| AuthzError::InvalidGrant(value.to_string()))?;
        let resource = Resource::new(resource.to_string())
            .map_err(|_| AuthzError::InvalidGrant(value.to_string()))?;
        let level = PermissionLevel::parse(level)?;
        Ok(Self::new(resource, level))
    }
}

impl std::fmt::Display for Grant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource, self.level)
    }
}

impl TryFrom<String> for Grant {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grant> for String {
    fn from(grant: Grant) -> Self {
        grant.as_string()
    }
}

/// A materialized, de-duplicated set of grants.
///
/// Typically built from a grant list cached on a session, then queried with
/// [`GrantSet::allows`] which applies the list-form rules of
/// [`crate::has_permission`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantSet {
    grants: HashSet<Grant>,
}

impl GrantSet {
    pub fn new(grants: impl IntoIterator<Item = Grant>) -> Self {
        Self {
            grants: grants.into_iter().collect(),
        }
    }

    pub fn from_strings(grants: &[String]) -> AuthzResult<Self> {
        let mut parsed = HashSet::with_capacity(grants.len());
        for grant in grants {
            parsed.insert(grant.parse()?);
        }
        Ok(Self { grants: parsed })
    }

    pub fn contains(&self, grant: &Grant) -> bool {
        self.grants.contains(grant)
    }

    pub fn allows(&self, required: &Grant) -> bool {
        crate::evaluate::set_allows(&self.grants, required)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grant> {
        self.grants.iter()
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl FromIterator<Grant> for GrantSet {
    fn from_iter<I: IntoIterator<Item = Grant>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a GrantSet {
    type Item = &'a Grant;
    type IntoIter = std::collections::hash_set::Iter<'a, Grant>;

    fn into_iter(self) -> Self::IntoIter {
        self.grants.iter()
    }
}
