//! Principal adapter for the identity boundary.
//!
//! # Purpose
//! Carries what the session provider gives us (a raw role token and an
//! optional tenant/center id) and funnels it through normalization before any
//! decision is made.
//!
//! # How it fits
//! Route guards and navigation filters build a [`Principal`] per request and
//! ask it `can(resource, level)`. Nothing here fetches or refreshes sessions.
//!
//! # Key invariants
//! - The raw role is kept verbatim; [`Principal::role`] normalizes on read.
//! - Malformed session JSON is rejected here; unknown roles are not errors.
use crate::{AuthzResult, Grant, PermissionLevel, Resource, Role};
use crate::{get_role_permissions, has_role_permission, normalize_role};
use serde::{Deserialize, Serialize};

/// Tenant (center) identifier wrapper.
///
/// # Summary
/// Newtype around the center id carried on the session.
///
/// # Invariants
/// - The inner string is preserved exactly.
///
/// # Example
/// ```rust
/// use fichas_authz::TenantId;
///
/// let center = TenantId::new("center-7");
/// assert_eq!(center.as_str(), "center-7");
/// assert_eq!(center.to_string(), "center-7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Construct a new tenant ID wrapper.
    ///
    /// # Parameters
    /// - `value`: raw center identifier from the session.
    ///
    /// # Returns
    /// - A new [`TenantId`].
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the inner center string.
    ///
    /// # Returns
    /// - The raw center identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything a principal can be read from.
pub trait SessionSource {
    fn raw_role(&self) -> Option<&str>;
    fn tenant_id(&self) -> Option<&str>;
}

/// Session payload as issued by the dashboard's identity provider.
///
/// Only the fields the authorization core reads are modelled; everything
/// else in the payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "centerId", alias = "tenantId")]
    pub center_id: Option<String>,
}

impl SessionSource for SessionClaims {
    fn raw_role(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.role.as_deref())
    }

    fn tenant_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.center_id.as_deref())
    }
}

/// Authenticated caller as seen by the authorization core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub raw_role: Option<String>,
    pub tenant_id: Option<TenantId>,
}

impl Principal {
    pub fn new(raw_role: Option<String>, tenant_id: Option<TenantId>) -> Self {
        Self {
            raw_role,
            tenant_id,
        }
    }

    pub fn from_session(session: &impl SessionSource) -> Self {
        Self {
            raw_role: session.raw_role().map(str::to_string),
            tenant_id: session.tenant_id().map(TenantId::new),
        }
    }

    /// Parse the JSON session shape `{"user": {"role": .., "centerId": ..}}`.
    ///
    /// # Errors
    /// - [`crate::AuthzError::InvalidSession`] when the payload is not valid
    ///   JSON for that shape.
    pub fn from_session_json(payload: &str) -> AuthzResult<Self> {
        let claims: SessionClaims = serde_json::from_str(payload)?;
        Ok(Self::from_session(&claims))
    }

    pub fn role(&self) -> Role {
        normalize_role(self.raw_role.as_deref())
    }

    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }

    /// Table-form decision for this principal's normalized role.
    pub fn can(&self, resource: &Resource, level: PermissionLevel) -> bool {
        let role = self.role();
        let allowed = has_role_permission(role, resource, level);
        tracing::debug!(
            %role,
            %resource,
            permission = %level,
            tenant = self.tenant_id.as_ref().map(TenantId::as_str).unwrap_or("-"),
            allowed,
            "authorization decision"
        );
        allowed
    }

    pub fn can_any(&self, resource: &Resource, levels: &[PermissionLevel]) -> bool {
        levels.iter().any(|level| self.can(resource, *level))
    }

    pub fn can_read(&self, resource: &Resource) -> bool {
        self.can(resource, PermissionLevel::Read)
    }

    pub fn can_write(&self, resource: &Resource) -> bool {
        self.can(resource, PermissionLevel::Write)
    }

    pub fn can_delete(&self, resource: &Resource) -> bool {
        self.can(resource, PermissionLevel::Delete)
    }

    pub fn can_manage(&self, resource: &Resource) -> bool {
        self.can(resource, PermissionLevel::Admin)
    }

    /// Compact grant list for this principal's role.
    pub fn permissions(&self) -> Vec<Grant> {
        get_role_permissions(self.role())
    }
}

impl SessionSource for Principal {
    fn raw_role(&self) -> Option<&str> {
        self.raw_role.as_deref()
    }

    fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_ref().map(TenantId::as_str)
    }
}
