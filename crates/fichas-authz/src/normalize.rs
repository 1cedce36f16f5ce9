//! Role normalization for raw session tokens.
//!
//! # Purpose
//! Turns whatever the identity boundary hands us into a canonical [`Role`].
//!
//! # Key invariants
//! - Normalization never fails. Unknown, empty, or missing tokens resolve to
//!   [`Role::Viewer`], the least privileged role.
//! - The legacy token `usuario` maps to `Viewer`. The match is exact: no
//!   trimming, no case folding.
//! - The fallback path logs a warning and nothing else; the returned role does
//!   not depend on the subscriber.
use crate::Role;

/// Historical role token still issued by older sessions.
pub const LEGACY_USER_ROLE: &str = "usuario";

pub fn is_legacy_alias(raw: &str) -> bool {
    raw == LEGACY_USER_ROLE
}

/// Resolve a raw role token to a canonical role.
///
/// # Examples
/// ```rust
/// use fichas_authz::{Role, normalize_role};
///
/// assert_eq!(normalize_role(Some("editor")), Role::Editor);
/// assert_eq!(normalize_role(Some("usuario")), Role::Viewer);
/// assert_eq!(normalize_role(Some("root")), Role::Viewer);
/// assert_eq!(normalize_role(None), Role::Viewer);
/// ```
pub fn normalize_role(raw: Option<&str>) -> Role {
    let Some(raw) = raw else {
        tracing::warn!("missing role token, defaulting to viewer");
        return Role::Viewer;
    };
    if is_legacy_alias(raw) {
        return Role::Viewer;
    }
    match raw.parse::<Role>() {
        Ok(role) => role,
        Err(_) => {
            tracing::warn!(role = %raw, "unrecognized role token, defaulting to viewer");
            Role::Viewer
        }
    }
}
