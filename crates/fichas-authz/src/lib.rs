//! Role-based authorization core for the fichas dashboard.
//!
//! # Purpose
//! Decides who may do what across the dashboard's protected resources
//! (fichas, budgets, documents, reports, ...). It holds the compiled-in policy
//! table, normalizes raw role tokens, and evaluates permission checks.
//!
//! # How it fits
//! The identity provider hands out sessions carrying a raw role string. Route
//! guards and navigation filters turn that into a [`Principal`] and ask
//! [`has_role_permission`] (or [`has_permission`] for grant lists cached on the
//! session). Everything here is pure and synchronous.
//!
//! # Key invariants
//! - Unknown or missing roles resolve to [`Role::Viewer`]; the legacy token
//!   `usuario` does too.
//! - `SuperAdmin` is allowed everything, stored as the single grant `*:admin`.
//! - Both checks are default-deny.
//! - Resource-scoped `admin` implies every level only in the grant-list form.
//!
//! # Examples
//! ```rust
//! use fichas_authz::{PermissionLevel, Principal, Resource, Role};
//!
//! let principal = Principal::from_session_json(r#"{"user":{"role":"manager","centerId":"c-1"}}"#)
//!     .expect("session");
//! assert_eq!(principal.role(), Role::Manager);
//! assert!(principal.can(&Resource::ROLES, PermissionLevel::Read));
//! assert!(!principal.can(&Resource::ROLES, PermissionLevel::Write));
//! ```
//!
//! # Common pitfalls
//! - Calling `Role::from_str` on session data skips the legacy alias and the
//!   viewer fallback. Go through [`normalize_role`].
//! - Assuming `admin` on a resource implies `read` in [`has_role_permission`].

mod errors;
mod evaluate;
mod grant;
mod level;
mod normalize;
mod policy;
mod principal;
mod resource;
mod role;

pub use errors::{AuthzError, AuthzResult};
pub use evaluate::{
    AuthQuery, expand_role_permissions, get_role_permissions, has_all_permissions,
    has_any_permission, has_permission, has_role_permission,
};
pub use grant::{Grant, GrantSet};
pub use level::PermissionLevel;
pub use normalize::{LEGACY_USER_ROLE, is_legacy_alias, normalize_role};
pub use policy::PolicyTable;
pub use principal::{Principal, SessionClaims, SessionSource, SessionUser, TenantId};
pub use resource::Resource;
pub use role::Role;
