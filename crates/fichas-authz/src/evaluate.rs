//! Authorization decisions.
//!
//! # Purpose
//! Answers "may this holder perform `level` on `resource`?" in the two forms
//! the dashboard calls it with:
//! - against a materialized grant list, see [`has_permission`];
//! - against the policy table for a role, see [`has_role_permission`].
//!
//! # Key invariants
//! - Both forms are default-deny and never fail for typed input.
//! - The list form treats `resource:admin` as every level on that resource.
//!   The table form does not; it is an exact membership test. The two are
//!   kept separate on purpose and must not be unified.
//!
//! # Examples
//! ```rust
//! use fichas_authz::{Grant, PermissionLevel, Resource, Role, has_permission, has_role_permission};
//!
//! let grants = vec![Grant::new(Resource::USERS, PermissionLevel::Admin)];
//! let delete_users = Grant::new(Resource::USERS, PermissionLevel::Delete);
//! assert!(has_permission(&grants, &delete_users));
//!
//! assert!(has_role_permission(Role::Editor, &Resource::FICHAS, PermissionLevel::Write));
//! assert!(!has_role_permission(Role::Manager, &Resource::ROLES, PermissionLevel::Write));
//! ```
use crate::{Grant, PermissionLevel, PolicyTable, Resource, Role};
use std::collections::HashSet;

fn grant_satisfies(held: &Grant, required: &Grant) -> bool {
    if held.is_super_admin() {
        return true;
    }
    if held.resource.is_wildcard() {
        return held.level == required.level;
    }
    held.resource == required.resource
        && (held.level == required.level || held.level == PermissionLevel::Admin)
}

/// List-form check against an already materialized set of grants.
///
/// Allowed when the set holds any of:
/// 1. `*:admin`;
/// 2. `required` itself;
/// 3. `admin` on `required.resource`;
/// 4. `required.level` on `*`.
pub fn has_permission<'a, I>(grants: I, required: &Grant) -> bool
where
    I: IntoIterator<Item = &'a Grant>,
{
    grants
        .into_iter()
        .any(|held| grant_satisfies(held, required))
}

/// Same rules as [`has_permission`], using hash lookups instead of a scan.
pub(crate) fn set_allows(grants: &HashSet<Grant>, required: &Grant) -> bool {
    grants.contains(&Grant::super_admin())
        || grants.contains(required)
        || grants.contains(&Grant::new(
            required.resource.clone(),
            PermissionLevel::Admin,
        ))
        || grants.contains(&Grant::new(Resource::WILDCARD, required.level))
}

/// True when at least one of `required` is allowed by `grants`.
pub fn has_any_permission(grants: &[Grant], required: &[Grant]) -> bool {
    required
        .iter()
        .any(|grant| has_permission(grants, grant))
}

/// True when every one of `required` is allowed by `grants`. An empty
/// requirement list is trivially satisfied.
pub fn has_all_permissions(grants: &[Grant], required: &[Grant]) -> bool {
    required
        .iter()
        .all(|grant| has_permission(grants, grant))
}

/// Table-form check against the built-in policy table.
///
/// `SuperAdmin` is always allowed. Every other role is allowed only when the
/// table row for `resource` lists `level` itself: holding `admin` on a
/// resource does **not** imply `read`, `write` or `delete` here, unlike
/// [`has_permission`].
pub fn has_role_permission(role: Role, resource: &Resource, level: PermissionLevel) -> bool {
    has_role_permission_in(PolicyTable::builtin(), role, resource, level)
}

/// [`has_role_permission`] against an explicit table.
pub(crate) fn has_role_permission_in(
    table: &PolicyTable,
    role: Role,
    resource: &Resource,
    level: PermissionLevel,
) -> bool {
    if role.is_super_admin() {
        return true;
    }
    table.contains(role, resource, level)
}

/// A role's grants in compact form.
///
/// `SuperAdmin` yields exactly `[*:admin]`; other roles yield one grant per
/// level per resource, grouped by resource then level. Treat the result as a
/// set.
pub fn get_role_permissions(role: Role) -> Vec<Grant> {
    if role.is_super_admin() {
        return vec![Grant::super_admin()];
    }
    PolicyTable::builtin().grants(role)
}

/// A role's grants with the super-grant spelled out over the known
/// resources and every level.
pub fn expand_role_permissions(role: Role) -> Vec<Grant> {
    if !role.is_super_admin() {
        return get_role_permissions(role);
    }
    Resource::known()
        .iter()
        .flat_map(|resource| {
            PermissionLevel::ALL
                .into_iter()
                .map(move |level| Grant::new(resource.clone(), level))
        })
        .collect()
}

/// An authorization question in either calling convention.
#[derive(Debug, Clone, Copy)]
pub enum AuthQuery<'a> {
    ByGrantList {
        grants: &'a [Grant],
        required: &'a Grant,
    },
    ByRoleTable {
        role: Role,
        resource: &'a Resource,
        level: PermissionLevel,
    },
}

impl AuthQuery<'_> {
    pub fn evaluate(&self) -> bool {
        match *self {
            AuthQuery::ByGrantList { grants, required } => has_permission(grants, required),
            AuthQuery::ByRoleTable {
                role,
                resource,
                level,
            } => has_role_permission(role, resource, level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GrantSet;
    use PermissionLevel::{Admin, Delete, Read, Write};

    fn grant(resource: &'static str, level: PermissionLevel) -> Grant {
        Grant::new(Resource::new(resource).expect("resource"), level)
    }

    #[test]
    fn list_form_super_grant_short_circuits() {
        let grants = vec![Grant::super_admin()];
        assert!(has_permission(&grants, &grant("payroll", Delete)));
        assert!(has_permission(&grants, &grant("*", Read)));
    }

    #[test]
    fn list_form_exact_match() {
        let grants = vec![grant("fichas", Write)];
        assert!(has_permission(&grants, &grant("fichas", Write)));
        assert!(!has_permission(&grants, &grant("fichas", Read)));
        assert!(!has_permission(&grants, &grant("budget", Write)));
    }

    #[test]
    fn list_form_resource_admin_implies_levels_on_that_resource_only() {
        let grants = vec![grant("users", Admin)];
        for level in PermissionLevel::ALL {
            assert!(has_permission(&grants, &grant("users", level)));
        }
        assert!(!has_permission(&grants, &grant("roles", Read)));
    }

    #[test]
    fn list_form_wildcard_level_matches_any_resource() {
        let grants = vec![grant("*", Read)];
        assert!(has_permission(&grants, &grant("documents", Read)));
        assert!(has_permission(&grants, &grant("payroll", Read)));
        assert!(!has_permission(&grants, &grant("documents", Write)));
        assert!(!has_permission(&grants, &grant("documents", Admin)));
    }

    #[test]
    fn list_form_write_does_not_imply_read() {
        let grants = vec![grant("budget", Write), grant("budget", Delete)];
        assert!(!has_permission(&grants, &grant("budget", Read)));
    }

    #[test]
    fn list_form_empty_denies() {
        let grants: Vec<Grant> = Vec::new();
        assert!(!has_permission(&grants, &grant("fichas", Read)));
    }

    #[test]
    fn grant_set_matches_list_form() {
        let held = vec![grant("users", Admin), grant("*", Read), grant("fichas", Write)];
        let set = GrantSet::new(held.clone());
        let mut requests = Vec::new();
        for resource in ["users", "fichas", "budget", "*"] {
            for level in PermissionLevel::ALL {
                requests.push(grant(resource, level));
            }
        }
        for request in requests {
            assert_eq!(set.allows(&request), has_permission(&held, &request), "{request}");
        }
    }

    #[test]
    fn any_and_all_helpers() {
        let held = vec![grant("reports", Read), grant("budget", Write)];
        let wanted = vec![grant("reports", Write), grant("budget", Write)];
        assert!(has_any_permission(&held, &wanted));
        assert!(!has_all_permissions(&held, &wanted));
        assert!(has_all_permissions(&held, &wanted[1..]));
        assert!(has_all_permissions(&held, &[]));
        assert!(!has_any_permission(&held, &[]));
    }

    #[test]
    fn table_form_does_not_infer_from_admin() {
        let mut table = PolicyTable::default();
        let users = Resource::USERS;
        table.insert(Role::Admin, users.clone(), &[Admin]);
        assert!(has_role_permission_in(&table, Role::Admin, &users, Admin));
        assert!(!has_role_permission_in(&table, Role::Admin, &users, Read));

        let grants = table.grants(Role::Admin);
        assert!(has_permission(&grants, &Grant::new(users, Read)));
    }

    #[test]
    fn table_form_super_admin_ignores_table() {
        let table = PolicyTable::default();
        assert!(has_role_permission_in(
            &table,
            Role::SuperAdmin,
            &Resource::new("anything").expect("resource"),
            Delete
        ));
    }

    #[test]
    fn expanded_super_admin_covers_known_universe() {
        let expanded = expand_role_permissions(Role::SuperAdmin);
        assert_eq!(
            expanded.len(),
            Resource::known().len() * PermissionLevel::ALL.len()
        );
        assert!(expanded.contains(&grant("centers", Delete)));
        assert!(!expanded.iter().any(|g| g.resource.is_wildcard()));
        assert_eq!(
            expand_role_permissions(Role::Manager),
            get_role_permissions(Role::Manager)
        );
    }

    #[test]
    fn auth_query_dispatches_to_both_forms() {
        let held = vec![grant("users", Admin)];
        let required = grant("users", Read);
        let by_list = AuthQuery::ByGrantList {
            grants: &held,
            required: &required,
        };
        assert!(by_list.evaluate());

        let by_table = AuthQuery::ByRoleTable {
            role: Role::Manager,
            resource: &Resource::ROLES,
            level: Write,
        };
        assert!(!by_table.evaluate());
    }
}
