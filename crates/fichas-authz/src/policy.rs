//! Compiled-in role policy table.
//!
//! # Purpose and responsibility
//! Holds the static mapping from [`Role`] to the levels it holds on each
//! resource.
//!
//! # Key invariants and assumptions
//! - `SuperAdmin` is stored as the single compact grant `*:admin`; the
//!   evaluator expands it.
//! - Every other role lists each level explicitly. A resource-scoped `admin`
//!   entry does not imply the other levels for table lookups, so rows that
//!   grant `admin` also list `read`, `write` and `delete` when they mean them.
//! - A missing row or resource means zero grants.
//!
//! # Security considerations
//! - The table is read-only after first use. Edits are a deployment event.
use crate::{Grant, PermissionLevel, Resource, Role};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

use crate::PermissionLevel::{Admin as A, Delete as D, Read as R, Write as W};

type Levels = BTreeSet<PermissionLevel>;

static BUILTIN: OnceLock<PolicyTable> = OnceLock::new();
static NO_LEVELS: Levels = BTreeSet::new();

// Built-in matrix; one row per resource, `&[]` is an explicit denial.
const ADMIN_ROWS: &[(Resource, &[PermissionLevel])] = &[
    (Resource::USERS, &[R, W, D, A]),
    (Resource::ROLES, &[R, W, D, A]),
    (Resource::DOCUMENTS, &[R, W, D, A]),
    (Resource::SETTINGS, &[R, W, A]),
    (Resource::FICHAS, &[R, W, D, A]),
    (Resource::HISTORY, &[R]),
    (Resource::FINANCES, &[R, W, D]),
    (Resource::REPORTS, &[R, W, D]),
    (Resource::BUDGET, &[R, W, D]),
    (Resource::CENTERS, &[]),
];

const MANAGER_ROWS: &[(Resource, &[PermissionLevel])] = &[
    (Resource::USERS, &[R]),
    (Resource::ROLES, &[R]),
    (Resource::DOCUMENTS, &[R, W, D]),
    (Resource::SETTINGS, &[R]),
    (Resource::FICHAS, &[R, W, D]),
    (Resource::HISTORY, &[R]),
    (Resource::FINANCES, &[R, W]),
    (Resource::REPORTS, &[R, W]),
    (Resource::BUDGET, &[R, W]),
    (Resource::CENTERS, &[R]),
];

const EDITOR_ROWS: &[(Resource, &[PermissionLevel])] = &[
    (Resource::USERS, &[]),
    (Resource::ROLES, &[]),
    (Resource::DOCUMENTS, &[R, W]),
    (Resource::SETTINGS, &[]),
    (Resource::FICHAS, &[R, W]),
    (Resource::HISTORY, &[R]),
    (Resource::FINANCES, &[R]),
    (Resource::REPORTS, &[R]),
    (Resource::BUDGET, &[R]),
    (Resource::CENTERS, &[R]),
];

const VIEWER_ROWS: &[(Resource, &[PermissionLevel])] = &[
    (Resource::USERS, &[]),
    (Resource::ROLES, &[]),
    (Resource::DOCUMENTS, &[]),
    (Resource::SETTINGS, &[]),
    (Resource::FICHAS, &[]),
    (Resource::HISTORY, &[]),
    (Resource::FINANCES, &[]),
    (Resource::REPORTS, &[]),
    (Resource::BUDGET, &[]),
    (Resource::CENTERS, &[]),
];

/// Role to per-resource levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyTable {
    roles: HashMap<Role, BTreeMap<Resource, Levels>>,
}

impl PolicyTable {
    /// The table compiled into this binary, built on first use.
    pub fn builtin() -> &'static PolicyTable {
        BUILTIN.get_or_init(Self::build_builtin)
    }

    fn build_builtin() -> Self {
        let mut table = Self::default();
        table.insert(Role::SuperAdmin, Resource::WILDCARD, &[A]);
        for (role, rows) in [
            (Role::Admin, ADMIN_ROWS),
            (Role::Manager, MANAGER_ROWS),
            (Role::Editor, EDITOR_ROWS),
            (Role::Viewer, VIEWER_ROWS),
        ] {
            for (resource, levels) in rows {
                table.insert(role, resource.clone(), levels);
            }
        }
        table
    }

    pub(crate) fn insert(&mut self, role: Role, resource: Resource, levels: &[PermissionLevel]) {
        self.roles
            .entry(role)
            .or_default()
            .entry(resource)
            .or_default()
            .extend(levels.iter().copied());
    }

    /// Levels `role` holds on `resource`; empty when the row is absent.
    ///
    /// Raw row lookup. `SuperAdmin` only has the `*` row, so this is empty
    /// for it on any named resource. Use [`crate::has_role_permission`] for
    /// decisions.
    pub fn levels(&self, role: Role, resource: &Resource) -> &BTreeSet<PermissionLevel> {
        self.roles
            .get(&role)
            .and_then(|rows| rows.get(resource))
            .unwrap_or(&NO_LEVELS)
    }

    /// Exact membership test with no level implication.
    ///
    /// Does not apply the `SuperAdmin` bypass; decisions go through
    /// [`crate::has_role_permission`].
    pub fn contains(&self, role: Role, resource: &Resource, level: PermissionLevel) -> bool {
        self.levels(role, resource).contains(&level)
    }

    /// Resources listed for `role`, including explicitly empty rows.
    pub fn resources(&self, role: Role) -> impl Iterator<Item = &Resource> {
        self.roles.get(&role).into_iter().flat_map(|rows| rows.keys())
    }

    /// Flatten a role's rows into grants, grouped by resource then level.
    pub fn grants(&self, role: Role) -> Vec<Grant> {
        let Some(rows) = self.roles.get(&role) else {
            return Vec::new();
        };
        rows.iter()
            .flat_map(|(resource, levels)| {
                levels
                    .iter()
                    .map(move |level| Grant::new(resource.clone(), *level))
            })
            .collect()
    }
}
