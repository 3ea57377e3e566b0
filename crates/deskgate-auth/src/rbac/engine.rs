//! Policy resolution: answers permission and bundle entitlement queries for a
//! set of roles.
//!
//! Every query returns a definite `bool`. A principal's grants are the union
//! of its roles' grants, so adding a role can only widen access. When a
//! separate credential expiry is supplied and has passed, the answer is
//! `false` regardless of roles.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{BundleType, Permission, Role};

use super::policies::PolicyTables;

/// Resolves authorization and entitlement decisions against frozen grant tables.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    /// The grant tables.
    tables: Arc<PolicyTables>,
}

impl PolicyEngine {
    /// Creates a new engine over the built-in tables.
    pub fn new() -> Self {
        Self {
            tables: PolicyTables::builtin(),
        }
    }

    /// Creates an engine with custom tables.
    pub fn with_tables(tables: Arc<PolicyTables>) -> Self {
        Self { tables }
    }

    /// Checks whether any of the roles grants the permission.
    ///
    /// If `credential_expiry` is at or before now, returns `false`.
    pub fn has_permission(
        &self,
        user_roles: &[Role],
        required_permission: Permission,
        credential_expiry: Option<DateTime<Utc>>,
    ) -> bool {
        self.has_permission_at(user_roles, required_permission, credential_expiry, Utc::now())
    }

    /// Same as [`PolicyEngine::has_permission`] with an explicit evaluation instant.
    pub fn has_permission_at(
        &self,
        user_roles: &[Role],
        required_permission: Permission,
        credential_expiry: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> bool {
        if let Some(expiry) = credential_expiry {
            if expiry <= now {
                tracing::debug!(
                    permission = %required_permission,
                    %expiry,
                    "Denied: credential window has closed"
                );
                return false;
            }
        }

        let allowed = user_roles
            .iter()
            .any(|role| self.tables.role_has_permission(role, &required_permission));

        if !allowed {
            tracing::debug!(
                roles = ?user_roles,
                permission = %required_permission,
                "Denied: no role grants permission"
            );
        }
        allowed
    }

    /// Returns the union of permissions granted by the roles.
    pub fn get_permissions_for_roles(&self, user_roles: &[Role]) -> HashSet<Permission> {
        user_roles
            .iter()
            .flat_map(|role| self.tables.permissions_for_role(role))
            .collect()
    }

    /// Checks whether any of the roles may provision the bundle type.
    pub fn check_bundle_access(&self, user_roles: &[Role], bundle_type: BundleType) -> bool {
        let allowed = user_roles
            .iter()
            .any(|role| self.tables.role_has_bundle(role, &bundle_type));

        if !allowed {
            tracing::debug!(
                roles = ?user_roles,
                bundle = %bundle_type,
                "Denied: no role grants bundle type"
            );
        }
        allowed
    }

    /// Returns the union of bundle types the roles may provision.
    pub fn get_allowed_bundle_types(&self, user_roles: &[Role]) -> HashSet<BundleType> {
        user_roles
            .iter()
            .flat_map(|role| self.tables.bundles_for_role(role))
            .collect()
    }

    /// Returns a reference to the underlying tables.
    pub fn tables(&self) -> &PolicyTables {
        &self.tables
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses role names from an untrusted source.
///
/// Unknown names are dropped with a warning, so they contribute no grants.
pub fn parse_roles<S: AsRef<str>>(names: &[S]) -> Vec<Role> {
    names
        .iter()
        .filter_map(|name| match name.as_ref().parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                tracing::warn!(role = name.as_ref(), "Ignoring unknown role");
                None
            }
        })
        .collect()
}
