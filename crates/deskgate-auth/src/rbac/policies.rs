//! Role-to-permission and role-to-bundle grant tables.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use deskgate_core::config::PolicyConfig;
use deskgate_core::error::AppError;

use crate::model::{BundleType, Permission, Role};

/// Built-in tables, constructed on first use and never mutated.
static BUILTIN: LazyLock<Arc<PolicyTables>> = LazyLock::new(|| Arc::new(PolicyTables::new()));

/// Grant tables mapping each role to what it allows.
///
/// Grants are additive only: there is no deny entry, and every role present
/// in a table grants at least one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTables {
    /// Role → set of permissions.
    permissions: HashMap<Role, HashSet<Permission>>,
    /// Role → set of bundle types.
    bundles: HashMap<Role, HashSet<BundleType>>,
}

impl PolicyTables {
    /// Creates the default grant tables.
    pub fn new() -> Self {
        let mut permissions = HashMap::new();
        let mut bundles = HashMap::new();

        // Contractor: provision only, on the general purpose bundles
        let contractor_perms = HashSet::from([Permission::WorkspaceCreate]);
        let contractor_bundles = HashSet::from([BundleType::Standard, BundleType::Performance]);

        // Engineer: contractor + delete workspaces, publish blueprints, compute and GPU
        let mut engineer_perms = contractor_perms.clone();
        engineer_perms.insert(Permission::WorkspaceDelete);
        engineer_perms.insert(Permission::BlueprintCreate);
        let mut engineer_bundles = contractor_bundles.clone();
        engineer_bundles.insert(BundleType::Power);
        engineer_bundles.insert(BundleType::GraphicsG4dn);

        // Team lead: engineer + budgets, audit, large GPU
        let mut team_lead_perms = engineer_perms.clone();
        team_lead_perms.insert(Permission::BudgetUpdate);
        team_lead_perms.insert(Permission::AuditRead);
        let mut team_lead_bundles = engineer_bundles.clone();
        team_lead_bundles.insert(BundleType::GraphicsProG4dn);

        permissions.insert(Role::Contractor, contractor_perms);
        permissions.insert(Role::Engineer, engineer_perms);
        permissions.insert(Role::TeamLead, team_lead_perms);
        bundles.insert(Role::Contractor, contractor_bundles);
        bundles.insert(Role::Engineer, engineer_bundles);
        bundles.insert(Role::TeamLead, team_lead_bundles);

        // Admin: everything
        permissions.insert(Role::Admin, Permission::ALL.into_iter().collect());
        bundles.insert(Role::Admin, BundleType::ALL.into_iter().collect());

        Self {
            permissions,
            bundles,
        }
    }

    /// Returns the process-wide built-in tables.
    pub fn builtin() -> Arc<PolicyTables> {
        Arc::clone(&BUILTIN)
    }

    /// Builds tables from configuration, or returns the built-in tables when
    /// the configuration does not override them.
    ///
    /// An override replaces the whole table, so it must list every role.
    /// Unknown role, permission, or bundle names, missing roles, and roles
    /// that grant nothing are rejected.
    pub fn from_config(config: &PolicyConfig) -> Result<Arc<PolicyTables>, AppError> {
        if config.is_builtin() {
            return Ok(Self::builtin());
        }

        let mut permissions = HashMap::new();
        let mut bundles = HashMap::new();

        for (name, grants) in &config.roles {
            let role: Role = name
                .parse()
                .map_err(|e: AppError| AppError::configuration(e.message))?;

            let role_perms = grants
                .permissions
                .iter()
                .map(|p| p.parse::<Permission>())
                .collect::<Result<HashSet<_>, _>>()
                .map_err(|e| AppError::configuration(format!("Role '{role}': {}", e.message)))?;
            let role_bundles = grants
                .bundles
                .iter()
                .map(|b| b.parse::<BundleType>())
                .collect::<Result<HashSet<_>, _>>()
                .map_err(|e| AppError::configuration(format!("Role '{role}': {}", e.message)))?;

            if role_perms.is_empty() || role_bundles.is_empty() {
                return Err(AppError::configuration(format!(
                    "Role '{role}' must grant at least one permission and one bundle type"
                )));
            }

            permissions.insert(role, role_perms);
            bundles.insert(role, role_bundles);
        }

        let missing: Vec<&str> = Role::ALL
            .iter()
            .filter(|role| !permissions.contains_key(*role))
            .map(|role| role.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::configuration(format!(
                "Grant table override is missing roles: {}",
                missing.join(", ")
            )));
        }

        tracing::info!(roles = permissions.len(), "Loaded role grant tables from configuration");

        Ok(Arc::new(Self {
            permissions,
            bundles,
        }))
    }

    /// Returns the set of permissions for the given role.
    ///
    /// A role absent from the table grants nothing.
    pub fn permissions_for_role(&self, role: &Role) -> HashSet<Permission> {
        self.permissions.get(role).cloned().unwrap_or_default()
    }

    /// Returns the set of bundle types for the given role.
    pub fn bundles_for_role(&self, role: &Role) -> HashSet<BundleType> {
        self.bundles.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn role_has_permission(&self, role: &Role, permission: &Permission) -> bool {
        self.permissions
            .get(role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }

    /// Checks whether the given role may use the specified bundle type.
    pub fn role_has_bundle(&self, role: &Role, bundle: &BundleType) -> bool {
        self.bundles
            .get(role)
            .map(|b| b.contains(bundle))
            .unwrap_or(false)
    }

    /// Roles that have an entry in the tables.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.permissions.keys().copied().collect();
        roles.sort();
        roles
    }
}

impl Default for PolicyTables {
    fn default() -> Self {
        Self::new()
    }
}
