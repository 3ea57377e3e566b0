//! Fine-grained permission enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use deskgate_core::AppError;

/// A named action a principal may be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // Workspaces
    /// Provision a new workspace.
    WorkspaceCreate,
    /// Tear down a workspace.
    WorkspaceDelete,

    // Blueprints
    /// Publish a workspace blueprint.
    BlueprintCreate,

    // Budgets
    /// Change a team budget.
    BudgetUpdate,
    /// Provision past an exhausted budget.
    BudgetOverride,

    // Audit
    /// Read the audit trail.
    AuditRead,

    // Users
    /// Grant or revoke roles on other users.
    UserAssignRole,
}

impl Permission {
    /// Every defined permission.
    pub const ALL: [Permission; 7] = [
        Self::WorkspaceCreate,
        Self::WorkspaceDelete,
        Self::BlueprintCreate,
        Self::BudgetUpdate,
        Self::BudgetOverride,
        Self::AuditRead,
        Self::UserAssignRole,
    ];

    /// Return the permission as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkspaceCreate => "workspace_create",
            Self::WorkspaceDelete => "workspace_delete",
            Self::BlueprintCreate => "blueprint_create",
            Self::BudgetUpdate => "budget_update",
            Self::BudgetOverride => "budget_override",
            Self::AuditRead => "audit_read",
            Self::UserAssignRole => "user_assign_role",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| AppError::validation(format!("Invalid permission: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrips_every_name() {
        for permission in Permission::ALL {
            assert_eq!(permission.as_str().parse::<Permission>().unwrap(), permission);
        }
        assert_eq!(
            "Budget_Override".parse::<Permission>().unwrap(),
            Permission::BudgetOverride
        );
        assert!("workspace_nuke".parse::<Permission>().is_err());
    }
}
