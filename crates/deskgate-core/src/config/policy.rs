//! Role policy configuration.
//!
//! When `roles` is empty the built-in grant tables are used. When present it
//! replaces them wholesale; names are resolved and validated by the policy
//! engine once at startup and frozen afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Optional override of the role grant tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Role name → grants.
    #[serde(default)]
    pub roles: BTreeMap<String, RoleGrantConfig>,
}

impl PolicyConfig {
    /// Whether the built-in tables should be used.
    pub fn is_builtin(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Grants for a single role, by wire name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleGrantConfig {
    /// Permission names, e.g. `"workspace_create"`.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Bundle type names, e.g. `"STANDARD"`.
    #[serde(default)]
    pub bundles: Vec<String>,
}
