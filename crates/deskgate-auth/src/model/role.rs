//! Identity role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use deskgate_core::AppError;

/// Coarse identity classification used to look up permission and bundle grants.
///
/// Roles carry no hierarchy of their own; a principal holding several roles
/// is granted the union of what each role grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Time-bound external worker.
    Contractor,
    /// Regular engineering staff.
    Engineer,
    /// Engineer with budget and audit responsibilities.
    TeamLead,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Every defined role.
    pub const ALL: [Role; 4] = [Self::Contractor, Self::Engineer, Self::TeamLead, Self::Admin];

    /// Return the role as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contractor => "contractor",
            Self::Engineer => "engineer",
            Self::TeamLead => "team_lead",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contractor" => Ok(Self::Contractor),
            "engineer" => Ok(Self::Engineer),
            "team_lead" => Ok(Self::TeamLead),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: contractor, engineer, team_lead, admin"
            ))),
        }
    }
}
