//! Provisionable resource tier enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use deskgate_core::AppError;

/// A compute bundle a workspace can be provisioned on.
///
/// Wire names are upper case (`"GRAPHICSPRO_G4DN"`); parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BundleType {
    /// General purpose, 2 vCPU.
    #[serde(rename = "STANDARD")]
    Standard,
    /// General purpose, 2 vCPU with more memory.
    #[serde(rename = "PERFORMANCE")]
    Performance,
    /// Compute optimised, 4 vCPU.
    #[serde(rename = "POWER")]
    Power,
    /// Compute optimised, 8 vCPU.
    #[serde(rename = "POWERPRO")]
    PowerPro,
    /// Single GPU, g4dn family.
    #[serde(rename = "GRAPHICS_G4DN")]
    GraphicsG4dn,
    /// Large GPU, g4dn family.
    #[serde(rename = "GRAPHICSPRO_G4DN")]
    GraphicsProG4dn,
}

impl BundleType {
    /// Every defined bundle type.
    pub const ALL: [BundleType; 6] = [
        Self::Standard,
        Self::Performance,
        Self::Power,
        Self::PowerPro,
        Self::GraphicsG4dn,
        Self::GraphicsProG4dn,
    ];

    /// Return the bundle type as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Performance => "PERFORMANCE",
            Self::Power => "POWER",
            Self::PowerPro => "POWERPRO",
            Self::GraphicsG4dn => "GRAPHICS_G4DN",
            Self::GraphicsProG4dn => "GRAPHICSPRO_G4DN",
        }
    }
}

impl fmt::Display for BundleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BundleType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == normalized)
            .ok_or_else(|| AppError::validation(format!("Invalid bundle type: '{s}'")))
    }
}
