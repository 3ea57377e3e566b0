//! # deskgate-auth
//!
//! Credential issuance and role-based policy resolution for DeskGate.
//!
//! ## Modules
//!
//! - `model` — closed Role, Permission, and BundleType vocabularies
//! - `jwt` — signed access/refresh token issuance, validation, and refresh
//! - `rbac` — static grant tables and multi-role policy queries
//!
//! The two components are independent: the policy engine knows nothing about
//! tokens and the credential issuer knows nothing about permissions. Call
//! sites validate a token to recover roles, then ask the engine.

pub mod jwt;
pub mod model;
pub mod rbac;

pub use jwt::{Claims, CredentialError, CredentialIssuer, TokenPair, TokenType};
pub use model::{BundleType, Permission, Role};
pub use rbac::{PolicyEngine, PolicyTables, parse_roles};
