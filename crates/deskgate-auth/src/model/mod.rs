//! Closed vocabularies shared by the credential and policy components.

pub mod bundle;
pub mod permission;
pub mod role;

pub use bundle::BundleType;
pub use permission::Permission;
pub use role::Role;
