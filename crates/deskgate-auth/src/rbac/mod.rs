//! Role-based access control: static grant tables and the engine that
//! resolves multi-role queries against them.

pub mod engine;
pub mod policies;

pub use engine::{PolicyEngine, parse_roles};
pub use policies::PolicyTables;
