//! # deskgate-core
//!
//! Core crate for DeskGate. Contains the configuration schemas and the
//! unified error system shared by the credential and policy crates.
//!
//! This crate has **no** internal dependencies on other DeskGate crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
