//! Convenience result type alias for DeskGate.

use crate::error::AppError;

/// A specialized `Result` type for DeskGate operations.
pub type AppResult<T> = Result<T, AppError>;
