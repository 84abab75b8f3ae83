//! Convenience result type alias for vsphere-folder.

use crate::error::AppError;

/// A specialized `Result` type for vsphere-folder operations.
pub type AppResult<T> = Result<T, AppError>;
