//! Result type aliases for Rota.

use crate::RotaError;

/// A specialized `Result` type for Rota operations.
pub type RotaResult<T> = Result<T, RotaError>;
