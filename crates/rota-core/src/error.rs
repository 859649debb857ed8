//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Rota.
///
/// Upstream failures are fatal to a request, cache failures are absorbed by
/// the cache gateway, and everything else maps onto a server error.
#[derive(Error, Debug)]
pub enum RotaError {
    /// Invalid inbound request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream scheduling API error
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RotaError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::ExternalService { .. } => 502,
            Self::Configuration(_) | Self::Cache(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an upstream error for the named service.
    #[must_use]
    pub fn external<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Message safe to return to API clients.
    ///
    /// Only validation errors echo their detail; the rest stay generic and
    /// are logged in full by the caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(message) => format!("Validation error: {}", message),
            Self::ExternalService { .. } => "Upstream service request failed".to_string(),
            Self::Configuration(_) | Self::Cache(_) | Self::Internal(_) | Self::Other(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Checks if this error came from the upstream scheduling API.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::ExternalService { .. })
    }
}

impl From<serde_json::Error> for RotaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `RotaError`.
    #[must_use]
    pub fn from_error(error: &RotaError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.public_message(),
        }
    }
}

impl From<&RotaError> for ErrorResponse {
    fn from(error: &RotaError) -> Self {
        Self::from_error(error)
    }
}
