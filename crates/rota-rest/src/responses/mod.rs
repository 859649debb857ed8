//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rota_core::{ErrorResponse, RotaError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Envelope used for error bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorResponse,
}

impl ErrorBody {
    /// Wraps an error response in the failure envelope.
    #[must_use]
    pub fn new(error: ErrorResponse) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub RotaError);

impl From<RotaError> for AppError {
    fn from(err: RotaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed with {}: {}", status.as_u16(), self.0);
        } else {
            debug!("Request rejected with {}: {}", status.as_u16(), self.0);
        }

        let body = Json(ErrorBody::new(ErrorResponse::from_error(&self.0)));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_maps_to_bad_gateway() {
        let response = AppError(RotaError::external("planning-center", "HTTP 401")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        let response = AppError(RotaError::validation("bad query")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = ErrorBody::new(ErrorResponse {
            code: "EXTERNAL_SERVICE_ERROR".to_string(),
            message: "boom".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["message"], "boom");
    }
}
