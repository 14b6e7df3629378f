//! API-level error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// One variant per externally observable failure outcome.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client-supplied data failed validation; reported without contacting
    /// the provider.
    #[error("{0}")]
    InvalidRequest(String),

    /// Credential missing or rejected by the provider. Operator-actionable,
    /// retrying will not help until the configuration is fixed.
    #[error("provider credential missing or rejected: {0}")]
    ProviderAuth(String),

    /// Transient transport or provider failure; the caller may retry.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider call exceeded the configured bound.
    #[error("provider call exceeded {0} second timeout")]
    ProviderTimeout(u64),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::ProviderAuth(_) => "provider_auth",
            ApiError::ProviderUnavailable(_) => "provider_unavailable",
            ApiError::ProviderTimeout(_) => "provider_timeout",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ProviderAuth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::ProviderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
