//! API error responses
//!
//! Two payload shapes only: `{error, message}` for bad input (400) and
//! `{error, details}` for anything that failed upstream (500).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use weather_core::LookupError;

pub const MISSING_PARAMETERS: &str = "Missing parameters";
pub const MISSING_PARAMETERS_MESSAGE: &str = "Please provide either city or lat & lon";
pub const FETCH_FAILED: &str = "Failed to fetch weather";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}: {}", MISSING_PARAMETERS, MISSING_PARAMETERS_MESSAGE)]
    MissingParameters,

    #[error("{}: {}", FETCH_FAILED, .0)]
    FetchFailed(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameters => StatusCode::BAD_REQUEST,
            Self::FetchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorResponse {
        match self {
            Self::MissingParameters => ErrorResponse {
                error: MISSING_PARAMETERS.to_string(),
                message: Some(MISSING_PARAMETERS_MESSAGE.to_string()),
                details: None,
            },
            Self::FetchFailed(details) => ErrorResponse {
                error: FETCH_FAILED.to_string(),
                message: None,
                details: Some(details.clone()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::MissingParameters => Self::MissingParameters,
            LookupError::Upstream(e) => Self::FetchFailed(e.to_string()),
        }
    }
}
