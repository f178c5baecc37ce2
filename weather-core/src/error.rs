use std::error::Error as _;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the single outbound call and of decoding its body.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Invalid WeatherAPI.com base URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to send request to WeatherAPI.com: {0}")]
    Request(String),

    #[error("WeatherAPI.com request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to read WeatherAPI.com response body: {0}")]
    Body(String),

    #[error("Failed to parse WeatherAPI.com JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    pub(crate) fn request(err: reqwest::Error) -> Self {
        Self::Request(describe(err))
    }

    pub(crate) fn body(err: reqwest::Error) -> Self {
        Self::Body(describe(err))
    }
}

/// Flatten a reqwest error and its sources into one line.
///
/// The URL is stripped first since it carries the API key.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Outcome taxonomy of a lookup: bad input, or anything that went wrong upstream.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please provide either city or lat & lon")]
    MissingParameters,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
