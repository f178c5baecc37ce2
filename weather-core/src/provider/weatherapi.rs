use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{document::ForecastDocument, error::UpstreamError, model::Subject};

use super::WeatherProvider;

/// Days of forecast requested on every call.
pub const FORECAST_DAYS: u8 = 3;

#[derive(Clone)]
pub struct WeatherApiProvider {
    base_url: String,
    api_key: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, api_key: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), api_key: api_key.into(), http }
    }

    /// `{base}/forecast.json?key=..&q=..&days=3&aqi=no&alerts=yes`, with query values encoded.
    pub fn forecast_url(&self, subject: &Subject) -> Result<Url, UpstreamError> {
        let endpoint = format!("{}/forecast.json", self.base_url.trim_end_matches('/'));
        let q = subject.to_string();
        let days = FORECAST_DAYS.to_string();

        Url::parse_with_params(
            &endpoint,
            &[
                ("key", self.api_key.as_str()),
                ("q", q.as_str()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "yes"),
            ],
        )
        .map_err(|e| UpstreamError::InvalidUrl(format!("{endpoint}: {e}")))
    }
}

impl fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self, subject), fields(subject = %subject))]
    async fn forecast(&self, subject: &Subject) -> Result<ForecastDocument, UpstreamError> {
        let url = self.forecast_url(subject)?;

        let res = self.http.get(url).send().await.map_err(UpstreamError::request)?;

        let status = res.status();
        let body = res.text().await.map_err(UpstreamError::body)?;
        debug!(%status, bytes = body.len(), "WeatherAPI.com responded");

        if !status.is_success() {
            return Err(UpstreamError::Status { status, message: error_message(&body) });
        }

        Ok(ForecastDocument::from_json(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    error: WaErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WaErrorDetail {
    message: String,
}

/// Prefer the provider's own `{"error": {"message": ..}}` over the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<WaErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
