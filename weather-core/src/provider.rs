use crate::{Config, document::ForecastDocument, error::UpstreamError, model::Subject};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Source of forecast documents: one outbound call per invocation, no retries.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn forecast(&self, subject: &Subject) -> Result<ForecastDocument, UpstreamError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    Ok(Arc::new(WeatherApiProvider::new(config.provider.base_url.clone(), api_key)))
}
