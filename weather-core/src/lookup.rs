use std::sync::Arc;

use tracing::{error, instrument};

use crate::{
    Config,
    error::LookupError,
    model::{LocationQuery, NormalizedWeather},
    provider::{WeatherProvider, provider_from_config},
};

/// Validates a location, makes the single upstream call and normalizes the result.
///
/// Holds no per-request state, so one instance is shared by every request.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookup {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider_from_config(config)?))
    }

    /// Either the full normalized weather or one of the two error kinds; never a partial result.
    #[instrument(skip(self))]
    pub async fn lookup(&self, query: &LocationQuery) -> Result<NormalizedWeather, LookupError> {
        let subject = query.subject()?;

        let document = self.provider.forecast(&subject).await.inspect_err(|e| {
            error!(error = %e, %subject, "Failed to fetch weather");
        })?;

        Ok(NormalizedWeather::from(document))
    }
}
