//! Application state shared across handlers

use std::sync::Arc;

use weather_core::{Config, WeatherLookup};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Lookup service, built once from the startup configuration
    pub lookup: Arc<WeatherLookup>,
}

impl AppState {
    pub fn new(lookup: WeatherLookup) -> Self {
        Self { lookup: Arc::new(lookup) }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(WeatherLookup::from_config(config)?))
    }
}
