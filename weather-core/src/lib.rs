//! Core library for the weather lookup service.
//!
//! This crate defines:
//! - Configuration (file + environment) as an immutable value
//! - Location validation and the upstream query subject
//! - The WeatherAPI.com provider and a lenient decoder for its forecast document
//! - The normalized, frontend-facing weather schema
//!
//! It is used by `weather-server`, both by its HTTP API and its CLI.

pub mod config;
pub mod document;
pub mod error;
pub mod lookup;
pub mod model;
pub mod normalize;
pub mod provider;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use document::ForecastDocument;
pub use error::{LookupError, UpstreamError};
pub use lookup::WeatherLookup;
pub use model::{DayForecast, LocationQuery, NormalizedWeather, Subject};
pub use provider::{WeatherApiProvider, WeatherProvider};
