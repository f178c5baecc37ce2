//! Weather lookup handler

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::warn;
use weather_core::{LocationQuery, NormalizedWeather};

use crate::{error::ApiError, state::AppState};

/// Current conditions plus a 3-day forecast for a city or coordinate pair.
///
/// GET /api/weather?city=Paris
/// GET /api/weather?lat=48.85&lon=2.35
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<NormalizedWeather>, ApiError> {
    let Query(query) = query.map_err(|e| {
        warn!(error = %e, "Rejected weather query string");
        ApiError::MissingParameters
    })?;

    let weather = state.lookup.lookup(&query).await?;

    Ok(Json(weather))
}
