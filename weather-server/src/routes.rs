//! Route definitions

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use weather_core::ServerConfig;

use crate::{handlers, state::AppState};

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/weather", get(handlers::weather::get_weather))
        .with_state(state)
}

/// Router plus request tracing and, when an origin is configured, CORS.
pub fn build_app(state: AppState, server: &ServerConfig) -> anyhow::Result<Router> {
    let app = create_router(state).layer(TraceLayer::new_for_http());

    Ok(match cors_layer(server.allowed_origin.as_deref())? {
        Some(cors) => app.layer(cors),
        None => app,
    })
}

/// Cross-origin access for exactly one origin, read-only.
pub fn cors_layer(origin: Option<&str>) -> anyhow::Result<Option<CorsLayer>> {
    let Some(origin) = origin else {
        return Ok(None);
    };

    let origin: HeaderValue =
        origin.parse().with_context(|| format!("Invalid CORS origin '{origin}'"))?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET])
            .allow_headers(Any),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_origin_means_no_cors() {
        assert!(cors_layer(None).unwrap().is_none());
    }

    #[test]
    fn configured_origin_builds_layer() {
        assert!(cors_layer(Some("http://localhost:5173")).unwrap().is_some());
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let err = cors_layer(Some("http://bad\norigin")).unwrap_err();
        assert!(err.to_string().contains("Invalid CORS origin"));
    }
}
