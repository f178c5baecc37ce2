//! HTTP surface of the weather lookup service.
//!
//! Exposes `GET /api/weather` and `GET /health` over axum. The binary in
//! `main.rs` wraps this with a small CLI.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::{build_app, create_router};
pub use server::serve;
pub use state::AppState;
