//! Judging handlers
//!
//! Judging is stateless over HTTP: every preview or submit re-opens the
//! sheet from storage and applies the edits carried by the request.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Judging routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{category}/{event}", get(handler::open_sheet))
        .route("/{category}/{event}/preview", post(handler::preview))
        .route("/{category}/{event}/submit", post(handler::submit))
}
