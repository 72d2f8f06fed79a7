//! Results and certificate data handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Results routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_judged))
        .route("/participation", get(handler::participation))
        .route("/{category}/{event}", get(handler::event_results))
        .route("/{category}/{event}/certificates", get(handler::certificates))
}
