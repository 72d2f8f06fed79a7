//! Ranking parameter, grade table and class allotment handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Settings routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/parameters",
            get(handler::get_parameters).put(handler::update_parameters),
        )
        .route(
            "/grades",
            get(handler::get_grade_table).put(handler::replace_grade_table),
        )
        .route(
            "/classes",
            get(handler::get_class_categories).put(handler::replace_class_categories),
        )
}
