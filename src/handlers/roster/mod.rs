//! Roster handlers: houses, events, students, registrations and categories

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Roster routes
pub fn routes() -> Router<AppState> {
    Router::new()
        // Houses and events
        .route("/houses", get(handler::list_houses).post(handler::create_houses))
        .route("/events", get(handler::list_events).post(handler::create_event))
        // Students
        .route("/students/import", post(handler::import_students))
        .route("/students/{admission_number}", get(handler::get_student))
        .route(
            "/students/{admission_number}/registration",
            put(handler::register_events),
        )
        // Categories
        .route("/categories", get(handler::list_categories))
        .route(
            "/categories/{category}/events",
            get(handler::list_events_for_category),
        )
}
