//! Roster handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{error::AppResult, models::Event, services::RosterService, state::AppState};

use super::{
    request::{
        CategoryEventsQuery, CreateEventRequest, CreateHousesRequest, ImportStudentsRequest,
        RegistrationRequest,
    },
    response::{
        CategoriesResponse, EventsResponse, HousesResponse, ImportStudentsResponse,
        StudentResponse,
    },
};

/// List houses
pub async fn list_houses(State(state): State<AppState>) -> AppResult<Json<HousesResponse>> {
    let houses = RosterService::list_houses(state.db()).await?;
    Ok(Json(houses))
}

/// Add houses
pub async fn create_houses(
    State(state): State<AppState>,
    Json(payload): Json<CreateHousesRequest>,
) -> AppResult<(StatusCode, Json<HousesResponse>)> {
    payload.validate()?;

    let houses = RosterService::create_houses(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(houses)))
}

/// List events
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<EventsResponse>> {
    let events = RosterService::list_events(state.db()).await?;
    Ok(Json(events))
}

/// Create an event
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    payload.validate()?;

    let event = RosterService::create_event(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Import (insert or update) a batch of students
pub async fn import_students(
    State(state): State<AppState>,
    Json(payload): Json<ImportStudentsRequest>,
) -> AppResult<Json<ImportStudentsResponse>> {
    payload.validate()?;

    let imported = RosterService::import_students(state.db(), payload).await?;
    Ok(Json(imported))
}

/// Get a student and their registered events
pub async fn get_student(
    State(state): State<AppState>,
    Path(admission_number): Path<String>,
) -> AppResult<Json<StudentResponse>> {
    let student = RosterService::get_student(state.db(), &admission_number).await?;
    Ok(Json(student))
}

/// Replace a student's house and event registrations
pub async fn register_events(
    State(state): State<AppState>,
    Path(admission_number): Path<String>,
    Json(payload): Json<RegistrationRequest>,
) -> AppResult<Json<StudentResponse>> {
    payload.validate()?;

    let student = RosterService::register_events(state.db(), &admission_number, payload).await?;
    Ok(Json(student))
}

/// List categories present in the roster
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<CategoriesResponse>> {
    let categories = RosterService::list_categories(state.db()).await?;
    Ok(Json(categories))
}

/// List events with registered participants in a category
pub async fn list_events_for_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CategoryEventsQuery>,
) -> AppResult<Json<EventsResponse>> {
    let events =
        RosterService::list_events_for_category(state.db(), &category, query.group).await?;
    Ok(Json(events))
}
