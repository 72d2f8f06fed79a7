//! Results handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{error::AppResult, services::ResultsService, state::AppState, utils::today_local};

use super::{
    request::ParticipationQuery,
    response::{
        CertificatesResponse, EventResultsResponse, JudgedEventsResponse, ParticipationResponse,
    },
};

/// List judged category/event pairs
pub async fn list_judged(State(state): State<AppState>) -> AppResult<Json<JudgedEventsResponse>> {
    let judged = ResultsService::list_judged(state.db()).await?;
    Ok(Json(judged))
}

/// Participant counts per event
pub async fn participation(
    State(state): State<AppState>,
    Query(query): Query<ParticipationQuery>,
) -> AppResult<Json<ParticipationResponse>> {
    let counts = ResultsService::participation(state.db(), query.category.as_deref()).await?;
    Ok(Json(counts))
}

/// Prize holders of an event
pub async fn event_results(
    State(state): State<AppState>,
    Path((category, event)): Path<(String, String)>,
) -> AppResult<Json<EventResultsResponse>> {
    let results = ResultsService::event_results(state.db(), &category, &event).await?;
    Ok(Json(results))
}

/// Certificate data for the prize holders of an event, dated today
pub async fn certificates(
    State(state): State<AppState>,
    Path((category, event)): Path<(String, String)>,
) -> AppResult<Json<CertificatesResponse>> {
    let certificates =
        ResultsService::certificates(state.db(), &category, &event, today_local()).await?;
    Ok(Json(certificates))
}
