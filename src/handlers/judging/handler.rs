//! Judging handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{error::AppResult, services::JudgingService, state::AppState};

use super::{
    request::EditSheetRequest,
    response::{PreviewResponse, SheetResponse, SubmitResponse},
};

/// Open the judging sheet of a category/event
pub async fn open_sheet(
    State(state): State<AppState>,
    Path((category, event)): Path<(String, String)>,
) -> AppResult<Json<SheetResponse>> {
    let snapshot = JudgingService::open_sheet(state.gateway(), &category, &event).await?;
    Ok(Json(snapshot.into()))
}

/// Rank the edited sheet without saving
pub async fn preview(
    State(state): State<AppState>,
    Path((category, event)): Path<(String, String)>,
    Json(payload): Json<EditSheetRequest>,
) -> AppResult<Json<PreviewResponse>> {
    payload.validate()?;

    let mut snapshot = JudgingService::open_sheet(state.gateway(), &category, &event).await?;
    JudgingService::apply_edits(&mut snapshot, payload)?;
    let rows = JudgingService::preview(&snapshot)?;

    Ok(Json(PreviewResponse {
        category: snapshot.category().to_string(),
        event: snapshot.event().to_string(),
        kind: snapshot.kind(),
        parameters: *snapshot.params(),
        rows,
    }))
}

/// Rank the edited sheet and persist the results
pub async fn submit(
    State(state): State<AppState>,
    Path((category, event)): Path<(String, String)>,
    Json(payload): Json<EditSheetRequest>,
) -> AppResult<Json<SubmitResponse>> {
    payload.validate()?;

    let mut snapshot = JudgingService::open_sheet(state.gateway(), &category, &event).await?;
    JudgingService::apply_edits(&mut snapshot, payload)?;
    let rows = JudgingService::submit(state.gateway(), &snapshot).await?;

    Ok(Json(SubmitResponse {
        category: snapshot.category().to_string(),
        event: snapshot.event().to_string(),
        saved: rows.len(),
        rows,
    }))
}
