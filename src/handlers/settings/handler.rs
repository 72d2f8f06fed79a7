//! Settings handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{error::AppResult, services::SettingsService, state::AppState};

use super::{
    request::{ReplaceClassCategoriesRequest, ReplaceGradeTableRequest, UpdateParametersRequest},
    response::{ClassCategoriesResponse, GradeTableResponse, ParametersResponse},
};

/// Get ranking parameters
pub async fn get_parameters(State(state): State<AppState>) -> AppResult<Json<ParametersResponse>> {
    let params = SettingsService::get_parameters(state.db()).await?;
    Ok(Json(params))
}

/// Replace ranking parameters
pub async fn update_parameters(
    State(state): State<AppState>,
    Json(payload): Json<UpdateParametersRequest>,
) -> AppResult<Json<ParametersResponse>> {
    payload.validate()?;

    let params = SettingsService::update_parameters(state.db(), payload).await?;
    Ok(Json(params))
}

/// Get grade table
pub async fn get_grade_table(State(state): State<AppState>) -> AppResult<Json<GradeTableResponse>> {
    let table = SettingsService::get_grade_table(state.db()).await?;
    Ok(Json(table))
}

/// Replace the whole grade table
pub async fn replace_grade_table(
    State(state): State<AppState>,
    Json(payload): Json<ReplaceGradeTableRequest>,
) -> AppResult<Json<GradeTableResponse>> {
    payload.validate()?;

    let table = SettingsService::replace_grade_table(state.db(), payload).await?;
    Ok(Json(table))
}

/// Get the class to category allotment
pub async fn get_class_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ClassCategoriesResponse>> {
    let classes = SettingsService::get_class_categories(state.db()).await?;
    Ok(Json(classes))
}

/// Replace the class to category allotment
pub async fn replace_class_categories(
    State(state): State<AppState>,
    Json(payload): Json<ReplaceClassCategoriesRequest>,
) -> AppResult<Json<ClassCategoriesResponse>> {
    payload.validate()?;

    let classes = SettingsService::replace_class_categories(state.db(), payload).await?;
    Ok(Json(classes))
}
