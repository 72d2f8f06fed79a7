//! Settings response DTOs

use serde::Serialize;

use crate::{models::ClassCategory, scoring::GradeThreshold};

/// Ranking parameters response
#[derive(Debug, Serialize)]
pub struct ParametersResponse {
    pub number_of_judges: u32,
    pub max_marks_per_judge: u32,
    pub min_marks_for_prize: u32,
    pub consolation_allowed: bool,
    pub max_events_per_student: u32,
    /// Highest achievable total
    pub max_total: u32,
}

/// Grade table response, lowest minimum first
#[derive(Debug, Serialize)]
pub struct GradeTableResponse {
    pub thresholds: Vec<GradeThreshold>,
}

/// Class allotment response
#[derive(Debug, Serialize)]
pub struct ClassCategoriesResponse {
    pub classes: Vec<ClassCategory>,
}
