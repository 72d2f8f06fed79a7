//! Settings request DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

/// Update ranking parameters request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateParametersRequest {
    #[validate(range(min = 1, max = 50))]
    pub number_of_judges: u32,

    #[validate(range(min = 1, max = 1000))]
    pub max_marks_per_judge: u32,

    /// Inclusive; must not exceed judges x max marks per judge
    pub min_marks_for_prize: u32,

    #[serde(default)]
    pub consolation_allowed: bool,

    #[validate(range(min = 1, max = 100))]
    pub max_events_per_student: u32,
}

/// One grade threshold
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct GradeThresholdRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub grade: String,

    pub min_marks: u32,
}

/// Replace grade table request
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceGradeTableRequest {
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub thresholds: Vec<GradeThresholdRequest>,
}

/// One class allotted to a category
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ClassCategoryRequest {
    #[validate(length(min = 1, max = 16))]
    pub class: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub category: String,
}

/// Replace class allotment request
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceClassCategoriesRequest {
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub classes: Vec<ClassCategoryRequest>,
}
