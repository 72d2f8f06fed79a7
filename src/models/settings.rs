//! Ranking parameter and grade threshold models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{AppError, AppResult},
    scoring::{GradeThreshold, RankingParameters},
};

/// Stored ranking parameters (single row)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ParametersRow {
    pub number_of_judges: i64,
    pub max_marks_per_judge: i64,
    pub min_marks_for_prize: i64,
    pub consolation_allowed: bool,
    pub max_events_per_student: i64,
}

impl ParametersRow {
    pub fn ranking_parameters(&self) -> AppResult<RankingParameters> {
        Ok(RankingParameters {
            number_of_judges: stored_u32("number_of_judges", self.number_of_judges)?,
            max_marks_per_judge: stored_u32("max_marks_per_judge", self.max_marks_per_judge)?,
            min_marks_for_prize: stored_u32("min_marks_for_prize", self.min_marks_for_prize)?,
            consolation_allowed: self.consolation_allowed,
        })
    }

    pub fn max_events_per_student(&self) -> AppResult<u32> {
        stored_u32("max_events_per_student", self.max_events_per_student)
    }
}

/// Stored grade threshold
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GradeThresholdRow {
    pub grade: String,
    pub min_marks: i64,
}

impl GradeThresholdRow {
    pub fn threshold(&self) -> AppResult<GradeThreshold> {
        Ok(GradeThreshold::new(
            self.grade.clone(),
            stored_u32("min_marks", self.min_marks)?,
        ))
    }
}

/// Class to category allotment
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ClassCategory {
    pub class: String,
    pub category: String,
}

/// Convert a stored integer column into the unsigned domain type
pub fn stored_u32(column: &str, value: i64) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::Database(format!("stored {} out of range: {}", column, value)))
}
