//! Participant (student-event registration) models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single recorded judge mark
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct JudgeMark {
    pub admission_number: String,
    pub event_name: String,
    pub judge_index: i64,
    pub mark: i64,
}

/// Participant joined with the student's roster details
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ParticipantDetail {
    pub admission_number: String,
    pub name: String,
    pub class: String,
    pub division: String,
    pub house: Option<String>,
    pub category: String,
    pub event_name: String,
    pub total_marks: i64,
    pub grade: Option<String>,
    pub rank: Option<String>,
    pub disqualified: bool,
    pub remarks: String,
}

/// Number of students registered for an event
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct EventParticipantCount {
    pub event_name: String,
    pub is_group: bool,
    pub participants: i64,
}

/// A category/event pair with at least one graded participant
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct JudgedEvent {
    pub category: String,
    pub event_name: String,
}
