//! Results response DTOs

use serde::Serialize;

use crate::{
    models::{EventParticipantCount, JudgedEvent},
    scoring::RankLabel,
};

/// Judged category/event pairs
#[derive(Debug, Serialize)]
pub struct JudgedEventsResponse {
    pub events: Vec<JudgedEvent>,
}

/// Participation counts, across the roster or within one category
#[derive(Debug, Serialize)]
pub struct ParticipationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Students registered for at least one event
    pub total_participants: i64,
    pub events: Vec<EventParticipantCount>,
}

/// One prize holder
#[derive(Debug, Serialize)]
pub struct ResultEntry {
    pub admission_number: String,
    pub name: String,
    pub class: String,
    pub division: String,
    pub house: Option<String>,
    pub total_marks: u32,
    pub grade: Option<String>,
    pub rank: RankLabel,
}

/// Prize holders of an event, best label first
#[derive(Debug, Serialize)]
pub struct EventResultsResponse {
    pub category: String,
    pub event: String,
    pub results: Vec<ResultEntry>,
}

/// Data printed on one certificate
#[derive(Debug, Serialize)]
pub struct Certificate {
    pub admission_number: String,
    pub student_name: String,
    /// e.g. "XII - D"
    pub class_division: String,
    /// e.g. "Category 1 - Group Dance"
    pub event_title: String,
    /// e.g. "First Prize"
    pub prize: String,
    /// dd-mm-yyyy
    pub date: String,
}

/// Certificates of an event
#[derive(Debug, Serialize)]
pub struct CertificatesResponse {
    pub category: String,
    pub event: String,
    pub certificates: Vec<Certificate>,
}
