//! Roster response DTOs

use serde::Serialize;

use crate::models::{Event, Student};

/// Houses list response
#[derive(Debug, Serialize)]
pub struct HousesResponse {
    pub houses: Vec<String>,
}

/// Events list response
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

/// Student import response
#[derive(Debug, Serialize)]
pub struct ImportStudentsResponse {
    pub imported: usize,
}

/// Student with registered events
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    #[serde(flatten)]
    pub student: Student,
    /// e.g. "XII - D"
    pub class_division: String,
    pub events: Vec<String>,
}

/// Categories list response
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}
