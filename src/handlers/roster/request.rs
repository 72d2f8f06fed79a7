//! Roster request DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

/// Create houses request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHousesRequest {
    #[validate(length(min = 1))]
    pub names: Vec<String>,
}

/// Create event request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    /// Group events are judged once per house
    #[serde(default)]
    pub is_group: bool,
}

/// One student in an import batch; the category follows from the class
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct StudentRecord {
    #[validate(length(min = 1, max = 32))]
    pub admission_number: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    #[validate(length(min = 1, max = 16))]
    pub class: String,

    #[validate(length(min = 1, max = 16))]
    pub division: String,

    /// Omit to keep the stored house of an existing student
    pub house: Option<String>,
}

/// Bulk student import request
#[derive(Debug, Deserialize, Validate)]
pub struct ImportStudentsRequest {
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub students: Vec<StudentRecord>,
}

/// Replace a student's house and event registrations
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationRequest {
    /// Omit to keep the current house; empty string clears it
    pub house: Option<String>,

    #[serde(default)]
    pub events: Vec<String>,
}

/// Category events query parameters
#[derive(Debug, Deserialize)]
pub struct CategoryEventsQuery {
    /// Restrict to group (`true`) or individual (`false`) events
    pub group: Option<bool>,
}
