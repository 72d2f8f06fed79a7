//! Results request DTOs

use serde::Deserialize;

/// Participation query parameters
#[derive(Debug, Deserialize)]
pub struct ParticipationQuery {
    /// Restrict counts to one category
    pub category: Option<String>,
}
