//! Event and house models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::scoring::EventKind;

/// Event database model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    /// Group events are judged once per house
    pub is_group: bool,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        EventKind::from_is_group(self.is_group)
    }
}

/// House database model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct House {
    pub name: String,
}
