//! Student model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::constants::classes;

/// Student database model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub admission_number: String,
    pub name: String,
    pub class: String,
    pub division: String,
    pub house: Option<String>,
    pub category: String,
}

impl Student {
    /// Class and division as printed on certificates, e.g. "XII - D"
    pub fn class_division(&self) -> String {
        let class = self.class.trim();
        let numeral = classes::NUMERALS
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(class))
            .map(|(_, numeral)| numeral.to_string())
            .unwrap_or_else(|| class.to_uppercase());
        format!("{} - {}", numeral, self.division.trim())
    }
}
