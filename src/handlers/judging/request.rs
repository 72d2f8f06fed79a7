//! Judging request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_NAME_LENGTH, MAX_REMARKS_LENGTH},
    scoring::{JudgeMarks, ScoreRow},
};

/// Edited state of one sheet row
#[derive(Debug, Deserialize, Validate)]
pub struct RowEdit {
    /// Admission number, or house name for group events
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub key: String,

    /// One slot per judge; `null` for a mark not yet given
    pub marks: JudgeMarks,

    #[serde(default)]
    pub disqualified: bool,

    #[serde(default)]
    #[validate(length(max = MAX_REMARKS_LENGTH))]
    pub remarks: String,
}

impl From<RowEdit> for ScoreRow {
    fn from(edit: RowEdit) -> Self {
        ScoreRow::new(edit.key, edit.marks)
            .disqualified(edit.disqualified)
            .with_remarks(edit.remarks)
    }
}

/// Edits applied to a freshly opened sheet
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditSheetRequest {
    /// Every row of the sheet; empty keeps the stored rows
    #[serde(default)]
    #[validate(nested)]
    pub rows: Vec<RowEdit>,

    /// Prize threshold for this session only
    pub min_marks_for_prize: Option<u32>,

    /// Consolation setting for this session only
    pub consolation_allowed: Option<bool>,
}
