//! Judging response DTOs

use serde::Serialize;

use crate::scoring::{
    EventKind, GradeTable, JudgingSnapshot, RankingParameters, RosterMembership, ScoreRow,
};

/// An opened judging sheet
#[derive(Debug, Serialize)]
pub struct SheetResponse {
    pub category: String,
    pub event: String,
    pub kind: EventKind,
    pub parameters: RankingParameters,
    pub grades: GradeTable,
    pub rows: Vec<ScoreRow>,
    /// House -> members, for group events only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership: Option<RosterMembership>,
}

impl From<JudgingSnapshot> for SheetResponse {
    fn from(snapshot: JudgingSnapshot) -> Self {
        let kind = snapshot.kind();
        Self {
            category: snapshot.category().to_string(),
            event: snapshot.event().to_string(),
            kind,
            parameters: *snapshot.params(),
            grades: snapshot.grades().clone(),
            rows: snapshot.rows().to_vec(),
            membership: kind.is_group().then(|| snapshot.membership().clone()),
        }
    }
}

/// Ranked rows of a sheet, nothing persisted
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub category: String,
    pub event: String,
    pub kind: EventKind,
    pub parameters: RankingParameters,
    pub rows: Vec<ScoreRow>,
}

/// Rows written by a submission, keyed by admission number
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub category: String,
    pub event: String,
    pub saved: usize,
    pub rows: Vec<ScoreRow>,
}
