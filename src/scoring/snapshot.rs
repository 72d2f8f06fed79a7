//! Editing snapshot for one judging operation
//!
//! A snapshot holds everything needed to judge one category/event: the rows
//! as loaded, the grade table and parameters in force, and (for group events)
//! the house membership. Edits are applied to the snapshot only; nothing is
//! persisted until the caller submits the finalized rows. Dropping the
//! snapshot discards the session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::engine::RankingEngine;
use super::error::{ScoringError, ScoringResult};
use super::grade_table::GradeTable;
use super::group::{expand_to_members, RosterMembership};
use super::types::{RankingParameters, ScoreRow};

/// Whether an event is judged per participant or per house
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Individual,
    Group,
}

impl EventKind {
    pub fn from_is_group(is_group: bool) -> Self {
        if is_group { Self::Group } else { Self::Individual }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group)
    }
}

#[derive(Debug, Clone)]
pub struct JudgingSnapshot {
    category: String,
    event: String,
    kind: EventKind,
    params: RankingParameters,
    grades: GradeTable,
    rows: Vec<ScoreRow>,
    membership: RosterMembership,
}

impl JudgingSnapshot {
    pub fn new(
        category: impl Into<String>,
        event: impl Into<String>,
        kind: EventKind,
        params: RankingParameters,
        grades: GradeTable,
        rows: Vec<ScoreRow>,
        membership: RosterMembership,
    ) -> Self {
        Self {
            category: category.into(),
            event: event.into(),
            kind,
            params,
            grades,
            rows,
            membership,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn params(&self) -> &RankingParameters {
        &self.params
    }

    pub fn grades(&self) -> &GradeTable {
        &self.grades
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn membership(&self) -> &RosterMembership {
        &self.membership
    }

    fn row_mut(&mut self, key: &str) -> ScoringResult<&mut ScoreRow> {
        self.rows
            .iter_mut()
            .find(|r| r.key == key)
            .ok_or_else(|| ScoringError::Validation(format!("no row for {}", key)))
    }

    /// Record one judge's mark for a row
    pub fn set_mark(&mut self, key: &str, judge: usize, mark: u32) -> ScoringResult<()> {
        let max = self.params.max_marks_per_judge;
        if mark > max {
            return Err(ScoringError::Validation(format!(
                "mark {} exceeds the maximum of {} per judge",
                mark, max
            )));
        }
        self.row_mut(key)?.marks.set(judge, mark)
    }

    pub fn clear_mark(&mut self, key: &str, judge: usize) -> ScoringResult<()> {
        self.row_mut(key)?.marks.clear(judge)
    }

    pub fn set_disqualified(&mut self, key: &str, disqualified: bool) -> ScoringResult<()> {
        self.row_mut(key)?.disqualified = disqualified;
        Ok(())
    }

    pub fn set_remarks(&mut self, key: &str, remarks: impl Into<String>) -> ScoringResult<()> {
        self.row_mut(key)?.remarks = remarks.into();
        Ok(())
    }

    /// Override the prize threshold for this session only
    pub fn set_min_marks_for_prize(&mut self, min_marks: u32) -> ScoringResult<()> {
        let candidate = RankingParameters {
            min_marks_for_prize: min_marks,
            ..self.params
        };
        candidate.validate()?;
        self.params = candidate;
        Ok(())
    }

    pub fn set_consolation_allowed(&mut self, allowed: bool) {
        self.params.consolation_allowed = allowed;
    }

    /// Replace the editable inputs of every row at once.
    ///
    /// The incoming rows must cover exactly the loaded keys; only marks,
    /// disqualification and remarks are taken from them.
    pub fn apply_edits(&mut self, edited: Vec<ScoreRow>) -> ScoringResult<()> {
        let loaded: HashSet<&str> = self.rows.iter().map(|r| r.key.as_str()).collect();
        let mut incoming = HashSet::new();
        for row in &edited {
            if !loaded.contains(row.key.as_str()) {
                return Err(ScoringError::Validation(format!(
                    "{} is not registered for {}",
                    row.key, self.event
                )));
            }
            if !incoming.insert(row.key.as_str()) {
                return Err(ScoringError::Validation(format!(
                    "duplicate row: {}",
                    row.key
                )));
            }
        }
        if incoming.len() != loaded.len() {
            let mut absent: Vec<&str> = loaded.difference(&incoming).copied().collect();
            absent.sort_unstable();
            return Err(ScoringError::Validation(format!(
                "edits missing rows: {}",
                absent.join(", ")
            )));
        }

        for edit in edited {
            let row = self.row_mut(&edit.key)?;
            row.marks = edit.marks;
            row.disqualified = edit.disqualified;
            row.remarks = edit.remarks;
        }
        Ok(())
    }

    /// Rank the rows as they stand (per participant, or per house)
    pub fn preview(&self) -> ScoringResult<Vec<ScoreRow>> {
        RankingEngine::new(&self.grades, self.params)?.rank(&self.rows)
    }

    /// Ranked rows ready to persist, keyed by admission number.
    ///
    /// Group events are expanded so every member carries the house result.
    pub fn finalize(&self) -> ScoringResult<Vec<ScoreRow>> {
        let ranked = self.preview()?;
        match self.kind {
            EventKind::Individual => Ok(ranked),
            EventKind::Group => expand_to_members(&ranked, &self.membership),
        }
    }
}
