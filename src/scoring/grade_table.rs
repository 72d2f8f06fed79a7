//! Grade lookup
//!
//! Maps a total to a grade label using the stored minimum-marks thresholds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{ScoringError, ScoringResult};
use super::types::RankingParameters;

/// A grade label and the minimum total attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeThreshold {
    pub grade: String,
    pub min_marks: u32,
}

impl GradeThreshold {
    pub fn new(grade: impl Into<String>, min_marks: u32) -> Self {
        Self {
            grade: grade.into(),
            min_marks,
        }
    }
}

/// Non-empty set of thresholds, kept in ascending `min_marks` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GradeTable {
    thresholds: Vec<GradeThreshold>,
}

impl GradeTable {
    /// Build a table, rejecting empty sets, blank labels and duplicates
    pub fn new(thresholds: Vec<GradeThreshold>) -> ScoringResult<Self> {
        if thresholds.is_empty() {
            return Err(ScoringError::Configuration(
                "grade table is empty".to_string(),
            ));
        }

        let mut labels = HashSet::new();
        let mut minimums = HashSet::new();
        for t in &thresholds {
            if t.grade.trim().is_empty() {
                return Err(ScoringError::Configuration(
                    "grade label cannot be blank".to_string(),
                ));
            }
            if !labels.insert(t.grade.as_str()) {
                return Err(ScoringError::Configuration(format!(
                    "duplicate grade label: {}",
                    t.grade
                )));
            }
            // Lookup resolves a minimum back to its grade, so minimums must be unique
            if !minimums.insert(t.min_marks) {
                return Err(ScoringError::Configuration(format!(
                    "duplicate minimum marks: {}",
                    t.min_marks
                )));
            }
        }

        let mut thresholds = thresholds;
        thresholds.sort_by_key(|t| t.min_marks);
        Ok(Self { thresholds })
    }

    /// Every minimum must be reachable under `params`
    pub fn validate_against(&self, params: &RankingParameters) -> ScoringResult<()> {
        let max_total = params.max_total();
        if let Some(t) = self.thresholds.iter().find(|t| t.min_marks > max_total) {
            return Err(ScoringError::Configuration(format!(
                "grade {} requires {} marks but the maximum achievable total is {}",
                t.grade, t.min_marks, max_total
            )));
        }
        Ok(())
    }

    /// Grade for `total`.
    ///
    /// Picks the smallest minimum strictly greater than `total`; when the
    /// total is at or above the highest minimum, the highest minimum is used.
    /// The grade owning the resolved minimum is returned.
    pub fn assign_grade(&self, total: u32) -> &str {
        let ceiling = self.thresholds.iter().find(|t| t.min_marks > total);
        ceiling
            .or_else(|| self.thresholds.last())
            .map(|t| t.grade.as_str())
            .unwrap_or_default()
    }

    pub fn thresholds(&self) -> &[GradeThreshold] {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school_table() -> GradeTable {
        GradeTable::new(vec![
            GradeThreshold::new("A", 25),
            GradeThreshold::new("B", 22),
            GradeThreshold::new("C", 19),
            GradeThreshold::new("D", 16),
            GradeThreshold::new("E", 13),
            GradeThreshold::new("F", 10),
        ])
        .unwrap()
    }

    #[test]
    fn test_thresholds_sorted_ascending() {
        let table = school_table();
        let mins: Vec<u32> = table.thresholds().iter().map(|t| t.min_marks).collect();
        assert_eq!(mins, vec![10, 13, 16, 19, 22, 25]);
    }

    #[test]
    fn test_top_boundary_and_above() {
        let table = school_table();
        assert_eq!(table.assign_grade(25), "A");
        assert_eq!(table.assign_grade(28), "A");
        assert_eq!(table.assign_grade(30), "A");
    }

    #[test]
    fn test_ceiling_lookup() {
        let table = school_table();
        // The threshold just above the total owns the grade
        assert_eq!(table.assign_grade(20), "B");
        assert_eq!(table.assign_grade(22), "A");
        assert_eq!(table.assign_grade(10), "E");
        assert_eq!(table.assign_grade(5), "F");
        assert_eq!(table.assign_grade(0), "F");
    }

    #[test]
    fn test_single_threshold_covers_everything() {
        let table = GradeTable::new(vec![GradeThreshold::new("PASS", 0)]).unwrap();
        assert_eq!(table.assign_grade(0), "PASS");
        assert_eq!(table.assign_grade(99), "PASS");
    }

    #[test]
    fn test_rejects_malformed_tables() {
        assert!(matches!(
            GradeTable::new(vec![]),
            Err(ScoringError::Configuration(_))
        ));
        assert!(GradeTable::new(vec![
            GradeThreshold::new("A", 20),
            GradeThreshold::new("B", 20),
        ])
        .is_err());
        assert!(GradeTable::new(vec![
            GradeThreshold::new("A", 20),
            GradeThreshold::new("A", 10),
        ])
        .is_err());
        assert!(GradeTable::new(vec![GradeThreshold::new("  ", 5)]).is_err());
    }

    #[test]
    fn test_validate_against_parameters() {
        let params = RankingParameters {
            number_of_judges: 2,
            max_marks_per_judge: 10,
            min_marks_for_prize: 10,
            consolation_allowed: false,
        };
        // A=25 is unreachable with a max total of 20
        assert!(school_table().validate_against(&params).is_err());

        let params = RankingParameters {
            number_of_judges: 3,
            ..params
        };
        assert!(school_table().validate_against(&params).is_ok());
    }
}
