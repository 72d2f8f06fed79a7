//! Ranking engine
//!
//! Turns raw judge marks into totals, grades, dense ranks and prize labels.
//! A ranking pass is pure: the same rows and parameters always produce the
//! same output, and input order never affects a row's rank.

use std::collections::HashSet;

use super::error::{ScoringError, ScoringResult};
use super::grade_table::GradeTable;
use super::types::{RankLabel, RankingParameters, ScoreRow};

/// Ranks a batch of rows against one grade table and parameter set
#[derive(Debug, Clone)]
pub struct RankingEngine<'a> {
    grades: &'a GradeTable,
    params: RankingParameters,
}

impl<'a> RankingEngine<'a> {
    /// Create an engine, failing if the configuration cannot rank anything
    pub fn new(grades: &'a GradeTable, params: RankingParameters) -> ScoringResult<Self> {
        params.validate()?;
        grades.validate_against(&params)?;
        Ok(Self { grades, params })
    }

    pub fn params(&self) -> &RankingParameters {
        &self.params
    }

    /// Rank `rows`, returning them in input order with computed fields set.
    ///
    /// The batch is validated before anything is computed, so an error never
    /// leaves partial results.
    pub fn rank(&self, rows: &[ScoreRow]) -> ScoringResult<Vec<ScoreRow>> {
        self.validate_rows(rows)?;

        let mut ranked = rows.to_vec();
        for row in &mut ranked {
            row.total = row.marks.sum();
            row.grade = Some(self.grades.assign_grade(row.total).to_string());
        }

        // Dense ranking: tier = position among distinct eligible totals
        let mut distinct: Vec<u32> = ranked
            .iter()
            .filter(|r| !r.disqualified)
            .map(|r| r.total)
            .collect();
        distinct.sort_unstable_by(|a, b| b.cmp(a));
        distinct.dedup();

        for row in &mut ranked {
            row.tier = if row.disqualified {
                None
            } else {
                distinct
                    .iter()
                    .position(|t| *t == row.total)
                    .map(|p| p as u32 + 1)
            };
            row.rank = row
                .tier
                .and_then(RankLabel::from_tier)
                .and_then(|label| self.gate(label, row.total));
        }

        Ok(ranked)
    }

    /// Apply the prize threshold to a top-three label
    fn gate(&self, label: RankLabel, total: u32) -> Option<RankLabel> {
        if total >= self.params.min_marks_for_prize {
            Some(label)
        } else if self.params.consolation_allowed {
            Some(RankLabel::Consolation)
        } else {
            None
        }
    }

    fn validate_rows(&self, rows: &[ScoreRow]) -> ScoringResult<()> {
        let judges = self.params.number_of_judges as usize;
        let max = self.params.max_marks_per_judge;
        let mut seen = HashSet::new();
        let mut incomplete = Vec::new();

        for row in rows {
            if !seen.insert(row.key.as_str()) {
                return Err(ScoringError::Validation(format!(
                    "duplicate row: {}",
                    row.key
                )));
            }
            if row.marks.len() != judges {
                return Err(ScoringError::Validation(format!(
                    "{} has {} mark slots, expected {}",
                    row.key,
                    row.marks.len(),
                    judges
                )));
            }
            if let Some((judge, mark)) = row.marks.pairs().find(|(_, m)| *m > max) {
                return Err(ScoringError::Validation(format!(
                    "{}: judge {} gave {} marks, maximum is {}",
                    row.key,
                    judge + 1,
                    mark,
                    max
                )));
            }
            if !row.disqualified && !row.marks.is_complete() {
                incomplete.push(row.key.as_str());
            }
        }

        if !incomplete.is_empty() {
            return Err(ScoringError::Validation(format!(
                "missing judge marks for: {}",
                incomplete.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::grade_table::GradeThreshold;
    use crate::scoring::types::JudgeMarks;

    fn grades() -> GradeTable {
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

    fn params(min_marks_for_prize: u32, consolation_allowed: bool) -> RankingParameters {
        RankingParameters {
            number_of_judges: 3,
            max_marks_per_judge: 10,
            min_marks_for_prize,
            consolation_allowed,
        }
    }

    fn row(key: &str, marks: [u32; 3]) -> ScoreRow {
        ScoreRow::new(key, JudgeMarks::from_marks(marks))
    }

    /// Totals 28, 28, 25, 20, 5
    fn scenario_rows() -> Vec<ScoreRow> {
        vec![
            row("s1", [10, 9, 9]),
            row("s2", [9, 10, 9]),
            row("s3", [8, 8, 9]),
            row("s4", [7, 7, 6]),
            row("s5", [1, 2, 2]),
        ]
    }

    fn labels(rows: &[ScoreRow]) -> Vec<Option<RankLabel>> {
        rows.iter().map(|r| r.rank).collect()
    }

    #[test]
    fn test_dense_ranking_with_prize_threshold_met() {
        let table = grades();
        let engine = RankingEngine::new(&table, params(20, false)).unwrap();
        let ranked = engine.rank(&scenario_rows()).unwrap();

        let totals: Vec<u32> = ranked.iter().map(|r| r.total).collect();
        assert_eq!(totals, vec![28, 28, 25, 20, 5]);

        let tiers: Vec<Option<u32>> = ranked.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![Some(1), Some(1), Some(2), Some(3), Some(4)]);

        assert_eq!(
            labels(&ranked),
            vec![
                Some(RankLabel::First),
                Some(RankLabel::First),
                Some(RankLabel::Second),
                Some(RankLabel::Third),
                None
            ]
        );
    }

    #[test]
    fn test_consolation_replaces_label_below_threshold() {
        let table = grades();
        let engine = RankingEngine::new(&table, params(22, true)).unwrap();
        let ranked = engine.rank(&scenario_rows()).unwrap();

        assert_eq!(ranked[3].total, 20);
        assert_eq!(ranked[3].tier, Some(3));
        assert_eq!(ranked[3].rank, Some(RankLabel::Consolation));
        // Fourth tier never gets a label, consolation or not
        assert_eq!(ranked[4].rank, None);
        assert_eq!(ranked[2].rank, Some(RankLabel::Second));
    }

    #[test]
    fn test_toggling_consolation_only_changes_labels() {
        let table = grades();
        let rows = vec![row("a", [1, 1, 1]), row("b", [1, 1, 0])];

        let with = RankingEngine::new(&table, params(20, true))
            .unwrap()
            .rank(&rows)
            .unwrap();
        let without = RankingEngine::new(&table, params(20, false))
            .unwrap()
            .rank(&rows)
            .unwrap();

        assert_eq!(with[0].rank, Some(RankLabel::Consolation));
        assert_eq!(without[0].rank, None);
        for (a, b) in with.iter().zip(&without) {
            assert_eq!(a.total, b.total);
            assert_eq!(a.grade, b.grade);
            assert_eq!(a.tier, b.tier);
        }
    }

    #[test]
    fn test_disqualified_rows_never_ranked() {
        let table = grades();
        let engine = RankingEngine::new(&table, params(1, true)).unwrap();
        let rows = vec![
            row("best", [10, 10, 10]).disqualified(true),
            row("next", [9, 9, 9]),
        ];
        let ranked = engine.rank(&rows).unwrap();

        assert_eq!(ranked[0].total, 30);
        assert_eq!(ranked[0].grade.as_deref(), Some("A"));
        assert_eq!(ranked[0].tier, None);
        assert_eq!(ranked[0].rank, None);
        assert_eq!(ranked[1].rank, Some(RankLabel::First));
    }

    #[test]
    fn test_disqualified_row_may_have_missing_marks() {
        let table = grades();
        let engine = RankingEngine::new(&table, params(1, false)).unwrap();
        let mut absent = ScoreRow::unjudged("absent", 3).disqualified(true);
        absent.marks.set(0, 4).unwrap();

        let ranked = engine.rank(&[absent, row("x", [5, 5, 5])]).unwrap();
        assert_eq!(ranked[0].total, 4);
        assert_eq!(ranked[0].rank, None);
    }

    #[test]
    fn test_missing_marks_rejected() {
        let table = grades();
        let engine = RankingEngine::new(&table, params(1, false)).unwrap();
        let rows = vec![row("ok", [1, 2, 3]), ScoreRow::unjudged("todo", 3)];

        let err = engine.rank(&rows).unwrap_err();
        assert_eq!(
            err,
            ScoringError::Validation("missing judge marks for: todo".to_string())
        );
    }

    #[test]
    fn test_out_of_range_and_malformed_rows_rejected() {
        let table = grades();
        let engine = RankingEngine::new(&table, params(1, false)).unwrap();

        assert!(engine.rank(&[row("hi", [11, 0, 0])]).is_err());
        assert!(engine
            .rank(&[ScoreRow::new("short", JudgeMarks::from_marks([1, 2]))])
            .is_err());
        assert!(engine
            .rank(&[row("dup", [1, 1, 1]), row("dup", [2, 2, 2])])
            .is_err());
    }

    #[test]
    fn test_rank_independent_of_input_order_and_idempotent() {
        let table = grades();
        let engine = RankingEngine::new(&table, params(20, true)).unwrap();

        let forward = engine.rank(&scenario_rows()).unwrap();
        let mut reversed_input = scenario_rows();
        reversed_input.reverse();
        let mut reversed = engine.rank(&reversed_input).unwrap();
        reversed.reverse();
        assert_eq!(forward, reversed);

        let again = engine.rank(&forward).unwrap();
        assert_eq!(forward, again);
    }

    #[test]
    fn test_empty_batch() {
        let table = grades();
        let engine = RankingEngine::new(&table, params(1, false)).unwrap();
        assert!(engine.rank(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_engine_rejects_bad_configuration() {
        let table = grades();
        assert!(matches!(
            RankingEngine::new(&table, params(31, false)),
            Err(ScoringError::Configuration(_))
        ));

        let two_judges = RankingParameters {
            number_of_judges: 2,
            ..params(1, false)
        };
        assert!(RankingEngine::new(&table, two_judges).is_err());
    }
}
