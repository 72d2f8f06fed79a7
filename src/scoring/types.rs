//! Scoring data contracts
//!
//! Rows, judge marks, rank labels and the parameters that drive ranking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ScoringError, ScoringResult};

/// Parameters that drive a ranking pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingParameters {
    pub number_of_judges: u32,
    pub max_marks_per_judge: u32,
    /// Inclusive minimum total for a FIRST/SECOND/THIRD label to stand
    pub min_marks_for_prize: u32,
    pub consolation_allowed: bool,
}

impl RankingParameters {
    /// Highest achievable total (judges x max marks per judge)
    pub fn max_total(&self) -> u32 {
        self.number_of_judges.saturating_mul(self.max_marks_per_judge)
    }

    /// Check the parameters are usable for ranking
    pub fn validate(&self) -> ScoringResult<()> {
        if self.number_of_judges == 0 {
            return Err(ScoringError::Configuration(
                "number of judges must be at least 1".to_string(),
            ));
        }
        if self.max_marks_per_judge == 0 {
            return Err(ScoringError::Configuration(
                "max marks per judge must be at least 1".to_string(),
            ));
        }
        if self.min_marks_for_prize > self.max_total() {
            return Err(ScoringError::Configuration(format!(
                "min marks for prize ({}) exceeds the maximum achievable total ({})",
                self.min_marks_for_prize,
                self.max_total()
            )));
        }
        Ok(())
    }
}

/// One mark slot per judge, in judge order.
///
/// `None` means the judge has not scored the row yet. Disqualification is
/// tracked separately on [`ScoreRow`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JudgeMarks(Vec<Option<u32>>);

impl JudgeMarks {
    /// Empty slots for `judges` judges
    pub fn unjudged(judges: usize) -> Self {
        Self(vec![None; judges])
    }

    /// Fully scored marks, one per judge
    pub fn from_marks<I>(marks: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self(marks.into_iter().map(Some).collect())
    }

    /// Build from sparse `(judge_index, mark)` pairs
    pub fn from_pairs<I>(judges: usize, pairs: I) -> ScoringResult<Self>
    where
        I: IntoIterator<Item = (usize, u32)>,
    {
        let mut marks = Self::unjudged(judges);
        for (judge, mark) in pairs {
            marks.set(judge, mark)?;
        }
        Ok(marks)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, judge: usize) -> Option<u32> {
        self.0.get(judge).copied().flatten()
    }

    /// Record a judge's mark
    pub fn set(&mut self, judge: usize, mark: u32) -> ScoringResult<()> {
        let slot = self.slot_mut(judge)?;
        *slot = Some(mark);
        Ok(())
    }

    /// Forget a judge's mark
    pub fn clear(&mut self, judge: usize) -> ScoringResult<()> {
        let slot = self.slot_mut(judge)?;
        *slot = None;
        Ok(())
    }

    fn slot_mut(&mut self, judge: usize) -> ScoringResult<&mut Option<u32>> {
        let judges = self.0.len();
        self.0.get_mut(judge).ok_or_else(|| {
            ScoringError::Validation(format!(
                "judge index {} out of range (judges: {})",
                judge, judges
            ))
        })
    }

    /// True when every judge has scored
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Judge indices without a mark
    pub fn missing(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Sum of the recorded marks
    pub fn sum(&self) -> u32 {
        self.0.iter().flatten().sum()
    }

    /// Recorded marks as `(judge_index, mark)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.map(|mark| (i, mark)))
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<u32>> + '_ {
        self.0.iter().copied()
    }
}

/// Final prize label of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankLabel {
    First,
    Second,
    Third,
    Consolation,
}

impl RankLabel {
    /// Label for a dense rank tier; tiers beyond 3 carry no label
    pub fn from_tier(tier: u32) -> Option<Self> {
        match tier {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "FIRST",
            Self::Second => "SECOND",
            Self::Third => "THIRD",
            Self::Consolation => "CONSOLATION",
        }
    }

    /// Wording printed on certificates, e.g. "First Prize"
    pub fn prize_title(&self) -> &'static str {
        match self {
            Self::First => "First Prize",
            Self::Second => "Second Prize",
            Self::Third => "Third Prize",
            Self::Consolation => "Consolation Prize",
        }
    }
}

impl fmt::Display for RankLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankLabel {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIRST" => Ok(Self::First),
            "SECOND" => Ok(Self::Second),
            "THIRD" => Ok(Self::Third),
            "CONSOLATION" => Ok(Self::Consolation),
            other => Err(ScoringError::Validation(format!(
                "unknown rank label: {}",
                other
            ))),
        }
    }
}

/// One participant's (or one house's) judging state for an event.
///
/// `total`, `grade`, `tier` and `rank` are outputs of a ranking pass and are
/// overwritten every time the row is ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    /// Admission number for individual rows, house name for group rows
    pub key: String,
    pub marks: JudgeMarks,
    #[serde(default)]
    pub disqualified: bool,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub grade: Option<String>,
    /// Dense rank among non-disqualified rows (1 = best)
    #[serde(default)]
    pub tier: Option<u32>,
    #[serde(default)]
    pub rank: Option<RankLabel>,
}

impl ScoreRow {
    pub fn new(key: impl Into<String>, marks: JudgeMarks) -> Self {
        Self {
            key: key.into(),
            marks,
            disqualified: false,
            remarks: String::new(),
            total: 0,
            grade: None,
            tier: None,
            rank: None,
        }
    }

    /// A freshly registered row with no marks yet
    pub fn unjudged(key: impl Into<String>, judges: usize) -> Self {
        Self::new(key, JudgeMarks::unjudged(judges))
    }

    pub fn disqualified(mut self, disqualified: bool) -> Self {
        self.disqualified = disqualified;
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_marks_sum_and_missing() {
        let mut marks = JudgeMarks::unjudged(3);
        assert!(!marks.is_complete());
        marks.set(0, 7).unwrap();
        marks.set(2, 9).unwrap();
        assert_eq!(marks.sum(), 16);
        assert_eq!(marks.missing(), vec![1]);
        assert_eq!(marks.pairs().collect::<Vec<_>>(), vec![(0, 7), (2, 9)]);

        marks.set(1, 4).unwrap();
        assert!(marks.is_complete());
        marks.clear(0).unwrap();
        assert_eq!(marks.get(0), None);
    }

    #[test]
    fn test_judge_marks_rejects_unknown_judge() {
        let mut marks = JudgeMarks::unjudged(2);
        assert!(matches!(marks.set(2, 5), Err(ScoringError::Validation(_))));
        assert!(JudgeMarks::from_pairs(2, [(0, 1), (5, 1)]).is_err());
    }

    #[test]
    fn test_rank_label_round_trip_and_tiers() {
        assert_eq!("first".parse::<RankLabel>().unwrap(), RankLabel::First);
        assert_eq!(RankLabel::Consolation.to_string(), "CONSOLATION");
        assert!("FOURTH".parse::<RankLabel>().is_err());
        assert_eq!(RankLabel::from_tier(3), Some(RankLabel::Third));
        assert_eq!(RankLabel::from_tier(4), None);
        assert_eq!(RankLabel::from_tier(0), None);
    }

    #[test]
    fn test_parameters_validation() {
        let params = RankingParameters {
            number_of_judges: 3,
            max_marks_per_judge: 10,
            min_marks_for_prize: 30,
            consolation_allowed: false,
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.max_total(), 30);

        let too_high = RankingParameters {
            min_marks_for_prize: 31,
            ..params
        };
        assert!(matches!(
            too_high.validate(),
            Err(ScoringError::Configuration(_))
        ));

        let no_judges = RankingParameters {
            number_of_judges: 0,
            ..params
        };
        assert!(no_judges.validate().is_err());
    }

    #[test]
    fn test_score_row_serde_shape() {
        let row = ScoreRow::new("A100", JudgeMarks::from_marks([1, 2]));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["marks"], serde_json::json!([1, 2]));
        assert_eq!(json["rank"], serde_json::Value::Null);

        let parsed: ScoreRow =
            serde_json::from_str(r#"{"key":"Red","marks":[null,4],"rank":"SECOND"}"#).unwrap();
        assert_eq!(parsed.marks.get(1), Some(4));
        assert_eq!(parsed.rank, Some(RankLabel::Second));
        assert!(!parsed.disqualified);
    }
}
