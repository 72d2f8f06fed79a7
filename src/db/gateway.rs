//! Persistence gateway
//!
//! The narrow read/write contract the judging flow depends on. The SQLite
//! implementation composes the repositories; tests substitute a mock.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::repositories::{EventRepository, ScoreRepository, SettingsRepository};
use crate::{
    error::{AppError, AppResult},
    models::{stored_u32, Event, JudgeMark, ParticipantDetail},
    scoring::{GradeTable, JudgeMarks, RankingParameters, RosterMembership, ScoreRow},
};

/// Storage operations consumed by the judging service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Look up an event and its kind
    async fn find_event(&self, event: &str) -> AppResult<Event>;

    /// Ranking parameters currently in force
    async fn load_ranking_parameters(&self) -> AppResult<RankingParameters>;

    /// Grade table currently in force
    async fn load_grade_table(&self) -> AppResult<GradeTable>;

    /// Every registered participant (or, for group events, house) of the
    /// category/event pair, with the stored marks and flags
    async fn load_scores(&self, category: &str, event: &str) -> AppResult<Vec<ScoreRow>>;

    /// House -> registered admission numbers, for group events
    async fn load_roster_membership(
        &self,
        category: &str,
        event: &str,
    ) -> AppResult<RosterMembership>;

    /// Atomically overwrite the given rows, keyed by admission number
    async fn save_scores(&self, event: &str, rows: &[ScoreRow]) -> AppResult<()>;
}

/// Gateway backed by the SQLite pool
#[derive(Clone)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn participant_row(
        participant: &ParticipantDetail,
        marks: &HashMap<&str, Vec<&JudgeMark>>,
        judges: usize,
    ) -> AppResult<ScoreRow> {
        let mut pairs = Vec::new();
        for mark in marks.get(participant.admission_number.as_str()).into_iter().flatten() {
            let judge = stored_u32("judge_index", mark.judge_index)? as usize;
            // Slots past the current judge count are left over from an earlier setting
            if judge < judges {
                pairs.push((judge, stored_u32("mark", mark.mark)?));
            }
        }

        Ok(ScoreRow::new(
            participant.admission_number.clone(),
            JudgeMarks::from_pairs(judges, pairs)?,
        )
        .disqualified(participant.disqualified)
        .with_remarks(participant.remarks.clone()))
    }

    fn house_of(participant: &ParticipantDetail) -> AppResult<&str> {
        participant.house.as_deref().ok_or_else(|| {
            AppError::Validation(format!(
                "{} is registered for group event {} without a house",
                participant.admission_number, participant.event_name
            ))
        })
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn find_event(&self, event: &str) -> AppResult<Event> {
        EventRepository::find_event(&self.pool, event)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event not found: {}", event)))
    }

    async fn load_ranking_parameters(&self) -> AppResult<RankingParameters> {
        SettingsRepository::get_parameters(&self.pool)
            .await?
            .ranking_parameters()
    }

    async fn load_grade_table(&self) -> AppResult<GradeTable> {
        let thresholds = SettingsRepository::list_grade_thresholds(&self.pool)
            .await?
            .iter()
            .map(|row| row.threshold())
            .collect::<AppResult<Vec<_>>>()?;

        Ok(GradeTable::new(thresholds)?)
    }

    async fn load_scores(&self, category: &str, event: &str) -> AppResult<Vec<ScoreRow>> {
        let kind = self.find_event(event).await?.kind();
        let judges = self.load_ranking_parameters().await?.number_of_judges as usize;

        let participants =
            ScoreRepository::participants_for_event(&self.pool, category, event).await?;
        let marks = ScoreRepository::marks_for_event(&self.pool, category, event).await?;
        let mut by_participant: HashMap<&str, Vec<&JudgeMark>> = HashMap::new();
        for mark in &marks {
            by_participant
                .entry(mark.admission_number.as_str())
                .or_default()
                .push(mark);
        }

        if !kind.is_group() {
            return participants
                .iter()
                .map(|p| Self::participant_row(p, &by_participant, judges))
                .collect();
        }

        // A house row carries the stored state of its first member; submit
        // writes the same values to every member.
        let mut houses: BTreeMap<&str, &ParticipantDetail> = BTreeMap::new();
        for participant in &participants {
            houses.entry(Self::house_of(participant)?).or_insert(participant);
        }

        houses
            .into_iter()
            .map(|(house, first)| {
                let mut row = Self::participant_row(first, &by_participant, judges)?;
                row.key = house.to_string();
                Ok(row)
            })
            .collect()
    }

    async fn load_roster_membership(
        &self,
        category: &str,
        event: &str,
    ) -> AppResult<RosterMembership> {
        let participants =
            ScoreRepository::participants_for_event(&self.pool, category, event).await?;

        let mut membership = RosterMembership::new();
        for participant in &participants {
            membership
                .entry(Self::house_of(participant)?.to_string())
                .or_default()
                .insert(participant.admission_number.clone());
        }

        Ok(membership)
    }

    async fn save_scores(&self, event: &str, rows: &[ScoreRow]) -> AppResult<()> {
        ScoreRepository::save_scores(&self.pool, event, rows).await
    }
}
