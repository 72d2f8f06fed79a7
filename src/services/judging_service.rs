//! Judging service
//!
//! Opens a judging sheet from storage, applies edits to the in-memory
//! snapshot, and persists finalized results in one atomic write.

use crate::{
    db::PersistenceGateway,
    error::AppResult,
    handlers::judging::request::EditSheetRequest,
    scoring::{JudgingSnapshot, RosterMembership, ScoreRow},
};

/// Judging service for scoring sessions
pub struct JudgingService;

impl JudgingService {
    /// Load everything needed to judge one category/event
    pub async fn open_sheet(
        gateway: &dyn PersistenceGateway,
        category: &str,
        event: &str,
    ) -> AppResult<JudgingSnapshot> {
        let kind = gateway.find_event(event).await?.kind();
        let params = gateway.load_ranking_parameters().await?;
        params.validate()?;
        let grades = gateway.load_grade_table().await?;
        grades.validate_against(&params)?;

        let rows = gateway.load_scores(category, event).await?;
        let membership = if kind.is_group() {
            gateway.load_roster_membership(category, event).await?
        } else {
            RosterMembership::new()
        };

        tracing::debug!(category, event, rows = rows.len(), "Judging sheet opened");

        Ok(JudgingSnapshot::new(
            category, event, kind, params, grades, rows, membership,
        ))
    }

    /// Apply a request's edits and session overrides to the snapshot
    pub fn apply_edits(snapshot: &mut JudgingSnapshot, payload: EditSheetRequest) -> AppResult<()> {
        if let Some(min_marks) = payload.min_marks_for_prize {
            snapshot.set_min_marks_for_prize(min_marks)?;
        }
        if let Some(allowed) = payload.consolation_allowed {
            snapshot.set_consolation_allowed(allowed);
        }
        if !payload.rows.is_empty() {
            snapshot.apply_edits(payload.rows.into_iter().map(ScoreRow::from).collect())?;
        }
        Ok(())
    }

    /// Ranked rows for display; nothing is persisted
    pub fn preview(snapshot: &JudgingSnapshot) -> AppResult<Vec<ScoreRow>> {
        Ok(snapshot.preview()?)
    }

    /// Rank, expand group results to members and persist atomically.
    ///
    /// Nothing is written when ranking or expansion fails.
    pub async fn submit(
        gateway: &dyn PersistenceGateway,
        snapshot: &JudgingSnapshot,
    ) -> AppResult<Vec<ScoreRow>> {
        let rows = snapshot.finalize()?;

        if let Err(err) = gateway.save_scores(snapshot.event(), &rows).await {
            tracing::warn!(
                category = snapshot.category(),
                event = snapshot.event(),
                error = %err,
                "Judging submission not saved"
            );
            return Err(err);
        }

        tracing::info!(
            category = snapshot.category(),
            event = snapshot.event(),
            rows = rows.len(),
            "Judging submitted"
        );
        Ok(rows)
    }
}
