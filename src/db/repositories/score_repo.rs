//! Participant score repository

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{EventParticipantCount, JudgeMark, JudgedEvent, ParticipantDetail},
    scoring::ScoreRow,
};

const PARTICIPANT_COLUMNS: &str = r#"
    s.admission_number, s.name, s.class, s.division, s.house, s.category,
    p.event_name, p.total_marks, p.grade, p.rank, p.disqualified, p.remarks
"#;

/// Repository for participant scores and judge marks
pub struct ScoreRepository;

impl ScoreRepository {
    /// Participants of `event` within `category`, by admission number
    pub async fn participants_for_event(
        pool: &SqlitePool,
        category: &str,
        event: &str,
    ) -> AppResult<Vec<ParticipantDetail>> {
        let query = format!(
            r#"
            SELECT {PARTICIPANT_COLUMNS}
            FROM participants p
            JOIN students s ON s.admission_number = p.admission_number
            WHERE s.category = ? AND p.event_name = ?
            ORDER BY s.admission_number
            "#
        );
        let rows = sqlx::query_as::<_, ParticipantDetail>(&query)
            .bind(category)
            .bind(event)
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    /// Recorded judge marks for `event` within `category`
    pub async fn marks_for_event(
        pool: &SqlitePool,
        category: &str,
        event: &str,
    ) -> AppResult<Vec<JudgeMark>> {
        let marks = sqlx::query_as::<_, JudgeMark>(
            r#"
            SELECT m.admission_number, m.event_name, m.judge_index, m.mark
            FROM judge_marks m
            JOIN students s ON s.admission_number = m.admission_number
            WHERE s.category = ? AND m.event_name = ?
            ORDER BY m.admission_number, m.judge_index
            "#,
        )
        .bind(category)
        .bind(event)
        .fetch_all(pool)
        .await?;

        Ok(marks)
    }

    /// Overwrite marks and results for exactly the given rows.
    ///
    /// Rows are keyed by admission number. Either every row is written or
    /// none is: a row without a matching participant aborts the batch.
    pub async fn save_scores(pool: &SqlitePool, event: &str, rows: &[ScoreRow]) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        for row in rows {
            let updated = sqlx::query(
                r#"
                UPDATE participants
                SET total_marks = ?, grade = ?, rank = ?, disqualified = ?, remarks = ?
                WHERE admission_number = ? AND event_name = ?
                "#,
            )
            .bind(i64::from(row.total))
            .bind(&row.grade)
            .bind(row.rank.map(|r| r.as_str()))
            .bind(row.disqualified)
            .bind(&row.remarks)
            .bind(&row.key)
            .bind(event)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() != 1 {
                return Err(AppError::Validation(format!(
                    "{} is not registered for {}",
                    row.key, event
                )));
            }

            sqlx::query(r#"DELETE FROM judge_marks WHERE admission_number = ? AND event_name = ?"#)
                .bind(&row.key)
                .bind(event)
                .execute(&mut *tx)
                .await?;

            for (judge, mark) in row.marks.pairs() {
                sqlx::query(
                    r#"
                    INSERT INTO judge_marks (admission_number, event_name, judge_index, mark)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(&row.key)
                .bind(event)
                .bind(judge as i64)
                .bind(i64::from(mark))
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Category/event pairs with at least one graded participant
    pub async fn list_judged(pool: &SqlitePool) -> AppResult<Vec<JudgedEvent>> {
        let judged = sqlx::query_as::<_, JudgedEvent>(
            r#"
            SELECT DISTINCT s.category, p.event_name
            FROM participants p
            JOIN students s ON s.admission_number = p.admission_number
            WHERE p.grade IS NOT NULL
            ORDER BY s.category, p.event_name
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(judged)
    }

    /// Prize holders of an event, best label first
    pub async fn prize_holders(
        pool: &SqlitePool,
        category: &str,
        event: &str,
    ) -> AppResult<Vec<ParticipantDetail>> {
        let query = format!(
            r#"
            SELECT {PARTICIPANT_COLUMNS}
            FROM participants p
            JOIN students s ON s.admission_number = p.admission_number
            WHERE s.category = ? AND p.event_name = ?
              AND p.disqualified = 0 AND p.rank IS NOT NULL
            ORDER BY
                CASE p.rank
                    WHEN 'FIRST' THEN 1
                    WHEN 'SECOND' THEN 2
                    WHEN 'THIRD' THEN 3
                    ELSE 4
                END,
                s.class, s.division, s.name
            "#
        );
        let rows = sqlx::query_as::<_, ParticipantDetail>(&query)
            .bind(category)
            .bind(event)
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    /// Registered students per event, optionally within one category
    pub async fn participant_counts(
        pool: &SqlitePool,
        category: Option<&str>,
    ) -> AppResult<Vec<EventParticipantCount>> {
        let rows = sqlx::query_as::<_, EventParticipantCount>(
            r#"
            SELECT e.name AS event_name, e.is_group, COUNT(*) AS participants
            FROM participants p
            JOIN students s ON s.admission_number = p.admission_number
            JOIN events e ON e.name = p.event_name
            WHERE (?1 IS NULL OR s.category = ?1)
            GROUP BY e.name, e.is_group
            ORDER BY e.name
            "#,
        )
        .bind(category)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Distinct students registered for at least one event
    pub async fn participant_total(pool: &SqlitePool, category: Option<&str>) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT p.admission_number)
            FROM participants p
            JOIN students s ON s.admission_number = p.admission_number
            WHERE (?1 IS NULL OR s.category = ?1)
            "#,
        )
        .bind(category)
        .fetch_one(pool)
        .await?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{
        db::{
            repositories::{EventRepository, StudentRepository},
            test_pool,
        },
        models::Student,
        scoring::{JudgeMarks, RankLabel},
    };

    async fn seed(pool: &SqlitePool) {
        EventRepository::create_event(pool, "Elocution", false).await.unwrap();
        let students: Vec<Student> = ["1001", "1002"]
            .iter()
            .map(|adm| Student {
                admission_number: adm.to_string(),
                name: format!("Student {}", adm),
                class: "9".to_string(),
                division: "A".to_string(),
                house: Some("Red".to_string()),
                category: "Category 3".to_string(),
            })
            .collect();
        StudentRepository::upsert_many(pool, &students).await.unwrap();
        let events: BTreeSet<String> = ["Elocution".to_string()].into();
        for adm in ["1001", "1002"] {
            StudentRepository::replace_registration(pool, adm, Some("Red"), &events)
                .await
                .unwrap();
        }
    }

    fn ranked(key: &str, marks: [u32; 3], rank: Option<RankLabel>) -> ScoreRow {
        let mut row = ScoreRow::new(key, JudgeMarks::from_marks(marks));
        row.total = marks.iter().sum();
        row.grade = Some("A".to_string());
        row.rank = rank;
        row
    }

    #[tokio::test]
    async fn test_save_scores_writes_marks_and_results() {
        let pool = test_pool().await;
        seed(&pool).await;

        let rows = vec![
            ranked("1001", [9, 9, 8], Some(RankLabel::First)),
            ranked("1002", [5, 5, 5], Some(RankLabel::Second)),
        ];
        ScoreRepository::save_scores(&pool, "Elocution", &rows).await.unwrap();

        let marks = ScoreRepository::marks_for_event(&pool, "Category 3", "Elocution")
            .await
            .unwrap();
        assert_eq!(marks.len(), 6);

        let holders = ScoreRepository::prize_holders(&pool, "Category 3", "Elocution")
            .await
            .unwrap();
        assert_eq!(holders[0].admission_number, "1001");
        assert_eq!(holders[0].total_marks, 26);
        assert_eq!(holders[1].rank.as_deref(), Some("SECOND"));

        let judged = ScoreRepository::list_judged(&pool).await.unwrap();
        assert_eq!(judged.len(), 1);
        assert_eq!(judged[0].category, "Category 3");
    }

    #[tokio::test]
    async fn test_save_scores_is_all_or_nothing() {
        let pool = test_pool().await;
        seed(&pool).await;

        let rows = vec![
            ranked("1001", [9, 9, 8], Some(RankLabel::First)),
            ranked("9999", [5, 5, 5], Some(RankLabel::Second)),
        ];
        let err = ScoreRepository::save_scores(&pool, "Elocution", &rows)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let participants =
            ScoreRepository::participants_for_event(&pool, "Category 3", "Elocution")
                .await
                .unwrap();
        assert!(participants.iter().all(|p| p.grade.is_none() && p.total_marks == 0));
        assert!(ScoreRepository::list_judged(&pool).await.unwrap().is_empty());
    }
}
