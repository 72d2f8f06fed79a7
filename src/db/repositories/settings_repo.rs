//! Ranking parameter and grade table repository

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{ClassCategory, GradeThresholdRow, ParametersRow},
    scoring::GradeThreshold,
};

/// Repository for the settings tables
pub struct SettingsRepository;

impl SettingsRepository {
    /// Load the single parameters row
    pub async fn get_parameters(pool: &SqlitePool) -> AppResult<ParametersRow> {
        let row = sqlx::query_as::<_, ParametersRow>(
            r#"
            SELECT number_of_judges, max_marks_per_judge, min_marks_for_prize,
                   consolation_allowed, max_events_per_student
            FROM ranking_parameters
            WHERE id = 1
            "#,
        )
        .fetch_optional(pool)
        .await?;

        row.ok_or_else(|| AppError::Configuration("ranking parameters are not set".to_string()))
    }

    /// Insert or replace the parameters row
    pub async fn upsert_parameters(pool: &SqlitePool, params: &ParametersRow) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ranking_parameters (
                id, number_of_judges, max_marks_per_judge, min_marks_for_prize,
                consolation_allowed, max_events_per_student
            )
            VALUES (1, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                number_of_judges = excluded.number_of_judges,
                max_marks_per_judge = excluded.max_marks_per_judge,
                min_marks_for_prize = excluded.min_marks_for_prize,
                consolation_allowed = excluded.consolation_allowed,
                max_events_per_student = excluded.max_events_per_student
            "#,
        )
        .bind(params.number_of_judges)
        .bind(params.max_marks_per_judge)
        .bind(params.min_marks_for_prize)
        .bind(params.consolation_allowed)
        .bind(params.max_events_per_student)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// List grade thresholds, lowest minimum first
    pub async fn list_grade_thresholds(pool: &SqlitePool) -> AppResult<Vec<GradeThresholdRow>> {
        let rows = sqlx::query_as::<_, GradeThresholdRow>(
            r#"SELECT grade, min_marks FROM grade_thresholds ORDER BY min_marks ASC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Replace the whole grade table in one transaction
    pub async fn replace_grade_thresholds(
        pool: &SqlitePool,
        thresholds: &[GradeThreshold],
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        sqlx::query(r#"DELETE FROM grade_thresholds"#)
            .execute(&mut *tx)
            .await?;

        for threshold in thresholds {
            sqlx::query(r#"INSERT INTO grade_thresholds (grade, min_marks) VALUES (?, ?)"#)
                .bind(&threshold.grade)
                .bind(i64::from(threshold.min_marks))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// List the class to category allotment, ordered by category then class
    pub async fn list_class_categories(pool: &SqlitePool) -> AppResult<Vec<ClassCategory>> {
        let rows = sqlx::query_as::<_, ClassCategory>(
            r#"SELECT class, category FROM class_categories ORDER BY category, class"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Replace the allotment and move every student to their class's category.
    ///
    /// Fails without changes when a rostered class would be left unmapped.
    pub async fn replace_class_categories(
        pool: &SqlitePool,
        classes: &[ClassCategory],
    ) -> AppResult<u64> {
        let mut tx = pool.begin().await?;

        sqlx::query(r#"DELETE FROM class_categories"#)
            .execute(&mut *tx)
            .await?;

        for entry in classes {
            sqlx::query(r#"INSERT INTO class_categories (class, category) VALUES (?, ?)"#)
                .bind(&entry.class)
                .bind(&entry.category)
                .execute(&mut *tx)
                .await?;
        }

        let unmapped = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT s.class FROM students s
            WHERE NOT EXISTS (SELECT 1 FROM class_categories c WHERE c.class = s.class)
            ORDER BY s.class
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;
        if !unmapped.is_empty() {
            return Err(AppError::Validation(format!(
                "Classes in the roster have no category: {}",
                unmapped.join(", ")
            )));
        }

        let moved = sqlx::query(
            r#"
            UPDATE students SET category = (
                SELECT c.category FROM class_categories c WHERE c.class = students.class
            )
            WHERE category <> (
                SELECT c.category FROM class_categories c WHERE c.class = students.class
            )
            "#,
        )
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok(moved)
    }
}
