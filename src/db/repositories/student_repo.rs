//! Student and registration repository

use std::collections::BTreeSet;

use sqlx::SqlitePool;

use crate::{error::AppResult, models::Student};

/// Repository for students and their event registrations
pub struct StudentRepository;

impl StudentRepository {
    /// Insert or update a batch of students in one transaction.
    ///
    /// A student without a house keeps the stored one.
    pub async fn upsert_many(pool: &SqlitePool, students: &[Student]) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        for student in students {
            sqlx::query(
                r#"
                INSERT INTO students (admission_number, name, class, division, house, category)
                VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT (admission_number) DO UPDATE SET
                    name = excluded.name,
                    class = excluded.class,
                    division = excluded.division,
                    house = COALESCE(excluded.house, students.house),
                    category = excluded.category
                "#,
            )
            .bind(&student.admission_number)
            .bind(&student.name)
            .bind(&student.class)
            .bind(&student.division)
            .bind(&student.house)
            .bind(&student.category)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Find student by admission number
    pub async fn find_by_admission_number(
        pool: &SqlitePool,
        admission_number: &str,
    ) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT admission_number, name, class, division, house, category
            FROM students
            WHERE admission_number = ?
            "#,
        )
        .bind(admission_number)
        .fetch_optional(pool)
        .await?;

        Ok(student)
    }

    /// Event names the student is registered for
    pub async fn registered_events(
        pool: &SqlitePool,
        admission_number: &str,
    ) -> AppResult<Vec<String>> {
        let events = sqlx::query_scalar::<_, String>(
            r#"
            SELECT event_name FROM participants
            WHERE admission_number = ?
            ORDER BY event_name
            "#,
        )
        .bind(admission_number)
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Replace a student's house and registration set.
    ///
    /// Dropped events lose their participant row (and marks, by cascade).
    /// Kept events keep their stored marks; new ones start unjudged.
    pub async fn replace_registration(
        pool: &SqlitePool,
        admission_number: &str,
        house: Option<&str>,
        events: &BTreeSet<String>,
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        sqlx::query(r#"UPDATE students SET house = ? WHERE admission_number = ?"#)
            .bind(house)
            .bind(admission_number)
            .execute(&mut *tx)
            .await?;

        let current = sqlx::query_scalar::<_, String>(
            r#"SELECT event_name FROM participants WHERE admission_number = ?"#,
        )
        .bind(admission_number)
        .fetch_all(&mut *tx)
        .await?;

        for event in current.iter().filter(|e| !events.contains(*e)) {
            sqlx::query(
                r#"DELETE FROM participants WHERE admission_number = ? AND event_name = ?"#,
            )
            .bind(admission_number)
            .bind(event)
            .execute(&mut *tx)
            .await?;
        }

        for event in events {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO participants (admission_number, event_name)
                VALUES (?, ?)
                "#,
            )
            .bind(admission_number)
            .bind(event)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Distinct categories across the roster
    pub async fn list_categories(pool: &SqlitePool) -> AppResult<Vec<String>> {
        let categories = sqlx::query_scalar::<_, String>(
            r#"SELECT DISTINCT category FROM students ORDER BY category"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }
}
