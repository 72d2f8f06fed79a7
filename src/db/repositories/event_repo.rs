//! Event and house repository

use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::{Event, House},
};

/// Repository for events and houses
pub struct EventRepository;

impl EventRepository {
    /// Create a new event
    pub async fn create_event(pool: &SqlitePool, name: &str, is_group: bool) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, is_group)
            VALUES (?, ?)
            RETURNING name, is_group
            "#,
        )
        .bind(name)
        .bind(is_group)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    /// Find event by name
    pub async fn find_event(pool: &SqlitePool, name: &str) -> AppResult<Option<Event>> {
        let event =
            sqlx::query_as::<_, Event>(r#"SELECT name, is_group FROM events WHERE name = ?"#)
                .bind(name)
                .fetch_optional(pool)
                .await?;

        Ok(event)
    }

    /// List all events
    pub async fn list_events(pool: &SqlitePool) -> AppResult<Vec<Event>> {
        let events =
            sqlx::query_as::<_, Event>(r#"SELECT name, is_group FROM events ORDER BY name"#)
                .fetch_all(pool)
                .await?;

        Ok(events)
    }

    /// Events with at least one registered participant in `category`
    pub async fn events_for_category(
        pool: &SqlitePool,
        category: &str,
        is_group: Option<bool>,
    ) -> AppResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT DISTINCT e.name, e.is_group
            FROM events e
            JOIN participants p ON p.event_name = e.name
            JOIN students s ON s.admission_number = p.admission_number
            WHERE s.category = ?
              AND (? IS NULL OR e.is_group = ?)
            ORDER BY e.name
            "#,
        )
        .bind(category)
        .bind(is_group)
        .bind(is_group)
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Create houses that do not exist yet, returning how many were added
    pub async fn create_houses(pool: &SqlitePool, names: &[String]) -> AppResult<u64> {
        let mut tx = pool.begin().await?;
        let mut created = 0;

        for name in names {
            let result = sqlx::query(r#"INSERT OR IGNORE INTO houses (name) VALUES (?)"#)
                .bind(name)
                .execute(&mut *tx)
                .await?;
            created += result.rows_affected();
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find house by name
    pub async fn find_house(pool: &SqlitePool, name: &str) -> AppResult<Option<House>> {
        let house = sqlx::query_as::<_, House>(r#"SELECT name FROM houses WHERE name = ?"#)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        Ok(house)
    }

    /// List all houses
    pub async fn list_houses(pool: &SqlitePool) -> AppResult<Vec<House>> {
        let houses = sqlx::query_as::<_, House>(r#"SELECT name FROM houses ORDER BY name"#)
            .fetch_all(pool)
            .await?;

        Ok(houses)
    }
}
