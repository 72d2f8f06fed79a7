//! Database module
//!
//! This module handles database connections, migrations, seeding, and
//! repositories, plus the persistence gateway consumed by the judging flow.

pub mod connection;
pub mod gateway;
pub mod repositories;

use sqlx::SqlitePool;

use crate::{config::JudgingConfig, constants::DEFAULT_HOUSES};

pub use connection::*;
pub use gateway::{PersistenceGateway, SqliteGateway};

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Insert default parameters and houses into a fresh database.
///
/// Existing values are never overwritten.
pub async fn seed_defaults(pool: &SqlitePool, judging: &JudgingConfig) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO ranking_parameters (
            id, number_of_judges, max_marks_per_judge, min_marks_for_prize,
            consolation_allowed, max_events_per_student
        )
        VALUES (1, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(i64::from(judging.number_of_judges))
    .bind(i64::from(judging.max_marks_per_judge))
    .bind(i64::from(judging.min_marks_for_prize))
    .bind(i64::from(judging.max_events_per_student))
    .execute(&mut *tx)
    .await?;

    let houses: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM houses"#)
        .fetch_one(&mut *tx)
        .await?;
    if houses == 0 {
        for house in DEFAULT_HOUSES {
            sqlx::query(r#"INSERT INTO houses (name) VALUES (?)"#)
                .bind(*house)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await
}

/// In-memory database with migrations and defaults applied
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    // A single connection keeps every query on the same in-memory database
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    run_migrations(&pool).await.expect("Failed to run migrations");
    seed_defaults(&pool, &JudgingConfig::default())
        .await
        .expect("Failed to seed defaults");
    pool
}
