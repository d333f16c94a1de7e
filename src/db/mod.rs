//! Database module: connection pool wrapper and per-entity repositories.
//!
//! Repository functions are free functions generic over [`ConnectionTrait`], so the same
//! call works on the pooled connection and inside a transaction started with
//! `pool.connection().begin()`.

pub mod center_approved_files;
pub mod center_fees;
pub mod center_holds;
pub mod center_walls;
pub mod centers;
pub mod lector_approved_files;
pub mod lectors;
pub mod posts;
pub mod review_answers;
pub mod reviews;
pub mod users;

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::DatabaseSettings;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL using the configured pool bounds.
    pub async fn new(settings: &DatabaseSettings) -> AppResult<Self> {
        let mut options = ConnectOptions::new(settings.url.clone());
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        info!(
            max_connections = settings.max_connections,
            "Database pool created"
        );

        Ok(Self { conn })
    }

    /// Wrap an existing connection (used by tests against in-memory SQLite).
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))
    }

    /// Round-trip a trivial query to verify connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        let backend = self.conn.get_database_backend();
        let stmt = sea_orm::Statement::from_string(backend, "SELECT 1".to_owned());
        self.conn.query_one_raw(stmt).await?;
        Ok(())
    }
}

/// Half-open UTC interval covering the calendar days `start..=end`.
pub fn day_range(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = start.and_time(NaiveTime::MIN).and_utc();
    let until = end
        .succ_opt()
        .unwrap_or(end)
        .and_time(NaiveTime::MIN)
        .and_utc();
    (from, until)
}
