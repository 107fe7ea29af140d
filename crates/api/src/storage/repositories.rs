// Repository layer for database operations
// Decision: ids come from SQLite AUTOINCREMENT, never from counting rows

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use super::error::StorageResult;
use super::models::*;

const CREATE_EVENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(80) NOT NULL,
    date DATE NOT NULL
)
"#;

const CREATE_EVENTS_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_events_date ON events (date)";

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and make sure the events table exists.
    ///
    /// In-memory URLs are pinned to a single long-lived connection: every
    /// SQLite connection to `:memory:` opens its own private database.
    pub async fn connect(database_url: &str, create_if_missing: bool) -> StorageResult<Self> {
        let options =
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(create_if_missing);

        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.ensure_schema().await?;

        tracing::debug!(url = %database_url, "SQLite event store ready");
        Ok(db)
    }

    /// Idempotently create the events table and its date index
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        sqlx::query(CREATE_EVENTS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_EVENTS_DATE_INDEX)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Close the pool; later queries fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> StorageResult<EventRow> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (name, date)
            VALUES (?, ?)
            RETURNING id, name, date
            "#,
        )
        .bind(&input.name)
        .bind(input.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_event(&self, id: i64) -> StorageResult<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, date
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_events(&self) -> StorageResult<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, date
            FROM events
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_events_on(&self, date: NaiveDate) -> StorageResult<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, date
            FROM events
            WHERE date = ?
            ORDER BY id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Events dated within `[start, end]`, both ends inclusive
    pub async fn list_events_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, date
            FROM events
            WHERE date BETWEEN ? AND ?
            ORDER BY id ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete_event(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM events
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
