//! SQLite record store.
//!
//! Records live in a single `encroachments` table. Dates are stored as
//! ISO `YYYY-MM-DD` text and timestamps as fixed-width RFC 3339 text, so
//! range filters and ordering can be done with plain text comparison.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use std::str::FromStr;
use tankwatch_core::types::{format_timestamp, timestamp_now};
use tankwatch_core::{EncroachmentRecord, Error, NewEncroachment, RecordFilter, RecordId, Result};

use crate::traits::RecordStore;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS encroachments (
    id                TEXT PRIMARY KEY NOT NULL,
    tank_name         TEXT NOT NULL CHECK (length(trim(tank_name)) > 0),
    location          TEXT NOT NULL CHECK (length(trim(location)) > 0),
    encroachment_type TEXT NOT NULL CHECK (length(trim(encroachment_type)) > 0),
    observation_date  TEXT NOT NULL,
    description       TEXT,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
)";

const CREATE_INDEX: &str = "\
CREATE INDEX IF NOT EXISTS idx_encroachments_tank_date
    ON encroachments (tank_name, observation_date)";

const SELECT_COLUMNS: &str = "SELECT id, tank_name, location, encroachment_type, \
     observation_date, description, created_at, updated_at FROM encroachments";

/// A [`RecordStore`] backed by SQLite through an `sqlx` pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and ensures the schema.
    ///
    /// In-memory URLs are limited to one connection, since every SQLite
    /// connection would otherwise see its own private database.
    pub async fn connect(url: &str) -> Result<Self> {
        if !url.starts_with("sqlite:") {
            return Err(Error::config(format!("not a SQLite URL: '{url}'")));
        }
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| Error::config(format!("invalid SQLite URL '{url}': {e}")))?
            .create_if_missing(true);

        let max_connections = if is_in_memory(url) {
            1
        } else {
            DEFAULT_MAX_CONNECTIONS
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| Error::storage_with_source("failed to open SQLite database", e))?;

        let store = Self { pool };
        store.migrate().await?;
        tracing::info!(max_connections, "SQLite record store ready");
        Ok(store)
    }

    /// Creates the table and index if they are missing.
    pub async fn migrate(&self) -> Result<()> {
        for statement in [CREATE_TABLE, CREATE_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| Error::storage_with_source("failed to create schema", e))?;
        }
        Ok(())
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn create(&self, input: NewEncroachment) -> Result<EncroachmentRecord> {
        let validated = input.validate()?;
        let record = EncroachmentRecord::from_validated(validated, timestamp_now());

        sqlx::query(
            "INSERT INTO encroachments (id, tank_name, location, encroachment_type, \
             observation_date, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(&record.tank_name)
        .bind(&record.location)
        .bind(&record.encroachment_type)
        .bind(record.observation_date.to_string())
        .bind(record.description.as_deref())
        .bind(format_timestamp(&record.created_at))
        .bind(format_timestamp(&record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| Error::storage_with_source("failed to insert encroachment", e))?;

        tracing::debug!(id = %record.id, tank = %record.tank_name, "stored encroachment");
        Ok(record)
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<EncroachmentRecord>> {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        query.push(" WHERE 1 = 1");

        if let Some(tank_name) = &filter.tank_name {
            query.push(" AND tank_name = ").push_bind(tank_name.clone());
        }
        if let Some(period) = &filter.period {
            query
                .push(" AND observation_date >= ")
                .push_bind(period.start().to_string())
                .push(" AND observation_date <= ")
                .push_bind(period.last().to_string());
        }
        query.push(" ORDER BY observation_date DESC, created_at DESC, id ASC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::storage_with_source("failed to query encroachments", e))?;

        rows.iter().map(record_from_row).collect()
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM encroachments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::storage_with_source("failed to count encroachments", e))?;
        usize::try_from(count)
            .map_err(|e| Error::storage_with_source(format!("invalid record count {count}"), e))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::storage_with_source("database unreachable", e))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

fn record_from_row(row: &SqliteRow) -> Result<EncroachmentRecord> {
    let text = |column: &str| -> Result<String> {
        row.try_get::<String, _>(column)
            .map_err(|e| Error::storage_with_source(format!("unreadable column '{column}'"), e))
    };

    let id = text("id")?;
    let id = RecordId::from_str(&id)
        .map_err(|e| Error::storage_with_source(format!("corrupt record id '{id}'"), e))?;

    let observation_date = text("observation_date")?;
    let observation_date = NaiveDate::parse_from_str(&observation_date, "%Y-%m-%d")
        .map_err(|e| Error::storage_with_source(format!("corrupt date in record {id}"), e))?;

    let description = row
        .try_get::<Option<String>, _>("description")
        .map_err(|e| Error::storage_with_source("unreadable column 'description'", e))?;

    Ok(EncroachmentRecord {
        id,
        tank_name: text("tank_name")?,
        location: text("location")?,
        encroachment_type: text("encroachment_type")?,
        observation_date,
        description,
        created_at: parse_timestamp(&text("created_at")?)?,
        updated_at: parse_timestamp(&text("updated_at")?)?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::storage_with_source(format!("corrupt timestamp '{raw}'"), e))
}
