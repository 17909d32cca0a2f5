// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (MySQL in production, SQLite for tests).
//!
//! This is the only module that issues SQL. Statements use `?` placeholders
//! and values are always bound positionally.

mod dogs;
mod donations;
pub mod schema;
mod users;

use crate::config::DatabaseSettings;
use sqlx::any::{AnyPoolOptions, AnyQueryResult, AnyRow};
use sqlx::{Any, AnyPool, Row};
use std::time::Duration;

pub use schema::Dialect;
pub use users::StoredUser;

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(Option<i64>),
    Float(Option<f64>),
    Text(Option<String>),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(Some(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(Some(value))
    }
}

impl From<Option<f64>> for SqlValue {
    fn from(value: Option<f64>) -> Self {
        SqlValue::Float(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(Some(value.to_string()))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::Text(value)
    }
}

/// Outcome of a statement that does not return rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

impl From<AnyQueryResult> for Executed {
    fn from(result: AnyQueryResult) -> Self {
        Self {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        }
    }
}

/// Data access failures.
///
/// The `Display` output carries driver diagnostics and is meant for the log
/// only; handlers map these to generic pages.
#[derive(Debug, thiserror::Error)]
pub enum DataAccessError {
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Timed out waiting for a pooled connection")]
    PoolExhausted,

    #[error("Unique constraint violated ({constraint:?}): {message}")]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Query failed (code {code:?}): {message}")]
    Query {
        code: Option<String>,
        message: String,
    },

    #[error("Unexpected row shape: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for DataAccessError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DataAccessError::PoolExhausted,
            sqlx::Error::PoolClosed => DataAccessError::Unavailable("pool closed".to_string()),
            sqlx::Error::Io(e) => DataAccessError::Unavailable(e.to_string()),
            sqlx::Error::Tls(e) => DataAccessError::Unavailable(e.to_string()),
            sqlx::Error::Configuration(e) => DataAccessError::Unavailable(e.to_string()),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                if db_err.is_unique_violation() {
                    DataAccessError::UniqueViolation {
                        constraint: db_err.constraint().map(str::to_string),
                        message,
                    }
                } else if db_err.is_foreign_key_violation() {
                    DataAccessError::ForeignKeyViolation(message)
                } else {
                    DataAccessError::Query {
                        code: db_err.code().map(|c| c.into_owned()),
                        message,
                    }
                }
            }
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_) => DataAccessError::Decode(err.to_string()),
            other => DataAccessError::Query {
                code: None,
                message: other.to_string(),
            },
        }
    }
}

/// Pooled database handle.
#[derive(Clone)]
pub struct Database {
    pool: Option<AnyPool>,
    dialect: Dialect,
}

impl Database {
    /// Build the pool from configuration.
    ///
    /// Callers queue for at most `acquire_timeout` once every connection is
    /// busy and then get [`DataAccessError::PoolExhausted`].
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, DataAccessError> {
        Self::connect_url(
            &settings.url(),
            settings.max_connections,
            settings.acquire_timeout,
        )
        .await
    }

    /// Build a pool for an explicit URL.
    pub async fn connect_url(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, DataAccessError> {
        sqlx::any::install_default_drivers();

        let dialect = Dialect::from_url(url).ok_or_else(|| {
            DataAccessError::Unavailable("unsupported database URL scheme".to_string())
        })?;

        let mut options = AnyPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(acquire_timeout);

        if dialect == Dialect::Sqlite {
            // An in-memory database lives exactly as long as its connection.
            options = options.idle_timeout(None).max_lifetime(None);
        }

        let pool = options.connect(url).await?;

        tracing::info!(dialect = ?dialect, max_connections, "Connected to database");

        Ok(Self {
            pool: Some(pool),
            dialect,
        })
    }

    /// Create a handle with no backing database; every call fails with
    /// [`DataAccessError::Unavailable`].
    pub fn offline() -> Self {
        Self {
            pool: None,
            dialect: Dialect::MySql,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Helper to get the pool or return an error if offline.
    pub fn pool(&self) -> Result<&AnyPool, DataAccessError> {
        self.pool.as_ref().ok_or_else(|| {
            DataAccessError::Unavailable("database not connected (offline mode)".to_string())
        })
    }

    /// Run a statement and return every row.
    ///
    /// The pooled connection is held only for the duration of the call and
    /// goes back to the pool on every exit path, including cancellation.
    pub async fn fetch_all(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<AnyRow>, DataAccessError> {
        let mut conn = self.pool()?.acquire().await?;
        let rows = bind(sqlx::query(sql), params)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| log_failure(sql, e))?;
        Ok(rows)
    }

    /// Run a statement and return at most one row.
    pub async fn fetch_optional(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Option<AnyRow>, DataAccessError> {
        let mut conn = self.pool()?.acquire().await?;
        let row = bind(sqlx::query(sql), params)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| log_failure(sql, e))?;
        Ok(row)
    }

    /// Run a statement that does not return rows.
    pub async fn execute(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Executed, DataAccessError> {
        let mut conn = self.pool()?.acquire().await?;
        let result = bind(sqlx::query(sql), params)
            .execute(&mut *conn)
            .await
            .map_err(|e| log_failure(sql, e))?;
        Ok(result.into())
    }

    /// Run an INSERT and return the generated `id`.
    ///
    /// SQLite reports the id through `RETURNING`, MySQL through the
    /// statement result. Either way it is the same single statement, so a
    /// failure here means nothing was written.
    pub async fn insert_returning_id(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<i64, DataAccessError> {
        let id = match self.dialect {
            Dialect::Sqlite => {
                // Step to completion so constraint errors surface here.
                let rows = self.fetch_all(&format!("{sql} RETURNING id"), params).await?;
                match rows.first() {
                    Some(row) => Some(row.try_get::<i64, _>("id")?),
                    None => None,
                }
            }
            Dialect::MySql => self.execute(sql, params).await?.last_insert_id,
        };

        id.ok_or_else(|| {
            DataAccessError::Decode("driver returned no id for inserted row".to_string())
        })
    }

    /// Close the pool, waiting for checked-out connections to come back.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

fn bind<'q>(
    mut query: sqlx::query::Query<'q, Any, sqlx::any::AnyArguments<'q>>,
    params: &[SqlValue],
) -> sqlx::query::Query<'q, Any, sqlx::any::AnyArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::Float(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.clone()),
        };
    }
    query
}

fn log_failure(sql: &str, err: sqlx::Error) -> DataAccessError {
    let err = DataAccessError::from(err);
    match &err {
        DataAccessError::UniqueViolation { .. } | DataAccessError::ForeignKeyViolation(_) => {
            tracing::debug!(error = %err, sql, "Constraint rejected statement");
        }
        _ => tracing::error!(error = %err, sql, "Statement failed"),
    }
    err
}
