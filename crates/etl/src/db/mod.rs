//! Local `SQLite` store the seeder loads into.
//!
//! # Tables
//!
//! - `employees` - staff, store assignments comma-joined
//! - `customers` - loyalty customers with their address and visit totals
//! - `variants` - sellable variants of items
//! - `items` - catalog items, tax/modifier/variant ids comma-joined
//! - `receipts` - sales and refunds, line item ids as a JSON array
//!
//! Tables are created on first use with `CREATE TABLE IF NOT EXISTS`; there
//! are no migrations. Each seeding run replaces a table's rows wholesale.

pub mod customers;
pub mod employees;
pub mod items;
pub mod receipts;
pub mod variants;

use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use sqlx::SqliteConnection;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A record could not be converted into column values.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatabaseTarget {
    /// Private in-memory database, gone when the pool closes.
    #[default]
    Memory,
    /// Database file, created if missing.
    File(PathBuf),
}

impl DatabaseTarget {
    /// Target for an optional path argument; `None` means in-memory.
    #[must_use]
    pub fn from_arg(path: Option<&str>) -> Self {
        match path.map(str::trim) {
            None | Some("" | ":memory:") => Self::Memory,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        match self {
            Self::Memory => SqliteConnectOptions::new().in_memory(true),
            Self::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        }
    }
}

impl fmt::Display for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("sqlite::memory:"),
            Self::File(path) => write!(f, "sqlite://{}", path.display()),
        }
    }
}

/// Create a `SQLite` pool for `target`.
///
/// The pool holds a single connection that is never recycled, so an
/// in-memory database lives as long as the pool and every statement sees
/// the same data.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened.
pub async fn create_pool(target: &DatabaseTarget) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(target.connect_options())
        .await
}

/// A record type stored in its own table.
pub trait Table: Send + Sync {
    /// Table name.
    const NAME: &'static str;

    /// `CREATE TABLE IF NOT EXISTS` statement.
    const CREATE: &'static str;

    /// Insert this record.
    fn insert(
        &self,
        conn: &mut SqliteConnection,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Create every table that does not exist yet.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a statement fails.
#[instrument(skip(pool))]
pub async fn create_tables(pool: &SqlitePool) -> Result<(), RepositoryError> {
    for ddl in [
        employees::CREATE,
        customers::CREATE,
        variants::CREATE,
        items::CREATE,
        receipts::CREATE,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Create `R`'s table if it does not exist yet.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn ensure_table<R: Table>(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::query(R::CREATE).execute(pool).await?;
    Ok(())
}

/// Replace the contents of `R`'s table with `rows` in one transaction.
///
/// Any failed insert rolls the whole replacement back, leaving the previous
/// contents in place.
///
/// # Errors
///
/// Returns `RepositoryError` if the delete or any insert fails.
#[instrument(skip(pool, rows), fields(table = R::NAME, count = rows.len()))]
pub async fn replace_all<R: Table>(pool: &SqlitePool, rows: &[R]) -> Result<usize, RepositoryError> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query(&format!("DELETE FROM {}", R::NAME))
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for row in rows {
        row.insert(&mut *tx).await?;
    }

    tx.commit().await?;
    debug!(deleted, inserted = rows.len(), "Replaced table contents");

    Ok(rows.len())
}

/// Number of rows in `R`'s table.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn row_count<R: Table>(pool: &SqlitePool) -> Result<i64, RepositoryError> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", R::NAME))
        .fetch_one(pool)
        .await?;
    Ok(count)
}
