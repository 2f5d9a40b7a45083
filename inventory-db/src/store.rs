//! Shared handle to the inventory SQLite database.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::DbResult;
use crate::schema::SCHEMA_STATEMENTS;

/// Connection pool wrapper; cheap to clone.
#[derive(Debug, Clone)]
pub struct InventoryDb {
    pool: SqlitePool,
}

impl InventoryDb {
    /// Open a file-backed database, creating the file if missing.
    /// Foreign keys are enabled so invoice rows cascade on asset deletion.
    pub async fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Open an in-memory database (single connection, used by tests).
    pub async fn open_in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create any table or index that does not exist yet.
    pub async fn init_schema(&self) -> DbResult<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!(statements = SCHEMA_STATEMENTS.len(), "schema initialized");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
