//! Startup migrations.
//!
//! The write path assumes the partial unique indexes on `mac_address` and
//! `ip_address` exist, so the server must not accept traffic until every
//! step here has completed. Steps run in order, each idempotent and checked
//! against current database state before acting, and each durable before
//! the next begins. A failed step aborts startup.
//!
//! Historical duplicates are resolved by clearing the identity field on the
//! newer rows (lowest rowid wins); the asset rows themselves are never
//! deleted. Field clearing here is a distinct outcome from the upsert
//! gateway's duplicate-skip and is reported separately via
//! [`MigrationSummary`].

use crate::error::{DbError, DbResult};
use crate::store::InventoryDb;

/// What the migration pass changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Rows whose duplicate MAC was cleared.
    pub cleared_macs: u64,
    /// Rows whose duplicate IP was cleared.
    pub cleared_ips: u64,
}

/// Run all startup migrations against an initialized schema.
pub async fn run(db: &InventoryDb) -> DbResult<MigrationSummary> {
    let summary = MigrationSummary {
        cleared_macs: clear_duplicate_values(db, "mac_address")
            .await
            .map_err(step("dedupe-mac"))?,
        cleared_ips: clear_duplicate_values(db, "ip_address")
            .await
            .map_err(step("dedupe-ip"))?,
    };
    ensure_unique_index(db, "uniq_assets_mac", "mac_address")
        .await
        .map_err(step("unique-mac"))?;
    ensure_unique_index(db, "uniq_assets_ip", "ip_address")
        .await
        .map_err(step("unique-ip"))?;
    ensure_column(db, "invoice_url").await.map_err(step("add-invoice-url"))?;
    ensure_column(db, "host_name").await.map_err(step("add-host-name"))?;
    ensure_column(db, "department").await.map_err(step("add-department"))?;

    tracing::info!(
        cleared_macs = summary.cleared_macs,
        cleared_ips = summary.cleared_ips,
        "startup migrations complete"
    );
    Ok(summary)
}

fn step(name: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
    move |source| DbError::Migration { step: name, source }
}

/// Clear `column` on every row that shares a non-empty value with an
/// earlier-created row. The earliest row (lowest rowid) keeps its value.
async fn clear_duplicate_values(db: &InventoryDb, column: &str) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "UPDATE assets SET {column} = NULL WHERE rowid IN ( \
            SELECT a1.rowid FROM assets a1 \
            JOIN assets a2 ON a1.{column} = a2.{column} AND a1.rowid > a2.rowid \
            WHERE a1.{column} IS NOT NULL AND a1.{column} <> '' \
        )"
    );
    let cleared = sqlx::query(&sql).execute(db.pool()).await?.rows_affected();
    if cleared > 0 {
        tracing::warn!(column, cleared, "cleared duplicate identity values");
    }
    Ok(cleared)
}

/// Install a uniqueness constraint scoped to non-empty values of `column`.
async fn ensure_unique_index(
    db: &InventoryDb,
    name: &str,
    column: &str,
) -> Result<(), sqlx::Error> {
    let exists: Option<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'index' AND name = ?")
            .bind(name)
            .fetch_optional(db.pool())
            .await?;
    if exists.is_some() {
        tracing::debug!(index = name, "unique index already present");
        return Ok(());
    }
    let sql = format!(
        "CREATE UNIQUE INDEX {name} ON assets({column}) \
         WHERE {column} IS NOT NULL AND {column} <> ''"
    );
    sqlx::query(&sql).execute(db.pool()).await?;
    tracing::info!(index = name, column, "unique index created");
    Ok(())
}

/// Add a TEXT column to `assets` if a legacy database predates it.
async fn ensure_column(db: &InventoryDb, column: &str) -> Result<(), sqlx::Error> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('assets')")
        .fetch_all(db.pool())
        .await?;
    if columns.iter().any(|c| c.eq_ignore_ascii_case(column)) {
        return Ok(());
    }
    sqlx::query(&format!("ALTER TABLE assets ADD COLUMN {column} TEXT"))
        .execute(db.pool())
        .await?;
    tracing::info!(column, "legacy column added");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn schema_only_db() -> InventoryDb {
        let db = InventoryDb::open_in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        db
    }

    async fn seed(db: &InventoryDb, id: &str, mac: Option<&str>, ip: Option<&str>) {
        sqlx::query(
            r#"INSERT INTO assets (asset_id, "group", asset_type, mac_address, ip_address)
               VALUES (?, 'IT', 'Laptop', ?, ?)"#,
        )
        .bind(id)
        .bind(mac)
        .bind(ip)
        .execute(db.pool())
        .await
        .unwrap();
    }

    async fn mac_of(db: &InventoryDb, id: &str) -> Option<String> {
        sqlx::query_scalar("SELECT mac_address FROM assets WHERE asset_id = ?")
            .bind(id)
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn earliest_row_keeps_its_identity_value() {
        let db = schema_only_db().await;
        seed(&db, "A", Some("AA:BB:CC:DD:EE:FF"), Some("10.0.0.1")).await;
        seed(&db, "B", Some("AA:BB:CC:DD:EE:FF"), Some("10.0.0.2")).await;
        seed(&db, "C", Some("AA:BB:CC:DD:EE:FF"), Some("10.0.0.1")).await;

        let summary = run(&db).await.unwrap();
        assert_eq!(summary.cleared_macs, 2);
        assert_eq!(summary.cleared_ips, 1);

        assert_eq!(mac_of(&db, "A").await.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(mac_of(&db, "B").await, None);
        assert_eq!(mac_of(&db, "C").await, None);
    }

    #[tokio::test]
    async fn empty_values_are_exempt_from_deduplication() {
        let db = schema_only_db().await;
        seed(&db, "A", Some(""), None).await;
        seed(&db, "B", Some(""), None).await;
        seed(&db, "C", None, None).await;

        let summary = run(&db).await.unwrap();
        assert_eq!(summary.cleared_macs, 0);
        assert_eq!(mac_of(&db, "B").await.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn freed_slot_accepts_the_value_again() {
        let db = schema_only_db().await;
        seed(&db, "A", Some("AA:BB:CC:DD:EE:FF"), None).await;
        seed(&db, "B", Some("AA:BB:CC:DD:EE:FF"), None).await;
        run(&db).await.unwrap();

        // B's slot was cleared, so a third row may take a fresh MAC but the
        // index now rejects A's retained value.
        seed(&db, "C", Some("11:22:33:44:55:66"), None).await;
        let conflict = sqlx::query(
            r#"INSERT INTO assets (asset_id, "group", asset_type, mac_address)
               VALUES ('D', 'IT', 'Laptop', 'AA:BB:CC:DD:EE:FF')"#,
        )
        .execute(db.pool())
        .await;
        assert!(conflict.is_err());
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = schema_only_db().await;
        seed(&db, "A", Some("AA:BB:CC:DD:EE:FF"), None).await;
        seed(&db, "B", Some("AA:BB:CC:DD:EE:FF"), None).await;

        let first = run(&db).await.unwrap();
        assert_eq!(first.cleared_macs, 1);
        let second = run(&db).await.unwrap();
        assert_eq!(second, MigrationSummary::default());
    }

    #[tokio::test]
    async fn legacy_columns_are_added_once() {
        let db = InventoryDb::open_in_memory().await.unwrap();
        // A legacy table without the columns later migrations added.
        sqlx::query(r#"CREATE TABLE assets ( asset_id TEXT PRIMARY KEY, "group" TEXT, asset_type TEXT, mac_address TEXT, ip_address TEXT )"#)
            .execute(db.pool())
            .await
            .unwrap();

        run(&db).await.unwrap();
        let columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info('assets')")
                .fetch_all(db.pool())
                .await
                .unwrap();
        for expected in ["invoice_url", "host_name", "department"] {
            assert!(columns.iter().any(|c| c == expected), "missing {expected}");
        }
        run(&db).await.unwrap();
    }
}
