//! Asset repository: insert-or-skip writes, identity-aware updates,
//! fingerprint reads and the used-id ledger.
//!
//! Callers are expected to run [`AssetRecord::prepare`] and the
//! required-field check before handing a record to the write methods; the
//! repository itself only talks to the store.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use sqlx::Sqlite;

use inventory_core::{asset_id, normalize_ip, normalize_mac};

use crate::entities::AssetRecord;
use crate::error::{classify, is_unique_violation, DbError, DbResult};
use crate::store::InventoryDb;

/// Column/value pairs in statement order; the single source of truth for
/// the insert and update SQL.
fn column_values<'a>(a: &'a AssetRecord) -> [(&'static str, &'a Option<String>); 35] {
    [
        ("asset_id", &a.asset_id),
        ("\"group\"", &a.group),
        ("asset_type", &a.asset_type),
        ("brand_model", &a.brand_model),
        ("serial_number", &a.serial_number),
        ("host_name", &a.host_name),
        ("assigned_to", &a.assigned_to),
        ("department", &a.department),
        ("ip_address", &a.ip_address),
        ("mac_address", &a.mac_address),
        ("os_firmware", &a.os_firmware),
        ("cpu", &a.cpu),
        ("ram", &a.ram),
        ("storage", &a.storage),
        ("port_details", &a.port_details),
        ("power_consumption", &a.power_consumption),
        ("purchase_date", &a.purchase_date),
        ("warranty_expiry", &a.warranty_expiry),
        ("eol", &a.eol),
        ("maintenance_expiry", &a.maintenance_expiry),
        ("cost", &a.cost),
        ("depreciation", &a.depreciation),
        ("residual_value", &a.residual_value),
        ("status", &a.status),
        ("condition", &a.condition),
        ("usage_purpose", &a.usage_purpose),
        ("access_level", &a.access_level),
        ("license_key", &a.license_key),
        ("compliance_status", &a.compliance_status),
        ("documentation", &a.documentation),
        ("remarks", &a.remarks),
        ("last_audit_date", &a.last_audit_date),
        ("disposed_date", &a.disposed_date),
        ("replacement_plan", &a.replacement_plan),
        ("invoice_url", &a.invoice_url),
    ]
}

/// The columns written on every update regardless of presence: identity
/// values are re-asserted (or cleared) on each write so a stale MAC/IP can
/// never outlive the payload that last described the asset.
const ALWAYS_UPDATED: [&str; 2] = ["ip_address", "mac_address"];

/// Insert one asset row, returning the number of rows written (0 when an
/// `OR IGNORE` insert hit the primary key or an identity index).
async fn insert_asset<'e, E>(
    executor: E,
    asset: &AssetRecord,
    or_ignore: bool,
) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let verb = if or_ignore { "INSERT OR IGNORE" } else { "INSERT" };
    let pairs = column_values(asset);
    let columns: Vec<&str> = pairs.iter().map(|(column, _)| *column).collect();
    let placeholders = vec!["?"; columns.len()].join(",");
    let sql = format!(
        "{verb} INTO assets ({}) VALUES ({placeholders})",
        columns.join(",")
    );
    let mut query = sqlx::query(&sql);
    for (_, value) in pairs {
        query = query.bind(value);
    }
    let result = query.execute(executor).await?;
    Ok(result.rows_affected())
}

/// Outcome of a single-asset write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was stored and the id recorded in the ledger.
    Inserted,
    /// The id or a normalized identity value already exists; nothing was
    /// written. Benign: idempotent re-submissions from the scanner land here.
    DuplicateSkipped,
}

/// Counts reported by a bulk insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkInsertReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// De-duplicated, normalized identity sets for the scanner.
#[derive(Debug, Clone, Serialize)]
pub struct Fingerprints {
    pub ips: Vec<String>,
    pub macs: Vec<String>,
}

/// Match keys for a force delete; any provided key deletes matching rows.
#[derive(Debug, Clone, Default)]
pub struct ForceDeleteFilter {
    pub asset_id: Option<String>,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
}

impl ForceDeleteFilter {
    pub fn is_empty(&self) -> bool {
        self.asset_id.is_none() && self.mac_address.is_none() && self.ip_address.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct AssetRepo {
    db: InventoryDb,
}

impl AssetRepo {
    pub fn new(db: InventoryDb) -> Self {
        Self { db }
    }

    /// Insert with skip-on-duplicate semantics.
    ///
    /// Existing rows (by id or by identity value) make this a no-op rather
    /// than an error; a genuine insert also records the id in the used-id
    /// ledger.
    pub async fn insert_or_skip(&self, asset: &AssetRecord) -> DbResult<InsertOutcome> {
        let affected = insert_asset(self.db.pool(), asset, true)
            .await
            .map_err(classify)?;
        if affected == 0 {
            tracing::debug!(asset_id = %asset.id(), "duplicate asset skipped");
            return Ok(InsertOutcome::DuplicateSkipped);
        }
        self.record_used_id(asset.id()).await?;
        tracing::info!(asset_id = %asset.id(), "asset inserted");
        Ok(InsertOutcome::Inserted)
    }

    /// Insert each record independently with insert-or-skip semantics.
    ///
    /// A duplicate never aborts the batch; it is counted as skipped and the
    /// loop continues. Any other storage error does abort (the writes are
    /// not transactional, so earlier inserts remain).
    pub async fn insert_bulk(&self, assets: &[AssetRecord]) -> DbResult<BulkInsertReport> {
        let mut inserted = 0usize;
        for asset in assets {
            match insert_asset(self.db.pool(), asset, true).await {
                Ok(0) => {}
                Ok(_) => {
                    self.record_used_id(asset.id()).await?;
                    inserted += 1;
                }
                Err(err) if is_unique_violation(&err) => {}
                Err(err) => return Err(DbError::Sqlx(err)),
            }
        }
        let report = BulkInsertReport {
            inserted,
            skipped: assets.len() - inserted,
        };
        tracing::info!(inserted = report.inserted, skipped = report.skipped, "bulk insert done");
        Ok(report)
    }

    /// Update a row in place (business key unchanged). Only fields present
    /// on the record are written, so a partial payload never clears the
    /// columns it omits; the identity columns are the exception (see
    /// [`ALWAYS_UPDATED`]). An identity collision with another row surfaces
    /// as [`DbError::Conflict`].
    pub async fn update(&self, id: &str, asset: &AssetRecord) -> DbResult<u64> {
        let mut set_clause = Vec::new();
        let mut values = Vec::new();
        for (column, value) in column_values(asset) {
            if value.is_some() || ALWAYS_UPDATED.contains(&column) {
                set_clause.push(format!("{column} = ?"));
                values.push(value);
            }
        }
        let sql = format!("UPDATE assets SET {} WHERE asset_id = ?", set_clause.join(", "));
        let mut query = sqlx::query(&sql);
        for value in values {
            query = query.bind(value);
        }
        let result = query
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(classify)?;
        Ok(result.rows_affected())
    }

    /// Change an asset's business key.
    ///
    /// Delete-old, insert-new and the ledger entry happen in one
    /// transaction: a failure at any step (typically the new id or an
    /// identity value already existing) rolls everything back, so a partial
    /// rename is never observable.
    pub async fn rename(&self, old_id: &str, asset: &AssetRecord) -> DbResult<u64> {
        let mut tx = self.db.pool().begin().await?;
        sqlx::query("DELETE FROM assets WHERE asset_id = ?")
            .bind(old_id)
            .execute(&mut *tx)
            .await?;
        insert_asset(&mut *tx, asset, false).await.map_err(classify)?;
        sqlx::query("INSERT OR IGNORE INTO used_asset_ids (asset_id) VALUES (?)")
            .bind(asset.id())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(old_id, new_id = %asset.id(), "asset renamed");
        Ok(1)
    }

    pub async fn delete(&self, id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM assets WHERE asset_id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every row matching any of the provided keys (OR semantics).
    /// MAC/IP keys are normalized before matching. An empty filter deletes
    /// nothing.
    pub async fn force_delete(&self, filter: &ForceDeleteFilter) -> DbResult<u64> {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        if let Some(id) = &filter.asset_id {
            conditions.push("asset_id = ?");
            params.push(id.clone());
        }
        if let Some(mac) = &filter.mac_address {
            conditions.push("mac_address = ?");
            params.push(normalize_mac(Some(mac)));
        }
        if let Some(ip) = &filter.ip_address {
            conditions.push("ip_address = ?");
            params.push(normalize_ip(Some(ip)));
        }
        if conditions.is_empty() {
            return Ok(0);
        }
        let sql = format!("DELETE FROM assets WHERE {}", conditions.join(" OR "));
        let mut query = sqlx::query(&sql);
        for param in &params {
            query = query.bind(param);
        }
        let result = query.execute(self.db.pool()).await?;
        Ok(result.rows_affected())
    }

    /// All assets ordered by id, each paired with its invoice URLs (falling
    /// back to the legacy single pointer when no invoice rows exist).
    pub async fn list_with_invoice_urls(&self) -> DbResult<Vec<(AssetRecord, Vec<String>)>> {
        let assets: Vec<AssetRecord> =
            sqlx::query_as("SELECT * FROM assets ORDER BY asset_id")
                .fetch_all(self.db.pool())
                .await?;
        let invoices: Vec<(String, String)> = sqlx::query_as(
            "SELECT asset_id, url FROM asset_invoices ORDER BY uploaded_at ASC, id ASC",
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut by_asset: HashMap<String, Vec<String>> = HashMap::new();
        for (asset_id, url) in invoices {
            by_asset.entry(asset_id).or_default().push(url);
        }
        Ok(assets
            .into_iter()
            .map(|asset| {
                let urls = by_asset
                    .remove(asset.id())
                    .unwrap_or_else(|| asset.invoice_url.iter().cloned().collect());
                (asset, urls)
            })
            .collect())
    }

    /// Normalized, de-duplicated identity sets across all assets. Empty
    /// values are discarded; output is sorted. Normalizing here again keeps
    /// the report canonical even if storage momentarily holds raw values.
    pub async fn fingerprints(&self) -> DbResult<Fingerprints> {
        let rows: Vec<(Option<String>, Option<String>)> =
            sqlx::query_as("SELECT ip_address, mac_address FROM assets")
                .fetch_all(self.db.pool())
                .await?;
        let mut ips = BTreeSet::new();
        let mut macs = BTreeSet::new();
        for (ip, mac) in rows {
            let ip = normalize_ip(ip.as_deref());
            if !ip.is_empty() {
                ips.insert(ip);
            }
            let mac = normalize_mac(mac.as_deref());
            if !mac.is_empty() {
                macs.insert(mac);
            }
        }
        Ok(Fingerprints {
            ips: ips.into_iter().collect(),
            macs: macs.into_iter().collect(),
        })
    }

    /// Next sequential id for a sanitized prefix, computed from the used-id
    /// ledger so suffixes never regress after deletions.
    pub async fn next_id(&self, prefix: &str) -> DbResult<String> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT asset_id FROM used_asset_ids WHERE asset_id LIKE ?")
                .bind(format!("{prefix}-%"))
                .fetch_all(self.db.pool())
                .await?;
        Ok(asset_id::next_id(prefix, ids.iter().map(String::as_str)))
    }

    async fn record_used_id(&self, id: &str) -> DbResult<()> {
        sqlx::query("INSERT OR IGNORE INTO used_asset_ids (asset_id) VALUES (?)")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}
