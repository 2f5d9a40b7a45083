//! Invoice repository.
//!
//! Each asset holds zero or more invoice references plus a denormalized
//! "most recent" pointer (`assets.invoice_url`) kept for single-invoice
//! consumers; the pointer is recomputed on every deletion.

use crate::entities::AssetInvoice;
use crate::error::{DbError, DbResult};
use crate::store::InventoryDb;

/// Result of deleting one invoice.
#[derive(Debug, Clone)]
pub struct InvoiceDeletion {
    pub deleted_url: String,
    /// Most recent remaining invoice, if any.
    pub latest_url: Option<String>,
    pub remaining: i64,
}

#[derive(Debug, Clone)]
pub struct InvoiceRepo {
    db: InventoryDb,
}

impl InvoiceRepo {
    pub fn new(db: InventoryDb) -> Self {
        Self { db }
    }

    /// Attach an invoice URL to an existing asset and refresh the legacy
    /// pointer. Unknown assets are a [`DbError::NotFound`].
    pub async fn add(&self, asset_id: &str, url: &str) -> DbResult<()> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM assets WHERE asset_id = ?")
            .bind(asset_id)
            .fetch_optional(self.db.pool())
            .await?;
        if exists.is_none() {
            return Err(DbError::NotFound(format!("asset {asset_id}")));
        }
        sqlx::query("INSERT INTO asset_invoices (asset_id, url) VALUES (?, ?)")
            .bind(asset_id)
            .bind(url)
            .execute(self.db.pool())
            .await?;
        sqlx::query("UPDATE assets SET invoice_url = ? WHERE asset_id = ?")
            .bind(url)
            .bind(asset_id)
            .execute(self.db.pool())
            .await?;
        tracing::info!(asset_id, url, "invoice attached");
        Ok(())
    }

    /// Invoices for one asset, oldest first.
    pub async fn list(&self, asset_id: &str) -> DbResult<Vec<AssetInvoice>> {
        let invoices = sqlx::query_as(
            "SELECT id, url, uploaded_at FROM asset_invoices \
             WHERE asset_id = ? ORDER BY uploaded_at ASC, id ASC",
        )
        .bind(asset_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(invoices)
    }

    /// Delete one invoice and recompute the legacy pointer to the most
    /// recent remaining invoice (or NULL).
    pub async fn delete(&self, asset_id: &str, invoice_id: i64) -> DbResult<InvoiceDeletion> {
        let deleted_url: Option<String> =
            sqlx::query_scalar("SELECT url FROM asset_invoices WHERE id = ? AND asset_id = ?")
                .bind(invoice_id)
                .bind(asset_id)
                .fetch_optional(self.db.pool())
                .await?;
        let Some(deleted_url) = deleted_url else {
            return Err(DbError::NotFound(format!(
                "invoice {invoice_id} for asset {asset_id}"
            )));
        };

        let affected = sqlx::query("DELETE FROM asset_invoices WHERE id = ? AND asset_id = ?")
            .bind(invoice_id)
            .bind(asset_id)
            .execute(self.db.pool())
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(DbError::NotFound(format!(
                "invoice {invoice_id} for asset {asset_id}"
            )));
        }

        let latest_url: Option<String> = sqlx::query_scalar(
            "SELECT url FROM asset_invoices WHERE asset_id = ? \
             ORDER BY uploaded_at DESC, id DESC LIMIT 1",
        )
        .bind(asset_id)
        .fetch_optional(self.db.pool())
        .await?;
        sqlx::query("UPDATE assets SET invoice_url = ? WHERE asset_id = ?")
            .bind(&latest_url)
            .bind(asset_id)
            .execute(self.db.pool())
            .await?;

        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM asset_invoices WHERE asset_id = ?")
                .bind(asset_id)
                .fetch_one(self.db.pool())
                .await?;

        tracing::info!(asset_id, invoice_id, remaining, "invoice deleted");
        Ok(InvoiceDeletion {
            deleted_url,
            latest_url,
            remaining,
        })
    }
}
