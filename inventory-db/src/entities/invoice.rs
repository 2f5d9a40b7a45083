//! Invoice attachment entity.

use serde::Serialize;

/// One invoice reference attached to an asset. Invoices have their own
/// lifecycle: deleting one never deletes the asset.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssetInvoice {
    pub id: i64,
    pub url: String,
    pub uploaded_at: String,
}
