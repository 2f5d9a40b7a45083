//! Request and response types.
//!
//! All JSON field names are camelCase to match what the inventory frontend
//! and the network scanner already send and expect.

use serde::{Deserialize, Serialize};

use inventory_db::{AssetInvoice, AssetRecord};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub time: String,
    pub version: String,
}

/// Response for a stored asset
#[derive(Debug, Serialize, Deserialize)]
pub struct AssetInserted {
    pub id: String,
    pub inserted: bool,
}

/// Response for a duplicate create that was skipped
#[derive(Debug, Serialize, Deserialize)]
pub struct AssetSkipped {
    pub skipped: bool,
    pub id: String,
}

/// Bulk create request body
#[derive(Debug, Deserialize)]
pub struct BulkCreateRequest {
    pub assets: Option<Vec<AssetRecord>>,
}

/// Bulk create response
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatedResponse {
    pub updated: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

/// Query parameters for a force delete
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForceDeleteQuery {
    pub asset_id: Option<String>,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
}

/// Next free identifier, for both assets and consumables
#[derive(Debug, Serialize, Deserialize)]
pub struct NextIdResponse {
    pub id: String,
}

/// One asset in a listing, with its invoice URLs attached
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    #[serde(flatten)]
    pub asset: AssetRecord,
    pub invoice_urls: Vec<String>,
}

/// Body for registering an invoice URL against an asset
#[derive(Debug, Deserialize)]
pub struct AddInvoiceRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceAdded {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<AssetInvoice>,
}

/// Query guard for destructive invoice deletion
#[derive(Debug, Deserialize, Default)]
pub struct ConfirmQuery {
    pub confirm: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDeletedResponse {
    pub deleted: bool,
    pub deleted_invoice_url: String,
    pub latest_invoice_url: Option<String>,
    pub remaining: i64,
}

/// Body for creating or updating a consumable
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    pub company: Option<String>,
    #[serde(default)]
    pub custom_fields: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsumableInserted {
    pub id: String,
    pub inserted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAdded {
    pub field_name: String,
    pub added: bool,
}
