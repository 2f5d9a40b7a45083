//! SQLite schema for the inventory database.
//!
//! Statements are idempotent (`IF NOT EXISTS`) and executed one by one at
//! startup. The partial unique indexes on the identity columns are NOT part
//! of the base schema: they are installed by [`crate::migrations`] only
//! after historical duplicates have been cleared.

pub const ASSETS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS assets (
    asset_id TEXT PRIMARY KEY,
    "group" TEXT,
    asset_type TEXT,
    brand_model TEXT,
    serial_number TEXT,
    host_name TEXT,
    assigned_to TEXT,
    department TEXT,
    ip_address TEXT,
    mac_address TEXT,
    os_firmware TEXT,
    cpu TEXT,
    ram TEXT,
    storage TEXT,
    port_details TEXT,
    power_consumption TEXT,
    purchase_date TEXT,
    warranty_expiry TEXT,
    eol TEXT,
    maintenance_expiry TEXT,
    cost TEXT,
    depreciation TEXT,
    residual_value TEXT,
    status TEXT,
    condition TEXT,
    usage_purpose TEXT,
    access_level TEXT,
    license_key TEXT,
    compliance_status TEXT,
    documentation TEXT,
    remarks TEXT,
    last_audit_date TEXT,
    disposed_date TEXT,
    replacement_plan TEXT,
    invoice_url TEXT
)"#;

pub const USED_ASSET_IDS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS used_asset_ids ( asset_id TEXT PRIMARY KEY )";

pub const ASSET_INVOICES_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS asset_invoices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_id TEXT NOT NULL,
    url TEXT NOT NULL,
    uploaded_at TEXT NOT NULL DEFAULT (datetime('now')),
    FOREIGN KEY (asset_id) REFERENCES assets(asset_id) ON DELETE CASCADE
)"#;

pub const ASSET_INVOICES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_asset_invoices_asset_id ON asset_invoices(asset_id)";

pub const CONSUMABLES_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS consumables (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    quantity INTEGER DEFAULT 0,
    company TEXT,
    custom_fields TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
)"#;

pub const CONSUMABLE_CUSTOM_FIELDS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS consumable_custom_fields (
    field_name TEXT PRIMARY KEY,
    field_type TEXT NOT NULL,
    required INTEGER DEFAULT 0
)"#;

pub const USED_CONSUMABLE_IDS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS used_consumable_ids ( id TEXT PRIMARY KEY )";

/// Every statement needed for a fresh database, in execution order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    ASSETS_TABLE,
    USED_ASSET_IDS_TABLE,
    ASSET_INVOICES_TABLE,
    ASSET_INVOICES_INDEX,
    CONSUMABLES_TABLE,
    CONSUMABLE_CUSTOM_FIELDS_TABLE,
    USED_CONSUMABLE_IDS_TABLE,
];
