//! SQLite persistence layer for the asset inventory.
//!
//! Layout follows the repository-per-aggregate pattern: [`store::InventoryDb`]
//! owns the connection pool, [`migrations`] holds the ordered startup steps
//! that establish the identity uniqueness invariant, and [`repos`] exposes
//! the asset, invoice and consumable repositories.

pub mod entities;
pub mod error;
pub mod migrations;
pub mod repos;
pub mod schema;
pub mod store;

pub use entities::{AssetInvoice, AssetRecord, Consumable, CustomFieldDef};
pub use error::{DbError, DbResult};
pub use migrations::MigrationSummary;
pub use repos::{
    AssetRepo, BulkInsertReport, ConsumableRepo, Fingerprints, ForceDeleteFilter, InsertOutcome,
    InvoiceDeletion, InvoiceRepo,
};
pub use store::InventoryDb;
