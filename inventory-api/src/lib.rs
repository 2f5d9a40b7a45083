//! Asset Inventory REST API
//!
//! HTTP REST API for the IT asset inventory.
//!
//! # Endpoints
//!
//! ## Health
//! - `GET /health` - Health check
//!
//! ## Assets
//! - `GET /assets` - List assets with invoice URLs
//! - `POST /assets` - Create an asset (duplicates are skipped)
//! - `POST /assets/bulk` - Create many assets in one request
//! - `GET /assets/next-id/:type` - Next free id for an asset type
//! - `DELETE /assets/force-delete` - Delete by id, MAC or IP
//! - `PUT /assets/:id` - Update an asset (new id renames it)
//! - `DELETE /assets/:id` - Delete an asset
//!
//! ## Invoices
//! - `GET /assets/:id/invoices` - List an asset's invoices
//! - `POST /assets/:id/invoices` - Register an invoice URL
//! - `DELETE /assets/:id/invoices/:invoice_id` - Delete an invoice (confirmed)
//!
//! ## Fingerprints (scan token required)
//! - `GET /assets/fingerprints` - Known MAC/IP identity sets
//!
//! ## Consumables
//! - `GET /consumables` - List consumables
//! - `POST /consumables` - Create a consumable
//! - `GET /consumables/next-id` - Next free consumable id
//! - `GET /consumables/fields` - List custom field definitions
//! - `POST /consumables/fields` - Define a custom field
//! - `DELETE /consumables/fields/:field_name` - Remove a custom field
//! - `PUT /consumables/:id` - Update a consumable
//! - `DELETE /consumables/:id` - Delete a consumable
//!
//! # Usage
//!
//! ```ignore
//! use inventory_api::{run_server, ApiConfig};
//! use inventory_db::InventoryDb;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = InventoryDb::open("assets.db").await?;
//!     db.init_schema().await?;
//!     inventory_db::migrations::run(&db).await?;
//!     run_server(db, &ApiConfig::default()).await
//! }
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use middleware::{ScanTokenConfig, SCAN_TOKEN_HEADER};
pub use router::create_router;
pub use server::{create_server, run_server, ApiConfig};
pub use state::AppState;

/// API version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port
pub const DEFAULT_PORT: u16 = 4000;
