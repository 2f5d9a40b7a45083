//! Shared application state.

use inventory_db::{AssetRepo, ConsumableRepo, InventoryDb, InvoiceRepo};

use crate::middleware::ScanTokenConfig;

/// State handed to every handler. Repositories are cheap clones over the
/// same connection pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub assets: AssetRepo,
    pub invoices: InvoiceRepo,
    pub consumables: ConsumableRepo,
    pub scan_token: ScanTokenConfig,
}

impl AppState {
    pub fn new(db: InventoryDb, scan_token: ScanTokenConfig) -> Self {
        Self {
            assets: AssetRepo::new(db.clone()),
            invoices: InvoiceRepo::new(db.clone()),
            consumables: ConsumableRepo::new(db),
            scan_token,
        }
    }
}
