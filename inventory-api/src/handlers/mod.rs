//! HTTP handlers.

mod assets;
mod consumables;
mod fingerprints;
mod health;
mod invoices;

pub use assets::{
    bulk_create_assets, create_asset, delete_asset, force_delete_assets, list_assets, next_asset_id,
    update_asset,
};
pub use consumables::{
    add_consumable_field, create_consumable, delete_consumable, delete_consumable_field,
    list_consumable_fields, list_consumables, next_consumable_id, update_consumable,
};
pub use fingerprints::get_fingerprints;
pub use health::health_check;
pub use invoices::{add_invoice, delete_invoice, list_invoices};
