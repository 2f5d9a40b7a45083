//! Persisted entity types.

mod asset;
mod consumable;
mod invoice;

pub use asset::AssetRecord;
pub use consumable::{Consumable, CustomFieldDef};
pub use invoice::AssetInvoice;
