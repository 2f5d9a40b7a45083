//! Repository implementations.

mod asset;
mod consumable;
mod invoice;

pub use asset::{
    AssetRepo, BulkInsertReport, Fingerprints, ForceDeleteFilter, InsertOutcome,
};
pub use consumable::ConsumableRepo;
pub use invoice::{InvoiceDeletion, InvoiceRepo};
