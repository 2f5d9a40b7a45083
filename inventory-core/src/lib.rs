//! Domain primitives for the asset inventory.
//!
//! Pure logic only: MAC/IP canonicalization and asset-id sequence helpers.
//! No I/O lives in this crate; the persistence and HTTP layers build on it.

pub mod asset_id;
pub mod identity;

pub use identity::{normalize_ip, normalize_mac};
