//! Request middleware.

pub mod auth;

pub use auth::{require_scan_token, ScanTokenConfig, SCAN_TOKEN_HEADER};
