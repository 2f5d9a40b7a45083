//! Asset entity.

use inventory_core::{normalize_ip, normalize_mac};
use serde::{Deserialize, Serialize};

/// A single inventory asset.
///
/// The field set is fixed; unrecognized keys in incoming JSON are silently
/// dropped by serde rather than rejected. Descriptive attributes are opaque
/// strings — only `asset_id` and the two identity fields (`mac_address`,
/// `ip_address`) carry semantics for the write path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetRecord {
    pub asset_id: Option<String>,
    pub group: Option<String>,
    pub asset_type: Option<String>,
    pub brand_model: Option<String>,
    pub serial_number: Option<String>,
    pub host_name: Option<String>,
    pub assigned_to: Option<String>,
    pub department: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub os_firmware: Option<String>,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub port_details: Option<String>,
    pub power_consumption: Option<String>,
    pub purchase_date: Option<String>,
    pub warranty_expiry: Option<String>,
    pub eol: Option<String>,
    pub maintenance_expiry: Option<String>,
    pub cost: Option<String>,
    pub depreciation: Option<String>,
    pub residual_value: Option<String>,
    pub status: Option<String>,
    pub condition: Option<String>,
    pub usage_purpose: Option<String>,
    pub access_level: Option<String>,
    pub license_key: Option<String>,
    pub compliance_status: Option<String>,
    pub documentation: Option<String>,
    pub remarks: Option<String>,
    pub last_audit_date: Option<String>,
    pub disposed_date: Option<String>,
    pub replacement_plan: Option<String>,
    pub invoice_url: Option<String>,

    /// Legacy split brand field; folded into `brand_model` on write,
    /// never persisted or echoed back.
    #[serde(skip_serializing)]
    #[sqlx(skip)]
    pub brand: Option<String>,
    /// Legacy split model field; see `brand`.
    #[serde(skip_serializing)]
    #[sqlx(skip)]
    pub model: Option<String>,
}

impl AssetRecord {
    /// The business key, or empty when absent (callers validate first).
    pub fn id(&self) -> &str {
        self.asset_id.as_deref().unwrap_or_default()
    }

    /// Compose legacy `brand` + `model` inputs into `brand_model`, then
    /// canonicalize the identity fields. Run on every write path before
    /// validation and persistence.
    pub fn prepare(&mut self) {
        self.compose_brand_model();
        self.normalize_identity();
    }

    /// Names (JSON form) of required fields that are missing or blank.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.group) {
            missing.push("group");
        }
        if blank(&self.asset_type) {
            missing.push("assetType");
        }
        if blank(&self.asset_id) {
            missing.push("assetId");
        }
        missing
    }

    fn compose_brand_model(&mut self) {
        let brand = self.brand.take().unwrap_or_default();
        let model = self.model.take().unwrap_or_default();
        let composed = format!("{} {}", brand.trim(), model.trim())
            .trim()
            .to_string();
        if !composed.is_empty() && blank(&self.brand_model) {
            self.brand_model = Some(composed);
        }
    }

    /// Canonicalize MAC/IP; empty results are stored as NULL so the partial
    /// unique indexes never see them.
    fn normalize_identity(&mut self) {
        let ip = normalize_ip(self.ip_address.as_deref());
        self.ip_address = (!ip.is_empty()).then_some(ip);
        let mac = normalize_mac(self.mac_address.as_deref());
        self.mac_address = (!mac.is_empty()).then_some(mac);
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_json_keys_are_dropped() {
        let asset: AssetRecord = serde_json::from_str(
            r#"{"assetId":"LAP-001","group":"IT","assetType":"Laptop","invoiceUrls":["x"],"bogus":1}"#,
        )
        .unwrap();
        assert_eq!(asset.asset_id.as_deref(), Some("LAP-001"));
    }

    #[test]
    fn missing_fields_are_reported_by_json_name() {
        let asset = AssetRecord {
            asset_id: Some("  ".to_string()),
            group: Some("IT".to_string()),
            ..Default::default()
        };
        assert_eq!(asset.missing_required_fields(), vec!["assetType", "assetId"]);
    }

    #[test]
    fn prepare_normalizes_identity_fields() {
        let mut asset = AssetRecord {
            mac_address: Some("aa-bb-cc-dd-ee-ff".to_string()),
            ip_address: Some("  10.0.0.1 ".to_string()),
            ..Default::default()
        };
        asset.prepare();
        assert_eq!(asset.mac_address.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(asset.ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn prepare_maps_empty_identity_to_none() {
        let mut asset = AssetRecord {
            mac_address: Some("   ".to_string()),
            ip_address: Some("".to_string()),
            ..Default::default()
        };
        asset.prepare();
        assert_eq!(asset.mac_address, None);
        assert_eq!(asset.ip_address, None);
    }

    #[test]
    fn brand_model_composition_respects_existing_value() {
        let mut asset = AssetRecord {
            brand: Some("Dell ".to_string()),
            model: Some(" XPS".to_string()),
            ..Default::default()
        };
        asset.prepare();
        assert_eq!(asset.brand_model.as_deref(), Some("Dell XPS"));
        assert_eq!(asset.brand, None);

        let mut asset = AssetRecord {
            brand: Some("Dell".to_string()),
            brand_model: Some("HP Elite".to_string()),
            ..Default::default()
        };
        asset.prepare();
        assert_eq!(asset.brand_model.as_deref(), Some("HP Elite"));
    }
}
