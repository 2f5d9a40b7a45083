//! Consumable stock entities.

use serde::{Deserialize, Serialize};

/// One consumable stock item. `custom_fields` holds the values of the
/// operator-defined fields, stored as a JSON object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumable {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub company: Option<String>,
    pub custom_fields: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

/// Definition of an operator-defined consumable field.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldDef {
    pub field_name: String,
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
}
