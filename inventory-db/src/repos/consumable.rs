//! Consumable stock repository.
//!
//! Consumables carry a free-form `custom_fields` JSON object whose shape is
//! described by operator-defined field definitions. The field definitions
//! only drive the UI; values are stored as-is.

use sqlx::FromRow;

use inventory_core::asset_id;

use crate::entities::{Consumable, CustomFieldDef};
use crate::error::{classify, DbResult};
use crate::store::InventoryDb;

/// Prefix for generated consumable ids (CONS-001, CONS-002, ...).
const ID_PREFIX: &str = "CONS";

/// Raw row shape; `custom_fields` is TEXT in storage.
#[derive(FromRow)]
struct ConsumableRow {
    id: String,
    name: String,
    quantity: i64,
    company: Option<String>,
    custom_fields: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ConsumableRow {
    fn into_consumable(self) -> Consumable {
        // Unparseable or absent JSON degrades to an empty object rather
        // than failing the whole listing.
        let custom_fields = self
            .custom_fields
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_else(|| serde_json::json!({}));
        Consumable {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            company: self.company,
            custom_fields,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsumableRepo {
    db: InventoryDb,
}

impl ConsumableRepo {
    pub fn new(db: InventoryDb) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> DbResult<Vec<Consumable>> {
        let rows: Vec<ConsumableRow> = sqlx::query_as(
            "SELECT id, name, quantity, company, custom_fields, created_at, updated_at \
             FROM consumables ORDER BY id",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(rows.into_iter().map(ConsumableRow::into_consumable).collect())
    }

    /// Insert a new consumable and record its id in the ledger. A taken id
    /// is a [`crate::DbError::Conflict`].
    pub async fn insert(
        &self,
        id: &str,
        name: &str,
        quantity: i64,
        company: Option<&str>,
        custom_fields: &serde_json::Value,
    ) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO consumables (id, name, quantity, company, custom_fields) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(quantity)
        .bind(company)
        .bind(custom_fields.to_string())
        .execute(self.db.pool())
        .await
        .map_err(classify)?;
        sqlx::query("INSERT OR IGNORE INTO used_consumable_ids (id) VALUES (?)")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        tracing::info!(id, name, "consumable inserted");
        Ok(())
    }

    pub async fn update(
        &self,
        id: &str,
        name: &str,
        quantity: i64,
        company: Option<&str>,
        custom_fields: &serde_json::Value,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE consumables SET name = ?, quantity = ?, company = ?, \
             custom_fields = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(name)
        .bind(quantity)
        .bind(company)
        .bind(custom_fields.to_string())
        .bind(id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM consumables WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn fields(&self) -> DbResult<Vec<CustomFieldDef>> {
        let fields = sqlx::query_as(
            "SELECT field_name, field_type, required FROM consumable_custom_fields \
             ORDER BY field_name",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(fields)
    }

    /// Define a new custom field. Redefining an existing name is a
    /// [`crate::DbError::Conflict`].
    pub async fn add_field(&self, def: &CustomFieldDef) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO consumable_custom_fields (field_name, field_type, required) \
             VALUES (?, ?, ?)",
        )
        .bind(&def.field_name)
        .bind(&def.field_type)
        .bind(def.required)
        .execute(self.db.pool())
        .await
        .map_err(classify)?;
        tracing::info!(field = %def.field_name, "consumable field added");
        Ok(())
    }

    pub async fn delete_field(&self, field_name: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM consumable_custom_fields WHERE field_name = ?")
            .bind(field_name)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Next sequential CONS id from the used-id ledger.
    pub async fn next_id(&self) -> DbResult<String> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT id FROM used_consumable_ids WHERE id LIKE ?")
                .bind(format!("{ID_PREFIX}-%"))
                .fetch_all(self.db.pool())
                .await?;
        Ok(asset_id::next_id(ID_PREFIX, ids.iter().map(String::as_str)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn test_db() -> InventoryDb {
        let db = InventoryDb::open_in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        db
    }

    #[tokio::test]
    async fn insert_then_list_round_trips_custom_fields() {
        let db = test_db().await;
        let repo = ConsumableRepo::new(db);
        repo.insert("CONS-001", "Toner", 4, Some("HP"), &json!({"color": "black"}))
            .await
            .unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "CONS-001");
        assert_eq!(all[0].quantity, 4);
        assert_eq!(all[0].custom_fields, json!({"color": "black"}));
    }

    #[tokio::test]
    async fn duplicate_id_is_a_conflict() {
        let db = test_db().await;
        let repo = ConsumableRepo::new(db);
        repo.insert("CONS-001", "Toner", 1, None, &json!({})).await.unwrap();
        let err = repo
            .insert("CONS-001", "Paper", 1, None, &json!({}))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn malformed_stored_json_degrades_to_empty_object() {
        let db = test_db().await;
        sqlx::query("INSERT INTO consumables (id, name, quantity, custom_fields) VALUES ('CONS-001', 'Toner', 1, 'not json')")
            .execute(db.pool())
            .await
            .unwrap();

        let repo = ConsumableRepo::new(db);
        let all = repo.list().await.unwrap();
        assert_eq!(all[0].custom_fields, json!({}));
    }

    #[tokio::test]
    async fn update_bumps_updated_at_fields() {
        let db = test_db().await;
        let repo = ConsumableRepo::new(db);
        repo.insert("CONS-001", "Toner", 1, None, &json!({})).await.unwrap();

        let updated = repo
            .update("CONS-001", "Toner XL", 9, Some("HP"), &json!({"size": "XL"}))
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let all = repo.list().await.unwrap();
        assert_eq!(all[0].name, "Toner XL");
        assert_eq!(all[0].quantity, 9);
        assert_eq!(all[0].company.as_deref(), Some("HP"));
    }

    #[tokio::test]
    async fn next_id_skips_past_deleted_consumables() {
        let db = test_db().await;
        let repo = ConsumableRepo::new(db);
        repo.insert("CONS-001", "A", 1, None, &json!({})).await.unwrap();
        repo.insert("CONS-002", "B", 1, None, &json!({})).await.unwrap();
        repo.delete("CONS-002").await.unwrap();

        assert_eq!(repo.next_id().await.unwrap(), "CONS-003");
    }

    #[tokio::test]
    async fn field_definitions_are_unique_by_name() {
        let db = test_db().await;
        let repo = ConsumableRepo::new(db);
        let def = CustomFieldDef {
            field_name: "expiry".to_string(),
            field_type: "date".to_string(),
            required: true,
        };
        repo.add_field(&def).await.unwrap();
        let err = repo.add_field(&def).await.unwrap_err();
        assert!(err.is_conflict());

        assert_eq!(repo.delete_field("expiry").await.unwrap(), 1);
        assert!(repo.fields().await.unwrap().is_empty());
    }
}
