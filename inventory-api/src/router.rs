//! API router.

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::require_scan_token, state::AppState};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/assets/fingerprints", get(handlers::get_fingerprints))
        .route_layer(from_fn_with_state(state.clone(), require_scan_token));

    Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        // Assets
        .route(
            "/assets",
            get(handlers::list_assets).post(handlers::create_asset),
        )
        .route("/assets/bulk", post(handlers::bulk_create_assets))
        .route("/assets/next-id/:type", get(handlers::next_asset_id))
        .route("/assets/force-delete", delete(handlers::force_delete_assets))
        .route(
            "/assets/:id",
            put(handlers::update_asset).delete(handlers::delete_asset),
        )
        // Invoices
        .route(
            "/assets/:id/invoices",
            get(handlers::list_invoices).post(handlers::add_invoice),
        )
        .route(
            "/assets/:id/invoices/:invoice_id",
            delete(handlers::delete_invoice),
        )
        // Consumables
        .route(
            "/consumables",
            get(handlers::list_consumables).post(handlers::create_consumable),
        )
        .route("/consumables/next-id", get(handlers::next_consumable_id))
        .route(
            "/consumables/fields",
            get(handlers::list_consumable_fields).post(handlers::add_consumable_field),
        )
        .route(
            "/consumables/fields/:field_name",
            delete(handlers::delete_consumable_field),
        )
        .route(
            "/consumables/:id",
            put(handlers::update_consumable).delete(handlers::delete_consumable),
        )
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::ScanTokenConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use inventory_db::{migrations, InventoryDb};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_state(scan_token: Option<&str>) -> AppState {
        let db = InventoryDb::open_in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        migrations::run(&db).await.unwrap();
        AppState::new(db, ScanTokenConfig::new(scan_token.map(String::from)))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn laptop(id: &str) -> Value {
        json!({"assetId": id, "group": "IT", "assetType": "Laptop"})
    }

    #[tokio::test]
    async fn health_reports_ok_and_version() {
        let app = create_router(test_state(None).await);
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["version"], json!(crate::VERSION));
    }

    #[tokio::test]
    async fn create_then_repeat_is_skipped() {
        let app = create_router(test_state(None).await);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/assets", laptop("LAP-001")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"id": "LAP-001", "inserted": true})
        );

        let response = app
            .oneshot(json_request("POST", "/assets", laptop("LAP-001")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"skipped": true, "id": "LAP-001"})
        );
    }

    #[tokio::test]
    async fn create_rejects_missing_required_fields() {
        let app = create_router(test_state(None).await);
        let response = app
            .oneshot(json_request("POST", "/assets", json!({"group": "IT"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "Missing required fields: assetType, assetId");
    }

    #[tokio::test]
    async fn bulk_counts_inserts_and_skips() {
        let app = create_router(test_state(None).await);
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/assets/bulk",
                json!({"assets": [laptop("A1"), laptop("A1")]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"inserted": 1, "skipped": 1}));

        let response = app
            .oneshot(json_request("POST", "/assets/bulk", json!({"assets": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fingerprints_require_the_scan_token() {
        let app = create_router(test_state(Some("s3cret")).await);

        let response = app
            .clone()
            .oneshot(get_request("/assets/fingerprints"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/assets/fingerprints")
                    .header("x-scan-token", "s3cret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"ips": [], "macs": []}));
    }

    #[tokio::test]
    async fn fingerprints_accept_a_bearer_token() {
        let app = create_router(test_state(Some("s3cret")).await);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/assets/fingerprints")
                    .header(header::AUTHORIZATION, "Bearer s3cret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn update_with_new_id_renames_and_conflicts_roll_back() {
        let app = create_router(test_state(None).await);
        for id in ["A1", "A2"] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/assets", laptop(id)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // Renaming A1 onto A2 must conflict and leave both rows intact.
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/assets/A1", laptop("A2")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app.clone().oneshot(get_request("/assets")).await.unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 2);

        // A fresh id renames cleanly.
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/assets/A1", laptop("A9")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"updated": 1}));
    }

    #[tokio::test]
    async fn next_id_reflects_the_ledger() {
        let app = create_router(test_state(None).await);
        app.clone()
            .oneshot(json_request("POST", "/assets", laptop("LAP-004")))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get_request("/assets/next-id/Laptop"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"id": "LAP-005"}));

        let response = app
            .oneshot(get_request("/assets/next-id/L"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn force_delete_requires_a_key() {
        let app = create_router(test_state(None).await);
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/assets/force-delete")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        app.clone()
            .oneshot(json_request("POST", "/assets", laptop("A1")))
            .await
            .unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/assets/force-delete?assetId=A1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"deleted": 1}));
    }

    #[tokio::test]
    async fn invoice_deletion_requires_confirmation() {
        let app = create_router(test_state(None).await);
        app.clone()
            .oneshot(json_request("POST", "/assets", laptop("A1")))
            .await
            .unwrap();
        app.clone()
            .oneshot(json_request(
                "POST",
                "/assets/A1/invoices",
                json!({"url": "/uploads/invoices/a.pdf"}),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get_request("/assets/A1/invoices"))
            .await
            .unwrap();
        let listed = body_json(response).await;
        let invoice_id = listed["invoices"][0]["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/assets/A1/invoices/{invoice_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/assets/A1/invoices/{invoice_id}?confirm=true"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["deleted"], json!(true));
        assert_eq!(body["remaining"], json!(0));
    }

    #[tokio::test]
    async fn consumable_lifecycle() {
        let app = create_router(test_state(None).await);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/consumables",
                json!({"id": "CONS-001", "name": "Toner", "quantity": 3}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"id": "CONS-001", "inserted": true})
        );

        let response = app
            .clone()
            .oneshot(json_request("POST", "/consumables", json!({"name": "Toner"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(get_request("/consumables/next-id"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({"id": "CONS-002"}));

        // Unknown ids fall out as a zero count, not an error.
        let response = app
            .oneshot(json_request(
                "PUT",
                "/consumables/CONS-404",
                json!({"name": "Toner", "quantity": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"updated": 0}));
    }
}
