//! Asset write and read handlers.
//!
//! Every write runs [`AssetRecord::prepare`] before validation so the
//! identity fields hit storage in canonical form, then relies on the
//! repository for duplicate handling: creates skip, updates conflict.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use inventory_core::asset_id;
use inventory_db::{AssetRecord, ForceDeleteFilter, InsertOutcome};

use crate::{
    dto::{
        AssetInserted, AssetResponse, AssetSkipped, BulkCreateRequest, BulkCreateResponse,
        DeletedResponse, ForceDeleteQuery, NextIdResponse, UpdatedResponse,
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

fn validate(asset: &AssetRecord) -> ApiResult<()> {
    let missing = asset.missing_required_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Create one asset with skip-on-duplicate semantics.
pub async fn create_asset(
    State(state): State<AppState>,
    Json(mut asset): Json<AssetRecord>,
) -> ApiResult<Response> {
    asset.prepare();
    validate(&asset)?;

    let response = match state.assets.insert_or_skip(&asset).await? {
        InsertOutcome::Inserted => (
            StatusCode::CREATED,
            Json(AssetInserted {
                id: asset.id().to_string(),
                inserted: true,
            }),
        )
            .into_response(),
        InsertOutcome::DuplicateSkipped => Json(AssetSkipped {
            skipped: true,
            id: asset.id().to_string(),
        })
        .into_response(),
    };
    Ok(response)
}

/// Create many assets; duplicates are counted, not errors.
pub async fn bulk_create_assets(
    State(state): State<AppState>,
    Json(request): Json<BulkCreateRequest>,
) -> ApiResult<Json<BulkCreateResponse>> {
    let mut assets = request
        .assets
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("No assets provided"))?;

    for (i, asset) in assets.iter_mut().enumerate() {
        asset.prepare();
        if !asset.missing_required_fields().is_empty() {
            return Err(ApiError::bad_request(format!(
                "Asset at index {i} missing required fields"
            )));
        }
    }

    let report = state.assets.insert_bulk(&assets).await?;
    Ok(Json(BulkCreateResponse {
        inserted: report.inserted,
        skipped: report.skipped,
    }))
}

/// Update an asset. A changed business key becomes a transactional rename.
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut asset): Json<AssetRecord>,
) -> ApiResult<Json<UpdatedResponse>> {
    asset.prepare();
    validate(&asset)?;

    let updated = if asset.id() != id {
        state.assets.rename(&id, &asset).await?
    } else {
        state.assets.update(&id, &asset).await?
    };
    Ok(Json(UpdatedResponse { updated }))
}

pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = state.assets.delete(&id).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// Delete by any combination of id, MAC or IP (OR match).
pub async fn force_delete_assets(
    State(state): State<AppState>,
    Query(query): Query<ForceDeleteQuery>,
) -> ApiResult<Json<DeletedResponse>> {
    let filter = ForceDeleteFilter {
        asset_id: query.asset_id,
        mac_address: query.mac_address,
        ip_address: query.ip_address,
    };
    if filter.is_empty() {
        return Err(ApiError::bad_request(
            "Must provide at least assetId, macAddress, or ipAddress",
        ));
    }
    let deleted = state.assets.force_delete(&filter).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// Next free id for an asset type prefix, e.g. `LAP` -> `LAP-003`.
pub async fn next_asset_id(
    State(state): State<AppState>,
    Path(asset_type): Path<String>,
) -> ApiResult<Json<NextIdResponse>> {
    if asset_type.trim().len() < 2 {
        return Err(ApiError::bad_request("Invalid asset type"));
    }
    let prefix = asset_id::sanitize_prefix(&asset_type)
        .ok_or_else(|| ApiError::bad_request("Invalid asset type prefix"))?;
    let id = state.assets.next_id(&prefix).await?;
    Ok(Json(NextIdResponse { id }))
}

/// All assets with their invoice URLs.
pub async fn list_assets(State(state): State<AppState>) -> ApiResult<Json<Vec<AssetResponse>>> {
    let assets = state.assets.list_with_invoice_urls().await?;
    Ok(Json(
        assets
            .into_iter()
            .map(|(asset, invoice_urls)| AssetResponse {
                asset,
                invoice_urls,
            })
            .collect(),
    ))
}
