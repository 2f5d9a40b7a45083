//! Consumable stock handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use inventory_db::{Consumable, CustomFieldDef};

use crate::{
    dto::{
        ConsumableInserted, ConsumableRequest, DeletedResponse, FieldAdded, NextIdResponse,
        UpdatedResponse,
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

fn custom_fields_or_empty(value: serde_json::Value) -> serde_json::Value {
    if value.is_null() {
        serde_json::json!({})
    } else {
        value
    }
}

pub async fn list_consumables(State(state): State<AppState>) -> ApiResult<Json<Vec<Consumable>>> {
    let consumables = state.consumables.list().await?;
    Ok(Json(consumables))
}

pub async fn create_consumable(
    State(state): State<AppState>,
    Json(request): Json<ConsumableRequest>,
) -> ApiResult<Response> {
    let (Some(id), Some(name)) = (request.id.as_deref(), request.name.as_deref()) else {
        return Err(ApiError::bad_request("ID and name are required"));
    };
    if id.trim().is_empty() || name.trim().is_empty() {
        return Err(ApiError::bad_request("ID and name are required"));
    }

    state
        .consumables
        .insert(
            id,
            name,
            request.quantity,
            request.company.as_deref(),
            &custom_fields_or_empty(request.custom_fields),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ConsumableInserted {
            id: id.to_string(),
            inserted: true,
        }),
    )
        .into_response())
}

/// Update a consumable. An unknown id is reported as `{updated: 0}`, not
/// an error, matching the plain UPDATE semantics of the other write paths.
pub async fn update_consumable(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ConsumableRequest>,
) -> ApiResult<Json<UpdatedResponse>> {
    let name = request
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Name is required"))?;

    let updated = state
        .consumables
        .update(
            &id,
            name,
            request.quantity,
            request.company.as_deref(),
            &custom_fields_or_empty(request.custom_fields),
        )
        .await?;
    Ok(Json(UpdatedResponse { updated }))
}

pub async fn delete_consumable(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = state.consumables.delete(&id).await?;
    Ok(Json(DeletedResponse { deleted }))
}

pub async fn next_consumable_id(State(state): State<AppState>) -> ApiResult<Json<NextIdResponse>> {
    let id = state.consumables.next_id().await?;
    Ok(Json(NextIdResponse { id }))
}

pub async fn list_consumable_fields(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CustomFieldDef>>> {
    let fields = state.consumables.fields().await?;
    Ok(Json(fields))
}

pub async fn add_consumable_field(
    State(state): State<AppState>,
    Json(def): Json<CustomFieldDef>,
) -> ApiResult<Response> {
    if def.field_name.trim().is_empty() || def.field_type.trim().is_empty() {
        return Err(ApiError::bad_request("fieldName and fieldType are required"));
    }
    state.consumables.add_field(&def).await?;
    Ok((
        StatusCode::CREATED,
        Json(FieldAdded {
            field_name: def.field_name,
            added: true,
        }),
    )
        .into_response())
}

pub async fn delete_consumable_field(
    State(state): State<AppState>,
    Path(field_name): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = state.consumables.delete_field(&field_name).await?;
    Ok(Json(DeletedResponse { deleted }))
}
