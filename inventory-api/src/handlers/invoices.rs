//! Invoice handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    dto::{
        AddInvoiceRequest, ConfirmQuery, InvoiceAdded, InvoiceDeletedResponse, InvoiceListResponse,
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Register an invoice URL against an asset.
pub async fn add_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddInvoiceRequest>,
) -> ApiResult<(StatusCode, Json<InvoiceAdded>)> {
    let url = request.url.trim().to_string();
    if url.is_empty() {
        return Err(ApiError::bad_request("Invoice URL is required"));
    }
    state.invoices.add(&id, &url).await?;
    Ok((StatusCode::CREATED, Json(InvoiceAdded { url })))
}

/// All invoices for one asset, oldest first.
pub async fn list_invoices(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<InvoiceListResponse>> {
    let invoices = state.invoices.list(&id).await?;
    Ok(Json(InvoiceListResponse { invoices }))
}

/// Delete one invoice. Destructive, so the caller must confirm explicitly
/// with `?confirm=true`.
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path((id, invoice_id)): Path<(String, i64)>,
    Query(query): Query<ConfirmQuery>,
) -> ApiResult<Json<InvoiceDeletedResponse>> {
    if query.confirm.as_deref() != Some("true") {
        return Err(ApiError::bad_request(
            "Confirmation required. Re-send with ?confirm=true after user confirms.",
        ));
    }
    let deletion = state.invoices.delete(&id, invoice_id).await?;
    Ok(Json(InvoiceDeletedResponse {
        deleted: true,
        deleted_invoice_url: deletion.deleted_url,
        latest_invoice_url: deletion.latest_url,
        remaining: deletion.remaining,
    }))
}
