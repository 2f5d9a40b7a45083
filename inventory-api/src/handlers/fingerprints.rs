//! Fingerprint report handler.

use axum::{extract::State, Json};

use inventory_db::Fingerprints;

use crate::{error::ApiResult, state::AppState};

/// Known identity values for the scanner, normalized and sorted. Routed
/// behind the scan token middleware.
pub async fn get_fingerprints(State(state): State<AppState>) -> ApiResult<Json<Fingerprints>> {
    let fingerprints = state.assets.fingerprints().await?;
    Ok(Json(fingerprints))
}
