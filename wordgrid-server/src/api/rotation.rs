//! Rotation schedule endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use wordgrid_common::db::models::{PuzzleId, RotationEntry, RotationId};
use wordgrid_common::db::rotation;
use wordgrid_common::time::{now_millis, EpochMillis};

use crate::api::ApiError;
use crate::AppState;

const DEFAULT_LIST_LIMIT: u32 = 50;
const MAX_LIST_LIMIT: u32 = 1000;

#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
    /// Instant to resolve at (epoch ms); defaults to now
    pub at: Option<EpochMillis>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

/// The rotation puzzle for an instant; `id` is the puzzle id
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPuzzleResponse {
    pub id: PuzzleId,
    pub activates_at: EpochMillis,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntryRequest {
    pub activates_at: EpochMillis,
    pub message: Option<String>,
    pub puzzle: PuzzleId,
}

#[derive(Debug, Serialize)]
pub struct NewEntryResponse {
    pub id: RotationId,
}

#[derive(Debug, Serialize)]
pub struct RotationListResponse {
    pub entries: Vec<RotationEntry>,
}

/// GET /api/rotation/current?at=ms
pub async fn current_rotation(
    State(state): State<AppState>,
    query: Result<Query<CurrentQuery>, QueryRejection>,
) -> Result<Json<CurrentPuzzleResponse>, ApiError> {
    let Query(query) = query?;
    let as_of = query.at.unwrap_or_else(now_millis);

    let entry = rotation::resolve_active_with(&state.db, as_of, state.rotation_boundary)
        .await?
        .ok_or_else(|| ApiError::NotFound("No puzzle is scheduled".to_string()))?;

    Ok(Json(CurrentPuzzleResponse {
        id: entry.puzzle,
        activates_at: entry.activates_at,
        message: entry.message,
    }))
}

/// GET /api/rotation?limit=N
///
/// Newest entries first, past and future alike.
pub async fn list_rotation(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<RotationListResponse>, ApiError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    let entries = rotation::list_entries(&state.db, limit).await?;
    Ok(Json(RotationListResponse { entries }))
}

/// POST /api/rotation
pub async fn add_rotation_entry(
    State(state): State<AppState>,
    request: Result<Json<NewEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NewEntryResponse>), ApiError> {
    let Json(request) = request?;
    let id = rotation::add_entry(
        &state.db,
        request.activates_at,
        request.message.as_deref(),
        request.puzzle,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(NewEntryResponse { id })))
}
