//! Player progress endpoints
//!
//! The user id in the path comes from the authentication layer in front of
//! this service and is taken as-is.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use wordgrid_common::db::models::{PuzzleId, UserId};
use wordgrid_common::db::progress;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordWordRequest {
    pub word: String,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub words: Vec<String>,
}

/// GET /api/progress/:user/:puzzle
pub async fn get_progress(
    State(state): State<AppState>,
    path: Result<Path<(UserId, PuzzleId)>, PathRejection>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let Path((user, puzzle)) = path?;
    let words = progress::get_found_words(&state.db, user, puzzle).await?;
    Ok(Json(ProgressResponse { words }))
}

/// POST /api/progress/:user/:puzzle
///
/// The word is stored exactly as submitted; only a blank word is rejected.
/// Re-submitting a word already found succeeds.
pub async fn record_progress(
    State(state): State<AppState>,
    path: Result<Path<(UserId, PuzzleId)>, PathRejection>,
    request: Result<Json<RecordWordRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path((user, puzzle)) = path?;
    let Json(request) = request?;
    if request.word.trim().is_empty() {
        return Err(ApiError::BadRequest("Word must not be empty".to_string()));
    }

    progress::record_word(&state.db, user, puzzle, &request.word).await?;
    Ok(StatusCode::NO_CONTENT)
}
