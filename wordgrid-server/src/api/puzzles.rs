//! Puzzle endpoints

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use wordgrid_common::db::models::{Category, PuzzleDetail, PuzzleId, PuzzleSummary};
use wordgrid_common::db::{puzzles, words};

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PuzzleListResponse {
    pub puzzles: Vec<PuzzleSummary>,
}

/// A puzzle together with its word lists
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleResponse {
    #[serde(flatten)]
    pub puzzle: PuzzleDetail,
    pub words: Vec<String>,
    pub bonus_words: Vec<String>,
    pub excluded_words: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PuzzleIdResponse {
    pub id: PuzzleId,
}

/// GET /api/puzzles?category=N
///
/// All puzzles by category then id, or one category's puzzles by id.
pub async fn list_puzzles(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PuzzleListResponse>, ApiError> {
    let Query(query) = query?;
    let category = query
        .category
        .map(Category::try_from)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let puzzles = puzzles::list_puzzles(&state.db, category).await?;
    Ok(Json(PuzzleListResponse { puzzles }))
}

/// GET /api/puzzle/:id
///
/// An id that is not a number cannot name a puzzle and gets the same 404.
pub async fn get_puzzle(
    State(state): State<AppState>,
    id: Result<Path<PuzzleId>, PathRejection>,
) -> Result<Json<PuzzleResponse>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::NotFound("Puzzle not found".to_string()))?;
    let puzzle = puzzles::get_puzzle(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Puzzle not found".to_string()))?;
    let lists = words::get_words_by_classification(&state.db, id).await?;

    Ok(Json(PuzzleResponse {
        puzzle,
        words: lists.normal,
        bonus_words: lists.bonus,
        excluded_words: lists.excluded,
    }))
}

/// GET /api/latestpuzzle
///
/// The most recently added puzzle.
pub async fn latest_puzzle(
    State(state): State<AppState>,
) -> Result<Json<PuzzleIdResponse>, ApiError> {
    let id = puzzles::most_recent_puzzle_id(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("No puzzles available".to_string()))?;
    Ok(Json(PuzzleIdResponse { id }))
}
