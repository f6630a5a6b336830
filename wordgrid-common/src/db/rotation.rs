//! Rotation schedule
//!
//! An append-only log of `(activates_at, puzzle)` entries. The current puzzle
//! is never stored; it is recomputed per query as the entry with the greatest
//! `activates_at` before the query instant. Past entries stay for audit,
//! future entries wait their turn.
//!
//! Tie-break: entries sharing an `activates_at` resolve to the one inserted
//! last (highest id).

use crate::db::models::{PuzzleId, RotationEntry, RotationId};
use crate::time::EpochMillis;
use crate::Result;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Whether an entry is active at the exact instant it activates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationBoundary {
    /// Active strictly after `activates_at` (`activates_at < as_of`)
    #[default]
    Exclusive,
    /// Active from `activates_at` itself (`activates_at <= as_of`)
    Inclusive,
}

/// Append an entry to the schedule
///
/// Timestamps need not be unique or in the future; backfilling is allowed.
pub async fn add_entry(
    pool: &SqlitePool,
    activates_at: EpochMillis,
    message: Option<&str>,
    puzzle: PuzzleId,
) -> Result<RotationId> {
    let result = sqlx::query("INSERT INTO rotation (activates_at, message, puzzle) VALUES (?, ?, ?)")
        .bind(activates_at)
        .bind(message)
        .bind(puzzle)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    info!("Scheduled puzzle {} to activate at {} (entry {})", puzzle, activates_at, id);
    Ok(id)
}

/// The entry active at `as_of`, using the strict boundary
pub async fn resolve_active(pool: &SqlitePool, as_of: EpochMillis) -> Result<Option<RotationEntry>> {
    resolve_active_with(pool, as_of, RotationBoundary::Exclusive).await
}

/// The entry active at `as_of` under the given boundary policy
///
/// One index seek on `activates_at`; never loads the schedule.
pub async fn resolve_active_with(
    pool: &SqlitePool,
    as_of: EpochMillis,
    boundary: RotationBoundary,
) -> Result<Option<RotationEntry>> {
    let sql = match boundary {
        RotationBoundary::Exclusive => {
            r#"
            SELECT id, activates_at, message, puzzle
            FROM rotation
            WHERE activates_at < ?
            ORDER BY activates_at DESC, id DESC
            LIMIT 1
            "#
        }
        RotationBoundary::Inclusive => {
            r#"
            SELECT id, activates_at, message, puzzle
            FROM rotation
            WHERE activates_at <= ?
            ORDER BY activates_at DESC, id DESC
            LIMIT 1
            "#
        }
    };

    let entry = sqlx::query_as::<_, RotationEntry>(sql)
        .bind(as_of)
        .fetch_optional(pool)
        .await?;

    debug!("Rotation at {} ({:?}): {:?}", as_of, boundary, entry.as_ref().map(|e| e.puzzle));
    Ok(entry)
}

/// Most recent entries first, at most `limit` of them
pub async fn list_entries(pool: &SqlitePool, limit: u32) -> Result<Vec<RotationEntry>> {
    let entries = sqlx::query_as::<_, RotationEntry>(
        r#"
        SELECT id, activates_at, message, puzzle
        FROM rotation
        ORDER BY activates_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
