//! Puzzle store
//!
//! Puzzles are inserted and read, never updated. Reads join the catalog and
//! user tables so callers get display labels instead of foreign-key integers.

use crate::db::models::{Category, NewPuzzle, PuzzleDetail, PuzzleId, PuzzleSummary};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Grid side length N for an N×N letter string
///
/// Counts characters, not bytes. A space is a hole and still occupies a
/// cell. Returns `None` for an empty string or a non-square length.
pub fn grid_side(letters: &str) -> Option<usize> {
    let cells = letters.chars().count();
    let root = (cells as f64).sqrt() as usize;
    // Float sqrt can land one below the true root
    (root..=root + 1).find(|&side| side > 0 && side * side == cells)
}

/// Insert a puzzle and return its id
///
/// Catalog and author references are checked by the database's foreign keys,
/// not here; a dangling author surfaces as [`Error::Referential`].
pub async fn create_puzzle(pool: &SqlitePool, puzzle: &NewPuzzle) -> Result<PuzzleId> {
    if grid_side(&puzzle.letters).is_none() {
        return Err(Error::Validation(format!(
            "Letter grid for '{}' has {} cells, which is not a square",
            puzzle.name,
            puzzle.letters.chars().count()
        )));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO puzzles (id, name, difficulty, category, author, letters, created)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(puzzle.id)
    .bind(&puzzle.name)
    .bind(puzzle.difficulty.id())
    .bind(puzzle.category.id())
    .bind(puzzle.author)
    .bind(&puzzle.letters)
    .bind(puzzle.created_at)
    .execute(pool)
    .await
    .map_err(Error::from)
    .map_err(|e| {
        if e.is_unique_violation() {
            Error::Validation(format!("Puzzle id {:?} already exists", puzzle.id))
        } else {
            e
        }
    })?;

    let id = result.last_insert_rowid();
    info!("Created puzzle {} '{}' ({})", id, puzzle.name, puzzle.category.name());
    Ok(id)
}

/// Get a puzzle with difficulty, category and author resolved
pub async fn get_puzzle(pool: &SqlitePool, id: PuzzleId) -> Result<Option<PuzzleDetail>> {
    debug!("Get puzzle: {}", id);

    let puzzle = sqlx::query_as::<_, PuzzleDetail>(
        r#"
        SELECT puzzles.id, puzzles.name,
               difficulty.id AS difficulty_id, difficulty.name AS difficulty,
               category.id AS category_id, category.name AS category,
               puzzles.author AS author_id, users.name AS author,
               puzzles.letters, puzzles.created AS created_at
        FROM puzzles
        JOIN difficulty ON puzzles.difficulty = difficulty.id
        JOIN category ON puzzles.category = category.id
        LEFT JOIN users ON puzzles.author = users.id
        WHERE puzzles.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(puzzle)
}

/// List puzzles, optionally restricted to one category
///
/// Ordered by category id then puzzle id, both ascending. Within a single
/// category that is plain puzzle id order.
pub async fn list_puzzles(
    pool: &SqlitePool,
    category: Option<Category>,
) -> Result<Vec<PuzzleSummary>> {
    debug!("Get puzzle list: {:?}", category);

    let puzzles = sqlx::query_as::<_, PuzzleSummary>(
        r#"
        SELECT puzzles.id, puzzles.name, difficulty.name AS difficulty,
               category.id AS category_id, category.name AS category
        FROM puzzles
        JOIN difficulty ON puzzles.difficulty = difficulty.id
        JOIN category ON puzzles.category = category.id
        WHERE ?1 IS NULL OR puzzles.category = ?1
        ORDER BY category.id ASC, puzzles.id ASC
        "#,
    )
    .bind(category.map(Category::id))
    .fetch_all(pool)
    .await?;

    Ok(puzzles)
}

/// Id of the most recently added puzzle (the greatest id)
pub async fn most_recent_puzzle_id(pool: &SqlitePool) -> Result<Option<PuzzleId>> {
    let id = sqlx::query_scalar("SELECT id FROM puzzles ORDER BY id DESC LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

pub async fn puzzle_exists(pool: &SqlitePool, id: PuzzleId) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM puzzles WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Find a puzzle with exactly this name and grid
pub async fn find_puzzle_by_content(
    pool: &SqlitePool,
    name: &str,
    letters: &str,
) -> Result<Option<PuzzleId>> {
    let id = sqlx::query_scalar(
        "SELECT id FROM puzzles WHERE name = ? AND letters = ? ORDER BY id ASC LIMIT 1",
    )
    .bind(name)
    .bind(letters)
    .fetch_optional(pool)
    .await?;
    Ok(id)
}
