//! Word catalog
//!
//! Words belong to a puzzle under exactly one classification. Duplicate
//! (puzzle, word) rows are an authoring mistake, not something the schema
//! rejects.

use crate::db::models::{Classification, PuzzleId, Word, WordId, WordLists};
use crate::Result;
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// Add a word to a puzzle
///
/// `path` is the authoring tool's encoded cell path, stored verbatim.
pub async fn add_word(
    pool: &SqlitePool,
    puzzle: PuzzleId,
    text: &str,
    path: Option<&str>,
    classification: Classification,
) -> Result<WordId> {
    let result = sqlx::query(
        "INSERT INTO words (puzzle, word, path, classification) VALUES (?, ?, ?, ?)",
    )
    .bind(puzzle)
    .bind(text)
    .bind(path)
    .bind(classification.id())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// A puzzle's words split into normal, bonus and excluded lists
///
/// Each list keeps insertion order. A puzzle with no words (or no such
/// puzzle) yields three empty lists.
pub async fn get_words_by_classification(
    pool: &SqlitePool,
    puzzle: PuzzleId,
) -> Result<WordLists> {
    debug!("Get puzzle words: {}", puzzle);

    let mut lists = WordLists::default();
    for word in list_words(pool, puzzle).await? {
        lists.push(word.classification, word.text);
    }

    Ok(lists)
}

/// Every word row of a puzzle in insertion order
pub async fn list_words(pool: &SqlitePool, puzzle: PuzzleId) -> Result<Vec<Word>> {
    let rows = sqlx::query(
        r#"
        SELECT id, puzzle, word, path, classification
        FROM words
        WHERE puzzle = ?
        ORDER BY id ASC
        "#,
    )
    .bind(puzzle)
    .fetch_all(pool)
    .await?;

    let mut words = Vec::with_capacity(rows.len());
    for row in rows {
        words.push(Word {
            id: row.get("id"),
            puzzle: row.get("puzzle"),
            text: row.get("word"),
            path: row.get("path"),
            classification: Classification::try_from(row.get::<i64, _>("classification"))?,
        });
    }

    Ok(words)
}
