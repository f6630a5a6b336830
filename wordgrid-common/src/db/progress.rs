//! Progress ledger
//!
//! One row per word a user found in a puzzle. Writes never check for an
//! earlier identical row; reads collapse duplicates, so re-submitting a
//! found word is harmless.

use crate::db::models::{PuzzleId, UserId};
use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Record that `user` found `word` in `puzzle`
pub async fn record_word(
    pool: &SqlitePool,
    user: UserId,
    puzzle: PuzzleId,
    word: &str,
) -> Result<()> {
    debug!("Record progress: user {} puzzle {} word {}", user, puzzle, word);

    sqlx::query("INSERT INTO progress (user, puzzle, word) VALUES (?, ?, ?)")
        .bind(user)
        .bind(puzzle)
        .bind(word)
        .execute(pool)
        .await?;

    Ok(())
}

/// Distinct words `user` has found in `puzzle`, in order of first discovery
pub async fn get_found_words(
    pool: &SqlitePool,
    user: UserId,
    puzzle: PuzzleId,
) -> Result<Vec<String>> {
    let words = sqlx::query_scalar(
        r#"
        SELECT word
        FROM progress
        WHERE user = ? AND puzzle = ?
        GROUP BY word
        ORDER BY MIN(rowid) ASC
        "#,
    )
    .bind(user)
    .bind(puzzle)
    .fetch_all(pool)
    .await?;

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_in_memory;
    use crate::db::models::{Category, Difficulty, NewPuzzle};
    use crate::db::puzzles::create_puzzle;
    use crate::Error;

    async fn setup() -> (SqlitePool, PuzzleId) {
        let pool = init_in_memory().await.unwrap();
        let id = create_puzzle(
            &pool,
            &NewPuzzle {
                id: None,
                name: "Progress".to_string(),
                difficulty: Difficulty::new(0).unwrap(),
                category: Category::Express,
                author: 2,
                letters: "CATSHOESBIRDWORM".to_string(),
                created_at: 0,
            },
        )
        .await
        .unwrap();
        (pool, id)
    }

    #[tokio::test]
    async fn test_record_twice_reported_once() {
        let (pool, puzzle) = setup().await;

        record_word(&pool, 7, puzzle, "cat").await.unwrap();
        record_word(&pool, 7, puzzle, "cat").await.unwrap();

        assert_eq!(get_found_words(&pool, 7, puzzle).await.unwrap(), vec!["cat"]);
    }

    #[tokio::test]
    async fn test_discovery_order_kept() {
        let (pool, puzzle) = setup().await;

        for word in ["SHOE", "CATS", "SHOE", "BIRD", "CATS"] {
            record_word(&pool, 7, puzzle, word).await.unwrap();
        }

        assert_eq!(
            get_found_words(&pool, 7, puzzle).await.unwrap(),
            vec!["SHOE", "CATS", "BIRD"]
        );
    }

    #[tokio::test]
    async fn test_progress_isolated_per_user_and_puzzle() {
        let (pool, puzzle) = setup().await;

        record_word(&pool, 7, puzzle, "CATS").await.unwrap();
        record_word(&pool, 8, puzzle, "WORM").await.unwrap();

        assert_eq!(get_found_words(&pool, 7, puzzle).await.unwrap(), vec!["CATS"]);
        assert_eq!(get_found_words(&pool, 8, puzzle).await.unwrap(), vec!["WORM"]);
        assert!(get_found_words(&pool, 9, puzzle).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_progress_for_missing_puzzle_rejected() {
        let (pool, puzzle) = setup().await;

        let err = record_word(&pool, 7, puzzle + 1, "CATS").await.unwrap_err();
        assert!(matches!(err, Error::Referential(_)), "got {:?}", err);
    }
}
