//! Puzzle file import
//!
//! Loads a directory of JSON puzzle descriptions into the store at startup.
//! Each file becomes one `create_puzzle` call followed by one `add_word` call
//! per listed word. A puzzle already in the store (same explicit id, or same
//! name and letters) is skipped so restarting the service does not duplicate
//! content.
//!
//! File format:
//!
//! ```json
//! {
//!   "id": 101,
//!   "name": "Puzzle 1",
//!   "difficulty": 2,
//!   "category": 1,
//!   "author": 1,
//!   "created": 1735689600000,
//!   "letters": "CATSDOGSRATSBATS",
//!   "words": [["CATS", "0,1,2,3"], ["DOGS"]],
//!   "bonusWords": ["TAC"],
//!   "excludedWords": []
//! }
//! ```
//!
//! `id` and `created` are optional, as are the three word lists.

use crate::db::models::{Category, Classification, Difficulty, NewPuzzle, PuzzleId, UserId};
use crate::db::{puzzles, words};
use crate::time::{now_millis, EpochMillis};
use crate::Result;
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One puzzle description file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleFile {
    #[serde(default)]
    pub id: Option<PuzzleId>,
    pub name: String,
    pub difficulty: Difficulty,
    pub category: Category,
    pub author: UserId,
    #[serde(default)]
    pub created: Option<EpochMillis>,
    pub letters: String,
    #[serde(default)]
    pub words: Vec<WordEntry>,
    #[serde(default)]
    pub bonus_words: Vec<WordEntry>,
    #[serde(default)]
    pub excluded_words: Vec<WordEntry>,
}

/// A listed word: `"WORD"`, `["WORD"]` or `["WORD", path]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WordEntry {
    Text(String),
    WithPath(String, Value),
    Single((String,)),
}

impl WordEntry {
    pub fn text(&self) -> &str {
        match self {
            WordEntry::Text(text) | WordEntry::WithPath(text, _) | WordEntry::Single((text,)) => {
                text
            }
        }
    }

    /// Path as stored: strings verbatim, other JSON values serialized
    pub fn path(&self) -> Option<String> {
        match self {
            WordEntry::WithPath(_, Value::Null) => None,
            WordEntry::WithPath(_, Value::String(path)) => Some(path.clone()),
            WordEntry::WithPath(_, other) => Some(other.to_string()),
            WordEntry::Text(_) | WordEntry::Single(_) => None,
        }
    }
}

/// What happened to one puzzle file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(PuzzleId),
    /// Already present under this id
    Skipped(PuzzleId),
}

/// Totals for one directory import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    /// Files that could not be read, parsed or stored
    pub failed: Vec<PathBuf>,
}

/// Import every `*.json` file in `dir`, in file name order
///
/// An unreadable or missing directory yields an empty report. A bad file is
/// logged and counted as failed; it does not stop the remaining files.
pub async fn import_puzzle_dir(pool: &SqlitePool, dir: &Path) -> Result<ImportReport> {
    info!("Import puzzle data from {}", dir.display());

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Puzzle directory {} does not exist, nothing imported", dir.display());
            return Ok(ImportReport::default());
        }
        Err(e) => {
            warn!("Cannot read puzzle directory {}: {}, nothing imported", dir.display(), e);
            return Ok(ImportReport::default());
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();

    let mut report = ImportReport::default();
    for path in files {
        match import_puzzle_file(pool, &path).await {
            Ok(ImportOutcome::Imported(_)) => report.imported += 1,
            Ok(ImportOutcome::Skipped(_)) => report.skipped += 1,
            Err(e) => {
                warn!("Failed to import {}: {}", path.display(), e);
                report.failed.push(path);
            }
        }
    }

    info!(
        "Puzzle import complete: {} imported, {} skipped, {} failed",
        report.imported,
        report.skipped,
        report.failed.len()
    );
    Ok(report)
}

/// Parse and import a single puzzle file
pub async fn import_puzzle_file(pool: &SqlitePool, path: &Path) -> Result<ImportOutcome> {
    let content = std::fs::read_to_string(path)?;
    let file: PuzzleFile = serde_json::from_str(&content)?;
    import_puzzle(pool, &file).await
}

/// Store one parsed puzzle and its words unless it is already present
pub async fn import_puzzle(pool: &SqlitePool, file: &PuzzleFile) -> Result<ImportOutcome> {
    let existing = match file.id {
        Some(id) => puzzles::puzzle_exists(pool, id).await?.then_some(id),
        None => puzzles::find_puzzle_by_content(pool, &file.name, &file.letters).await?,
    };
    if let Some(id) = existing {
        info!("Puzzle '{}' already present as {}, skipped", file.name, id);
        return Ok(ImportOutcome::Skipped(id));
    }

    let id = puzzles::create_puzzle(
        pool,
        &NewPuzzle {
            id: file.id,
            name: file.name.clone(),
            difficulty: file.difficulty,
            category: file.category,
            author: file.author,
            letters: file.letters.clone(),
            created_at: file.created.unwrap_or_else(now_millis),
        },
    )
    .await?;

    let lists = [
        (Classification::Normal, &file.words),
        (Classification::Bonus, &file.bonus_words),
        (Classification::Excluded, &file.excluded_words),
    ];
    for (classification, entries) in lists {
        for entry in entries {
            let path = entry.path();
            words::add_word(pool, id, entry.text(), path.as_deref(), classification).await?;
        }
    }

    Ok(ImportOutcome::Imported(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let file: PuzzleFile = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Full",
                "difficulty": 2,
                "category": 1,
                "author": 1,
                "created": 1735689600000,
                "letters": "CATSDOGSRATSBATS",
                "words": [["CATS", "0,1,2,3"], ["DOGS", [4, 5, 6, 7]], ["RATS"]],
                "bonusWords": ["TAC"],
                "excludedWords": [["STAB", null]]
            }"#,
        )
        .unwrap();

        assert_eq!(file.id, Some(7));
        assert_eq!(file.category, Category::Express);
        assert_eq!(file.difficulty.stars(), 2);
        assert_eq!(file.words.len(), 3);
        assert_eq!(file.words[0].text(), "CATS");
        assert_eq!(file.words[0].path().as_deref(), Some("0,1,2,3"));
        assert_eq!(file.words[1].path().as_deref(), Some("[4,5,6,7]"));
        assert_eq!(file.words[2].text(), "RATS");
        assert_eq!(file.words[2].path(), None);
        assert_eq!(file.bonus_words[0].text(), "TAC");
        assert_eq!(file.excluded_words[0].path(), None);
    }

    #[test]
    fn test_parse_minimal_file() {
        let file: PuzzleFile = serde_json::from_str(
            r#"{"name": "Min", "difficulty": 0, "category": 0, "author": 0, "letters": "ABCD"}"#,
        )
        .unwrap();

        assert_eq!(file.id, None);
        assert_eq!(file.created, None);
        assert!(file.words.is_empty() && file.bonus_words.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let result = serde_json::from_str::<PuzzleFile>(
            r#"{"name": "X", "difficulty": 0, "category": 9, "author": 0, "letters": "ABCD"}"#,
        );
        assert!(result.is_err());
    }
}
