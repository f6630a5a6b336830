//! Integration tests for puzzle directory import

use std::fs;
use std::path::Path;
use wordgrid_common::db::init::init_in_memory;
use wordgrid_common::db::{puzzles, words};
use wordgrid_common::import::{import_puzzle_dir, import_puzzle_file, ImportOutcome, ImportReport};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Should write puzzle file");
}

const CURATED: &str = r#"{
    "id": 101,
    "name": "Puzzle 1",
    "difficulty": 2,
    "category": 2,
    "author": 1,
    "created": 1735689600000,
    "letters": "CATSDOGSRATSBATS",
    "words": [["CATS", "0,1,2,3"], ["DOGS", "4,5,6,7"]],
    "bonusWords": [["TAC", "2,1,0"]],
    "excludedWords": [["STAB", "3,2,1,12"]]
}"#;

const UNNUMBERED: &str = r#"{
    "name": "Puzzle 2",
    "difficulty": 1,
    "category": 1,
    "author": 2,
    "letters": "ABCDEFGHI",
    "words": ["ABC"]
}"#;

#[tokio::test]
async fn test_import_directory() {
    let pool = init_in_memory().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a_curated.json", CURATED);
    write(dir.path(), "b_unnumbered.json", UNNUMBERED);
    write(dir.path(), "notes.txt", "not a puzzle");

    let report = import_puzzle_dir(&pool, dir.path()).await.unwrap();
    assert_eq!(
        report,
        ImportReport {
            imported: 2,
            skipped: 0,
            failed: vec![]
        }
    );

    let curated = puzzles::get_puzzle(&pool, 101).await.unwrap().unwrap();
    assert_eq!(curated.name, "Puzzle 1");
    assert_eq!(curated.category, "Daily");
    assert_eq!(curated.author.as_deref(), Some("squaredle"));
    assert_eq!(curated.created_at, 1_735_689_600_000);

    let lists = words::get_words_by_classification(&pool, 101).await.unwrap();
    assert_eq!(lists.normal, vec!["CATS", "DOGS"]);
    assert_eq!(lists.bonus, vec!["TAC"]);
    assert_eq!(lists.excluded, vec!["STAB"]);

    let stored = words::list_words(&pool, 101).await.unwrap();
    assert_eq!(stored[0].path.as_deref(), Some("0,1,2,3"));

    // Unnumbered puzzle got an id after the curated one
    assert_eq!(puzzles::most_recent_puzzle_id(&pool).await.unwrap(), Some(102));
}

#[tokio::test]
async fn test_reimport_skips_existing() {
    let pool = init_in_memory().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a_curated.json", CURATED);
    write(dir.path(), "b_unnumbered.json", UNNUMBERED);

    import_puzzle_dir(&pool, dir.path()).await.unwrap();
    let report = import_puzzle_dir(&pool, dir.path()).await.unwrap();

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 2);
    assert_eq!(puzzles::list_puzzles(&pool, None).await.unwrap().len(), 2);
    assert_eq!(
        words::get_words_by_classification(&pool, 101).await.unwrap().normal.len(),
        2
    );
}

#[tokio::test]
async fn test_bad_files_do_not_stop_import() {
    let pool = init_in_memory().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "1_broken.json", "{ not json");
    write(
        dir.path(),
        "2_not_square.json",
        r#"{"name": "Bad", "difficulty": 0, "category": 0, "author": 0, "letters": "ABC"}"#,
    );
    write(
        dir.path(),
        "3_unknown_author.json",
        r#"{"name": "Ghost", "difficulty": 0, "category": 0, "author": 999, "letters": "ABCD"}"#,
    );
    write(dir.path(), "4_good.json", UNNUMBERED);

    let report = import_puzzle_dir(&pool, dir.path()).await.unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.failed.len(), 3);
    assert!(report.failed[0].ends_with("1_broken.json"));
    assert!(report.failed[2].ends_with("3_unknown_author.json"));
}

#[tokio::test]
async fn test_missing_directory_imports_nothing() {
    let pool = init_in_memory().await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let report = import_puzzle_dir(&pool, &dir.path().join("absent")).await.unwrap();
    assert_eq!(report, ImportReport::default());
}

#[tokio::test]
async fn test_file_in_place_of_directory_imports_nothing() {
    let pool = init_in_memory().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "not_a_dir.json", CURATED);

    let report = import_puzzle_dir(&pool, &dir.path().join("not_a_dir.json"))
        .await
        .expect("Unreadable directory should not fail the import");
    assert_eq!(report, ImportReport::default());
    assert!(!puzzles::puzzle_exists(&pool, 101).await.unwrap());
}

#[tokio::test]
async fn test_import_single_file_outcomes() {
    let pool = init_in_memory().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "curated.json", CURATED);
    let path = dir.path().join("curated.json");

    assert_eq!(
        import_puzzle_file(&pool, &path).await.unwrap(),
        ImportOutcome::Imported(101)
    );
    assert_eq!(
        import_puzzle_file(&pool, &path).await.unwrap(),
        ImportOutcome::Skipped(101)
    );
}
