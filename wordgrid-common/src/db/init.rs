//! Database initialization
//!
//! Creates the database file on first run, creates every table with
//! `CREATE TABLE IF NOT EXISTS`, and seeds the reference catalogs. Safe to run
//! against an existing database.

use crate::db::catalogs;
use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Open (creating if needed) the database at `db_path` and bring the schema up
///
/// Any failure here is reported as [`Error::StoreUnavailable`]; the caller
/// treats that as fatal at startup.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::StoreUnavailable(format!(
                    "Cannot create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // WAL lets readers proceed while a single writer holds the lock
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .map_err(|e| {
            Error::StoreUnavailable(format!("Cannot open database {}: {}", db_path.display(), e))
        })?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    prepare(&pool).await?;
    Ok(pool)
}

/// Open a private in-memory database with the full schema
///
/// Limited to one connection that is never recycled: every SQLite in-memory
/// connection is its own database.
pub async fn init_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

    prepare(&pool).await?;
    Ok(pool)
}

async fn prepare(pool: &SqlitePool) -> Result<()> {
    create_schema(pool)
        .await
        .map_err(|e| Error::StoreUnavailable(format!("Schema creation failed: {}", e)))?;
    catalogs::seed(pool).await?;
    Ok(())
}

/// Create every table and index (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Reference tables
    create_difficulty_table(pool).await?;
    create_category_table(pool).await?;
    create_classification_table(pool).await?;

    // Externally managed identities
    create_users_table(pool).await?;

    // Content and gameplay tables
    create_puzzles_table(pool).await?;
    create_words_table(pool).await?;
    create_rotation_table(pool).await?;
    create_progress_table(pool).await?;

    Ok(())
}

async fn create_difficulty_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS difficulty (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_category_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_classification_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classification (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the users table
///
/// Only the identity and display name live here. Credentials belong to the
/// authentication service that owns this table's rows.
async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            enrolled INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the puzzles table
///
/// `AUTOINCREMENT` keeps allocated ids strictly increasing, so the greatest
/// id is always the most recently inserted puzzle.
async fn create_puzzles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS puzzles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            difficulty INTEGER NOT NULL REFERENCES difficulty(id),
            category INTEGER NOT NULL REFERENCES category(id),
            author INTEGER NOT NULL REFERENCES users(id),
            letters TEXT NOT NULL,
            created INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_puzzles_category ON puzzles(category, id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_words_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            puzzle INTEGER NOT NULL REFERENCES puzzles(id) ON DELETE CASCADE,
            word TEXT NOT NULL,
            path TEXT,
            classification INTEGER NOT NULL REFERENCES classification(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_words_puzzle ON words(puzzle)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the rotation table
///
/// Append-only. The index on `activates_at` keeps "latest entry before T" a
/// bounded index seek however long the schedule grows.
async fn create_rotation_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rotation (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            activates_at INTEGER NOT NULL,
            message TEXT,
            puzzle INTEGER NOT NULL REFERENCES puzzles(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_rotation_activates_at ON rotation(activates_at, id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the progress table
///
/// `user` is an opaque identity from the authentication service, so it
/// carries no foreign key.
async fn create_progress_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS progress (
            user INTEGER NOT NULL,
            puzzle INTEGER NOT NULL REFERENCES puzzles(id) ON DELETE CASCADE,
            word TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_progress_user_puzzle ON progress(user, puzzle)")
        .execute(pool)
        .await?;

    Ok(())
}
