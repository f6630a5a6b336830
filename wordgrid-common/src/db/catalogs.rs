//! Reference catalog seeding
//!
//! Difficulty, category and classification rows are written from the enums in
//! [`crate::db::models`], along with the system user accounts that authored
//! the bundled puzzles. `INSERT OR IGNORE` makes every run after the first a
//! no-op.

use crate::db::models::{Category, Classification, Difficulty, UserId};
use crate::time::now_millis;
use crate::Result;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Accounts every deployment starts with
///
/// `squaredle` authors test data copied from elsewhere so it is never
/// accidentally released under a real author.
pub const SYSTEM_USERS: [(UserId, &str); 3] = [(0, "admin"), (1, "squaredle"), (2, "tester")];

/// Ensure every catalog row and system user exists
pub async fn seed(pool: &SqlitePool) -> Result<()> {
    seed_difficulties(pool).await?;
    seed_categories(pool).await?;
    seed_classifications(pool).await?;
    seed_system_users(pool).await?;

    info!("Reference catalogs seeded");
    Ok(())
}

async fn seed_difficulties(pool: &SqlitePool) -> Result<()> {
    for difficulty in Difficulty::all() {
        sqlx::query("INSERT OR IGNORE INTO difficulty (id, name) VALUES (?, ?)")
            .bind(difficulty.id())
            .bind(difficulty.label())
            .execute(pool)
            .await?;
    }

    Ok(())
}

async fn seed_categories(pool: &SqlitePool) -> Result<()> {
    for category in Category::ALL {
        sqlx::query("INSERT OR IGNORE INTO category (id, name) VALUES (?, ?)")
            .bind(category.id())
            .bind(category.name())
            .execute(pool)
            .await?;
    }

    Ok(())
}

async fn seed_classifications(pool: &SqlitePool) -> Result<()> {
    for classification in Classification::ALL {
        sqlx::query("INSERT OR IGNORE INTO classification (id, name) VALUES (?, ?)")
            .bind(classification.id())
            .bind(classification.name())
            .execute(pool)
            .await?;
    }

    Ok(())
}

async fn seed_system_users(pool: &SqlitePool) -> Result<()> {
    let enrolled = now_millis();

    for (id, name) in SYSTEM_USERS {
        let result = sqlx::query("INSERT OR IGNORE INTO users (id, name, enrolled) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(enrolled)
            .execute(pool)
            .await?;

        if result.rows_affected() > 0 {
            debug!("Created system user '{}' ({})", name, id);
        }
    }

    Ok(())
}
