//! Author/player identity directory
//!
//! The authentication service owns these rows. The store only needs ids to
//! exist (puzzle authors are foreign keys) and names to display.

use crate::db::models::UserId;
use crate::time::now_millis;
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Register a new identity and return its id
pub async fn register_user(pool: &SqlitePool, name: &str) -> Result<UserId> {
    let result = sqlx::query("INSERT INTO users (name, enrolled) VALUES (?, ?)")
        .bind(name)
        .bind(now_millis())
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    info!("Registered user '{}' ({})", name, id);
    Ok(id)
}

/// Display name for a user id
pub async fn get_user_name(pool: &SqlitePool, id: UserId) -> Result<Option<String>> {
    let name = sqlx::query_scalar("SELECT name FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_in_memory;

    #[tokio::test]
    async fn test_register_and_lookup() {
        let pool = init_in_memory().await.unwrap();

        let id = register_user(&pool, "wordsmith").await.unwrap();
        assert!(id > 2, "Allocated ids start after the system users");
        assert_eq!(
            get_user_name(&pool, id).await.unwrap().as_deref(),
            Some("wordsmith")
        );
        assert_eq!(get_user_name(&pool, 0).await.unwrap().as_deref(), Some("admin"));
        assert_eq!(get_user_name(&pool, 999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let pool = init_in_memory().await.unwrap();

        let err = register_user(&pool, "tester").await.unwrap_err();
        assert!(err.is_unique_violation());
    }
}
