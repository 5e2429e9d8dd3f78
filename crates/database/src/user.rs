//! User registration and lead flagging.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::User;
use crate::validation::validate_phone;

const USER_COLUMNS: &str =
    "id, external_id, first_name, last_name, username, phone, is_lead, created_at";

/// Return the user with `external_id`, creating it on first contact.
///
/// Safe under concurrent first contact: the insert is a no-op when another
/// request already created the row.
pub async fn find_or_create_user(
    pool: &SqlitePool,
    external_id: i64,
    first_name: &str,
    last_name: Option<&str>,
    username: Option<&str>,
) -> Result<User> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO users (external_id, first_name, last_name, username)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(external_id) DO NOTHING
        "#,
    )
    .bind(external_id)
    .bind(first_name)
    .bind(last_name)
    .bind(username)
    .execute(pool)
    .await?;

    if inserted.rows_affected() > 0 {
        tracing::info!("Registered new user {}", external_id);
    }

    get_user_by_external_id(pool, external_id).await
}

/// Get a user by internal id.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        })
}

/// Get a user by Telegram id.
pub async fn get_user_by_external_id(pool: &SqlitePool, external_id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE external_id = ?",
        USER_COLUMNS
    ))
    .bind(external_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: external_id.to_string(),
    })
}

/// Flag a user as a sales lead.
pub async fn mark_as_lead(pool: &SqlitePool, external_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET is_lead = 1
        WHERE external_id = ?
        "#,
    )
    .bind(external_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: external_id.to_string(),
        });
    }

    Ok(())
}

/// Store a validated phone number for a user.
pub async fn update_phone(pool: &SqlitePool, external_id: i64, phone: &str) -> Result<()> {
    let phone = validate_phone(phone)?;

    let result = sqlx::query(
        r#"
        UPDATE users
        SET phone = ?
        WHERE external_id = ?
        "#,
    )
    .bind(phone)
    .bind(external_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: external_id.to_string(),
        });
    }

    Ok(())
}

/// List users flagged as leads, newest first.
pub async fn list_leads(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE is_lead = 1 ORDER BY created_at DESC, id DESC",
        USER_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Count registered users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
