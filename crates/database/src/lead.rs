//! Sales lead tracking.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Lead, LeadStatus};
use crate::validation::validate_notes;

/// Default lead source for users arriving through the bot.
pub const DEFAULT_SOURCE: &str = "telegram";

/// Open a new lead for a user with status `new`.
pub async fn create_lead(
    pool: &SqlitePool,
    user_id: i64,
    source: &str,
    notes: Option<&str>,
) -> Result<Lead> {
    if let Some(notes) = notes {
        validate_notes(notes)?;
    }

    let lead = sqlx::query_as::<_, Lead>(
        r#"
        INSERT INTO leads (user_id, source, notes)
        VALUES (?, ?, ?)
        RETURNING id, user_id, status, source, notes, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(source)
    .bind(notes)
    .fetch_one(pool)
    .await
    .map_err(|e| DatabaseError::from_user_write(e, user_id))?;

    tracing::info!("Opened lead {} for user {}", lead.id, user_id);
    Ok(lead)
}

/// Get a lead by id.
pub async fn get_lead(pool: &SqlitePool, id: i64) -> Result<Lead> {
    sqlx::query_as::<_, Lead>(
        r#"
        SELECT id, user_id, status, source, notes, created_at, updated_at
        FROM leads
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Lead",
        id: id.to_string(),
    })
}

/// Move a lead to `status`, replacing its notes when given.
pub async fn update_lead_status(
    pool: &SqlitePool,
    id: i64,
    status: LeadStatus,
    notes: Option<&str>,
) -> Result<Lead> {
    if let Some(notes) = notes {
        validate_notes(notes)?;
    }

    sqlx::query_as::<_, Lead>(
        r#"
        UPDATE leads
        SET status = ?,
            notes = COALESCE(?, notes),
            updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        WHERE id = ?
        RETURNING id, user_id, status, source, notes, created_at, updated_at
        "#,
    )
    .bind(status)
    .bind(notes)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Lead",
        id: id.to_string(),
    })
}

/// List leads in a given status, most recently updated first.
pub async fn list_leads_by_status(pool: &SqlitePool, status: LeadStatus) -> Result<Vec<Lead>> {
    let leads = sqlx::query_as::<_, Lead>(
        r#"
        SELECT id, user_id, status, source, notes, created_at, updated_at
        FROM leads
        WHERE status = ?
        ORDER BY updated_at DESC, id DESC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(leads)
}
