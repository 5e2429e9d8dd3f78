//! Conversation history persistence.
//!
//! Messages for a user are ordered by `(created_at, id)`. Only user and
//! assistant text is stored here; capability calls stay inside the turn.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{ConversationMessage, MessageRole};

/// Append a message to a user's history.
///
/// Returns `NotFound` when the user does not exist.
pub async fn append_message(
    pool: &SqlitePool,
    user_id: i64,
    role: MessageRole,
    content: &str,
) -> Result<ConversationMessage> {
    sqlx::query_as::<_, ConversationMessage>(
        r#"
        INSERT INTO conversations (user_id, role, content)
        VALUES (?, ?, ?)
        RETURNING id, user_id, role, content, created_at
        "#,
    )
    .bind(user_id)
    .bind(role)
    .bind(content)
    .fetch_one(pool)
    .await
    .map_err(|e| DatabaseError::from_user_write(e, user_id))
}

/// Append the user message and the assistant reply of one turn atomically.
pub async fn append_exchange(
    pool: &SqlitePool,
    user_id: i64,
    user_text: &str,
    assistant_text: &str,
) -> Result<(ConversationMessage, ConversationMessage)> {
    let mut tx = pool.begin().await?;

    let mut stored = Vec::with_capacity(2);
    for (role, content) in [
        (MessageRole::User, user_text),
        (MessageRole::Assistant, assistant_text),
    ] {
        let message = sqlx::query_as::<_, ConversationMessage>(
            r#"
            INSERT INTO conversations (user_id, role, content)
            VALUES (?, ?, ?)
            RETURNING id, user_id, role, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(role)
        .bind(content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_user_write(e, user_id))?;
        stored.push(message);
    }

    tx.commit().await?;

    let assistant = stored.pop();
    let user = stored.pop();
    match (user, assistant) {
        (Some(user), Some(assistant)) => Ok((user, assistant)),
        _ => Err(DatabaseError::Sqlx(sqlx::Error::RowNotFound)),
    }
}

/// Fetch up to `limit` of the newest messages, returned oldest first.
pub async fn recent_messages(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ConversationMessage>> {
    let mut rows = sqlx::query_as::<_, ConversationMessage>(
        r#"
        SELECT id, user_id, role, content, created_at
        FROM conversations
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.reverse();
    Ok(rows)
}

/// Delete all but the `keep_last` newest messages of a user.
///
/// Returns the number of rows deleted.
pub async fn prune_older_than(pool: &SqlitePool, user_id: i64, keep_last: i64) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM conversations
        WHERE user_id = ?
          AND id NOT IN (
            SELECT id FROM conversations
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
          )
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(keep_last.max(0))
    .execute(pool)
    .await?;

    let deleted = result.rows_affected();
    if deleted > 0 {
        tracing::debug!("Pruned {} messages for user {}", deleted, user_id);
    }

    Ok(deleted)
}

/// Count stored messages for a user.
pub async fn count_messages(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM conversations WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
