//! Audit log of product questions.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::ProductInquiry;

/// Record a product inquiry for a user.
pub async fn record_inquiry(
    pool: &SqlitePool,
    user_id: i64,
    product_name: &str,
    query: &str,
    response: Option<&str>,
) -> Result<ProductInquiry> {
    sqlx::query_as::<_, ProductInquiry>(
        r#"
        INSERT INTO product_inquiries (user_id, product_name, query, response)
        VALUES (?, ?, ?, ?)
        RETURNING id, user_id, product_name, query, response, created_at
        "#,
    )
    .bind(user_id)
    .bind(product_name)
    .bind(query)
    .bind(response)
    .fetch_one(pool)
    .await
    .map_err(|e| DatabaseError::from_user_write(e, user_id))
}

/// List a user's inquiries, newest first.
pub async fn list_inquiries(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<ProductInquiry>> {
    let rows = sqlx::query_as::<_, ProductInquiry>(
        r#"
        SELECT id, user_id, product_name, query, response, created_at
        FROM product_inquiries
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
