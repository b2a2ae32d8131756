//! Database operations for messages
//!
//! Content is stored as `jsonb` and is always the sanitized document.

use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool, Row};
use uuid::Uuid;

use crate::shared::content::SanitizedDoc;
use crate::shared::messaging::{Destination, Message};

fn message_from_row(row: &PgRow) -> Result<Message, sqlx::Error> {
    let Json(content) = row.try_get::<Json<SanitizedDoc>, _>("content")?;
    Ok(Message {
        id: row.get("id"),
        content,
        author_id: row.get("author_id"),
        dm_conversation_id: row.get("dm_conversation_id"),
        room_id: row.get("room_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Insert a message at its destination
pub async fn create_message<'e>(
    executor: impl PgExecutor<'e>,
    author_id: Uuid,
    destination: Destination,
    content: &SanitizedDoc,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let (dm_conversation_id, room_id) = destination.columns();

    sqlx::query(
        r#"
        INSERT INTO messages (id, content, author_id, dm_conversation_id, room_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        "#
    )
    .bind(id)
    .bind(Json(content))
    .bind(author_id)
    .bind(dm_conversation_id)
    .bind(room_id)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(Message {
        id,
        content: content.clone(),
        author_id,
        dm_conversation_id,
        room_id,
        created_at: now,
        updated_at: Some(now),
    })
}

/// Get a message by ID
pub async fn get_message(pool: &PgPool, message_id: Uuid) -> Result<Option<Message>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, content, author_id, dm_conversation_id, room_id, created_at, updated_at
        FROM messages
        WHERE id = $1
        "#
    )
    .bind(message_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(message_from_row).transpose()
}

/// Replace a message's content
pub async fn update_message_content(
    pool: &PgPool,
    message_id: Uuid,
    content: &SanitizedDoc,
) -> Result<Option<Message>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE messages
        SET content = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, content, author_id, dm_conversation_id, room_id, created_at, updated_at
        "#
    )
    .bind(Json(content))
    .bind(Utc::now())
    .bind(message_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(message_from_row).transpose()
}

/// Delete a message
pub async fn delete_message(pool: &PgPool, message_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM messages WHERE id = $1")
        .bind(message_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// One page of a destination's messages, newest first
pub async fn list_messages(
    pool: &PgPool,
    destination: Destination,
    limit: u32,
    offset: u32,
) -> Result<Vec<Message>, sqlx::Error> {
    let query = match destination {
        Destination::Direct(_) => {
            r#"
            SELECT id, content, author_id, dm_conversation_id, room_id, created_at, updated_at
            FROM messages
            WHERE dm_conversation_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        }
        Destination::Room(_) => {
            r#"
            SELECT id, content, author_id, dm_conversation_id, room_id, created_at, updated_at
            FROM messages
            WHERE room_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        }
    };

    let rows = sqlx::query(query)
        .bind(destination.id())
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(pool)
        .await?;

    rows.iter().map(message_from_row).collect()
}

/// Most recent message in a DM conversation
pub async fn latest_message(pool: &PgPool, conversation_id: Uuid) -> Result<Option<Message>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, content, author_id, dm_conversation_id, room_id, created_at, updated_at
        FROM messages
        WHERE dm_conversation_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(message_from_row).transpose()
}

/// Server that owns a room
pub async fn room_server_id(pool: &PgPool, room_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    let row = sqlx::query("SELECT server_id FROM rooms WHERE id = $1")
        .bind(room_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("server_id")))
}

/// Whether a user is a member of a server
pub async fn is_server_member(pool: &PgPool, server_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM server_members
            WHERE server_id = $1 AND user_id = $2
        ) AS member
        "#
    )
    .bind(server_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("member"))
}
