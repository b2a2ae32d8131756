//! Database operations for DM conversations

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool, Row};
use uuid::Uuid;

use crate::backend::users::db::profile_from_row;
use crate::shared::messaging::UserProfile;

/// Bare conversation row, before participants and last message are loaded
#[derive(Debug, Clone, Copy)]
pub struct ConversationRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Get a conversation by ID
pub async fn get_conversation(pool: &PgPool, conversation_id: Uuid) -> Result<Option<ConversationRow>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, created_at, updated_at
        FROM dm_conversations
        WHERE id = $1
        "#
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| ConversationRow {
        id: r.get("id"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }))
}

/// Whether a user participates in a conversation
pub async fn is_participant(pool: &PgPool, conversation_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM dm_conversation_participants
            WHERE conversation_id = $1 AND user_id = $2
        ) AS participant
        "#
    )
    .bind(conversation_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("participant"))
}

/// The existing DM conversation between two users, if any
pub async fn find_direct_conversation(
    pool: &PgPool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT a.conversation_id
        FROM dm_conversation_participants a
        JOIN dm_conversation_participants b ON b.conversation_id = a.conversation_id
        WHERE a.user_id = $1 AND b.user_id = $2
        ORDER BY a.joined_at
        LIMIT 1
        "#
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.get("conversation_id")))
}

/// Create a DM conversation and both participant rows in one transaction
pub async fn create_direct_conversation(
    pool: &PgPool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO dm_conversations (id, created_at, updated_at)
        VALUES ($1, $2, $2)
        "#
    )
    .bind(id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for user_id in [user_a, user_b] {
        sqlx::query(
            r#"
            INSERT INTO dm_conversation_participants (id, conversation_id, user_id, joined_at)
            VALUES ($1, $2, $3, $4)
            "#
        )
        .bind(Uuid::new_v4())
        .bind(id)
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(id)
}

/// Profiles of everyone in a conversation
pub async fn list_participants(pool: &PgPool, conversation_id: Uuid) -> Result<Vec<UserProfile>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.username, p.display_name, p.avatar_url, p.custom_url,
               COALESCE(p.status, 'online') AS status, p.status_text,
               COALESCE(p.status_color, '#22c55e') AS status_color,
               p.created_at, p.updated_at
        FROM dm_conversation_participants cp
        JOIN user_profiles p ON p.id = cp.user_id
        WHERE cp.conversation_id = $1
        ORDER BY cp.joined_at
        "#
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(profile_from_row).collect())
}

/// IDs of every conversation a user participates in
pub async fn list_conversation_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT conversation_id
        FROM dm_conversation_participants
        WHERE user_id = $1
        "#
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| row.get("conversation_id")).collect())
}

/// Record activity on a conversation
pub async fn touch_conversation<'e>(
    executor: impl PgExecutor<'e>,
    conversation_id: Uuid,
    at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE dm_conversations SET updated_at = $1 WHERE id = $2")
        .bind(at)
        .bind(conversation_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Delete a conversation; participants and messages cascade
pub async fn delete_conversation(pool: &PgPool, conversation_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM dm_conversations WHERE id = $1")
        .bind(conversation_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
