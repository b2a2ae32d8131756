//! DM conversation rules
//!
//! Conversations can only be opened between friends, and there is at most
//! one per pair: opening it again returns the existing one.

use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::friends::db as friends_db;
use crate::backend::messaging::db as messages_db;
use crate::backend::users::db as users_db;
use crate::shared::messaging::{Conversation, ConversationCreate, ConversationListResponse};

/// The conversation must exist and `user_id` must participate in it
pub(crate) async fn ensure_conversation_access(
    pool: &PgPool,
    conversation_id: Uuid,
    user_id: Uuid,
) -> BackendResult<db::ConversationRow> {
    let row = db::get_conversation(pool, conversation_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Conversation not found"))?;

    if !db::is_participant(pool, conversation_id, user_id).await? {
        return Err(BackendError::forbidden(
            "You are not a participant in this conversation",
        ));
    }
    Ok(row)
}

/// Open a conversation with a friend, reusing the existing one if any
pub async fn create_or_find_conversation(
    pool: &PgPool,
    user_id: Uuid,
    request: &ConversationCreate,
) -> BackendResult<Conversation> {
    let username = request.normalized_username()?;

    let participant = users_db::get_profile_by_username(pool, &username)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("User '{}' not found", username)))?;

    if !friends_db::are_friends(pool, user_id, participant.id).await? {
        return Err(BackendError::forbidden(
            "You can only start conversations with friends",
        ));
    }

    let conversation_id = match db::find_direct_conversation(pool, user_id, participant.id).await? {
        Some(id) => {
            tracing::debug!(conversation_id = %id, "reusing existing conversation");
            id
        }
        None => {
            let id = db::create_direct_conversation(pool, user_id, participant.id).await?;
            tracing::info!(conversation_id = %id, user_id = %user_id, "conversation created");
            id
        }
    };

    get_conversation(pool, user_id, conversation_id).await
}

/// A conversation with its participants and last message
pub async fn get_conversation(
    pool: &PgPool,
    user_id: Uuid,
    conversation_id: Uuid,
) -> BackendResult<Conversation> {
    let row = ensure_conversation_access(pool, conversation_id, user_id).await?;
    let participants = db::list_participants(pool, conversation_id).await?;
    let last_message = messages_db::latest_message(pool, conversation_id).await?;

    Ok(Conversation {
        id: row.id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        participants,
        last_message_at: last_message.as_ref().map(|m| m.created_at),
        last_message,
        unread_count: 0,
    })
}

/// Every conversation of a user, most recently active first
///
/// A conversation that fails to load is skipped with a warning rather than
/// failing the whole list.
pub async fn list_conversations(pool: &PgPool, user_id: Uuid) -> BackendResult<ConversationListResponse> {
    let ids = db::list_conversation_ids(pool, user_id).await?;

    let mut conversations = Vec::with_capacity(ids.len());
    for conversation_id in ids {
        match get_conversation(pool, user_id, conversation_id).await {
            Ok(conversation) => conversations.push(conversation),
            Err(e) => {
                tracing::warn!(conversation_id = %conversation_id, error = %e, "Could not load conversation");
            }
        }
    }

    Ok(ConversationListResponse::from(conversations))
}

/// Delete a conversation the user participates in
pub async fn delete_conversation(pool: &PgPool, user_id: Uuid, conversation_id: Uuid) -> BackendResult<()> {
    ensure_conversation_access(pool, conversation_id, user_id).await?;

    if !db::delete_conversation(pool, conversation_id).await? {
        return Err(BackendError::not_found("Conversation not found"));
    }
    tracing::info!(conversation_id = %conversation_id, user_id = %user_id, "conversation deleted");
    Ok(())
}
