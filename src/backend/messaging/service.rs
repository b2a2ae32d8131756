//! Message posting, editing and history
//!
//! Every document is validated, access-checked and sanitized before it is
//! written; only authors can edit or delete their messages.

use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use crate::backend::conversations::db as conversations_db;
use crate::backend::conversations::service::ensure_conversation_access;
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::content::sanitize;
use crate::shared::messaging::{
    Destination, Message, MessageCreate, MessageEdit, MessageListResponse, MessagePage,
};
use crate::shared::AppConfig;

/// The room must exist and `user_id` must be a member of its server
async fn ensure_room_access(pool: &PgPool, room_id: Uuid, user_id: Uuid) -> BackendResult<()> {
    let server_id = db::room_server_id(pool, room_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Room not found"))?;

    if !db::is_server_member(pool, server_id, user_id).await? {
        return Err(BackendError::forbidden("You are not a member of this server"));
    }
    Ok(())
}

async fn ensure_access(pool: &PgPool, destination: Destination, user_id: Uuid) -> BackendResult<()> {
    match destination {
        Destination::Direct(id) => ensure_conversation_access(pool, id, user_id).await.map(|_| ()),
        Destination::Room(id) => ensure_room_access(pool, id, user_id).await,
    }
}

/// Post a message to a DM conversation or room
pub async fn send_message(pool: &PgPool, author_id: Uuid, request: &MessageCreate) -> BackendResult<Message> {
    let (destination, doc) = request.validate()?;
    ensure_access(pool, destination, author_id).await?;

    let content = sanitize(&doc);

    // The message and the conversation's activity time commit together
    let mut tx = pool.begin().await?;
    let message = db::create_message(&mut *tx, author_id, destination, &content).await?;
    if let Destination::Direct(conversation_id) = destination {
        conversations_db::touch_conversation(&mut *tx, conversation_id, message.created_at).await?;
    }
    tx.commit().await?;

    tracing::info!(
        message_id = %message.id,
        author_id = %author_id,
        text_length = doc.text_length(),
        "message sent"
    );
    Ok(message)
}

async fn load_own_message(pool: &PgPool, user_id: Uuid, message_id: Uuid, action: &str) -> BackendResult<Message> {
    let message = db::get_message(pool, message_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Message not found"))?;

    if message.author_id != user_id {
        return Err(BackendError::forbidden(format!(
            "You can only {} your own messages",
            action
        )));
    }
    Ok(message)
}

/// Replace a message's content; the new document goes through the same
/// validation and sanitization as a new message
pub async fn edit_message(
    pool: &PgPool,
    user_id: Uuid,
    message_id: Uuid,
    request: &MessageEdit,
) -> BackendResult<Message> {
    let doc = request.validate()?;
    load_own_message(pool, user_id, message_id, "edit").await?;

    let content = sanitize(&doc);
    let message = db::update_message_content(pool, message_id, &content)
        .await?
        .ok_or_else(|| BackendError::not_found("Message not found"))?;

    tracing::info!(message_id = %message_id, "message edited");
    Ok(message)
}

/// Delete a message
pub async fn delete_message(pool: &PgPool, user_id: Uuid, message_id: Uuid) -> BackendResult<()> {
    load_own_message(pool, user_id, message_id, "delete").await?;

    if !db::delete_message(pool, message_id).await? {
        return Err(BackendError::not_found("Message not found"));
    }
    tracing::info!(message_id = %message_id, "message deleted");
    Ok(())
}

async fn list_messages(
    pool: &PgPool,
    config: &AppConfig,
    user_id: Uuid,
    destination: Destination,
    page: MessagePage,
) -> BackendResult<MessageListResponse> {
    let (limit, offset) = page.resolve(config.default_message_limit, config.max_message_limit)?;
    ensure_access(pool, destination, user_id).await?;

    let messages = db::list_messages(pool, destination, limit, offset).await?;
    Ok(MessageListResponse::from_page(messages, limit, destination.id()))
}

/// A page of a DM conversation's history, newest first
pub async fn list_dm_messages(
    pool: &PgPool,
    config: &AppConfig,
    user_id: Uuid,
    conversation_id: Uuid,
    page: MessagePage,
) -> BackendResult<MessageListResponse> {
    list_messages(pool, config, user_id, Destination::Direct(conversation_id), page).await
}

/// A page of a room's history, newest first
pub async fn list_room_messages(
    pool: &PgPool,
    config: &AppConfig,
    user_id: Uuid,
    room_id: Uuid,
    page: MessagePage,
) -> BackendResult<MessageListResponse> {
    list_messages(pool, config, user_id, Destination::Room(room_id), page).await
}
