//! Friend request and friendship rules
//!
//! Requests are addressed by username. Only the addressee can accept, and
//! either participant can block or delete.

use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::users::db as users_db;
use crate::shared::messaging::{
    FriendRequestCreate, Friendship, FriendshipListResponse, FriendshipStatus, UserProfile,
};

/// Postgres unique_violation
const UNIQUE_VIOLATION: &str = "23505";

async fn load_friendship(pool: &PgPool, friendship_id: Uuid) -> BackendResult<Friendship> {
    db::get_friendship(pool, friendship_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Friendship not found"))
}

/// Fill in requester and addressee profiles
async fn with_profiles(pool: &PgPool, mut friendships: Vec<Friendship>) -> BackendResult<Vec<Friendship>> {
    let mut ids: Vec<Uuid> = friendships
        .iter()
        .flat_map(|f| [f.requester_id, f.addressee_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let profiles = users_db::get_profiles(pool, &ids).await?;
    for friendship in &mut friendships {
        friendship.requester = profiles.get(&friendship.requester_id).cloned();
        friendship.addressee = profiles.get(&friendship.addressee_id).cloned();
    }
    Ok(friendships)
}

async fn with_profiles_one(pool: &PgPool, friendship: Friendship) -> BackendResult<Friendship> {
    let mut loaded = with_profiles(pool, vec![friendship]).await?;
    loaded
        .pop()
        .ok_or_else(|| BackendError::not_found("Friendship not found"))
}

/// Send a friend request to another user by username
pub async fn send_friend_request(
    pool: &PgPool,
    requester_id: Uuid,
    request: &FriendRequestCreate,
) -> BackendResult<Friendship> {
    let username = request.normalized_username()?;

    let addressee = users_db::get_profile_by_username(pool, &username)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("User '{}' not found", username)))?;

    if addressee.id == requester_id {
        return Err(BackendError::bad_request("Cannot send friend request to yourself"));
    }

    if let Some(existing) = db::get_friendship_between(pool, requester_id, addressee.id).await? {
        tracing::debug!(
            friendship_id = %existing.id,
            status = existing.status.as_str(),
            "friend request rejected, relationship exists"
        );
        return Err(BackendError::conflict(existing.status.conflict_message()));
    }

    let friendship = match db::create_friendship(pool, requester_id, addressee.id).await {
        Ok(friendship) => friendship,
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            tracing::warn!("Friend request already exists or duplicate: {:?}", e);
            return Err(BackendError::conflict(
                FriendshipStatus::Pending.conflict_message(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        friendship_id = %friendship.id,
        requester_id = %requester_id,
        addressee_id = %addressee.id,
        "friend request sent"
    );
    with_profiles_one(pool, friendship).await
}

/// Accept a pending request; only its addressee may do so
pub async fn accept_friend_request(
    pool: &PgPool,
    user_id: Uuid,
    friendship_id: Uuid,
) -> BackendResult<Friendship> {
    let friendship = load_friendship(pool, friendship_id).await?;

    if friendship.addressee_id != user_id {
        return Err(BackendError::forbidden(
            "Only the addressee can accept a friend request",
        ));
    }
    if friendship.status != FriendshipStatus::Pending {
        return Err(BackendError::bad_request(format!(
            "Cannot accept friendship with status: {}",
            friendship.status.as_str()
        )));
    }

    let updated = db::update_friendship_status(pool, friendship_id, FriendshipStatus::Accepted, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Friendship not found"))?;

    tracing::info!(friendship_id = %friendship_id, "friend request accepted");
    with_profiles_one(pool, updated).await
}

/// Block a request or friendship; either participant may do so
pub async fn block_friendship(
    pool: &PgPool,
    user_id: Uuid,
    friendship_id: Uuid,
) -> BackendResult<Friendship> {
    let friendship = load_friendship(pool, friendship_id).await?;

    if !friendship.involves(user_id) {
        return Err(BackendError::forbidden(
            "You can only block friendships you are involved in",
        ));
    }

    let updated = db::update_friendship_status(pool, friendship_id, FriendshipStatus::Blocked, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Friendship not found"))?;

    tracing::info!(friendship_id = %friendship_id, user_id = %user_id, "friendship blocked");
    with_profiles_one(pool, updated).await
}

/// A user's friendships, optionally only those in one status
pub async fn list_friendships(
    pool: &PgPool,
    user_id: Uuid,
    status: Option<FriendshipStatus>,
) -> BackendResult<FriendshipListResponse> {
    let friendships = db::list_friendships(pool, user_id, status).await?;
    let friendships = with_profiles(pool, friendships).await?;
    Ok(FriendshipListResponse::from(friendships))
}

/// Cancel a sent request or remove a friend
pub async fn delete_friendship(pool: &PgPool, user_id: Uuid, friendship_id: Uuid) -> BackendResult<()> {
    let friendship = load_friendship(pool, friendship_id).await?;

    if !friendship.involves(user_id) {
        return Err(BackendError::forbidden(
            "You can only delete friendships you are involved in",
        ));
    }

    if !db::delete_friendship(pool, friendship_id).await? {
        return Err(BackendError::not_found("Friendship not found"));
    }
    tracing::info!(friendship_id = %friendship_id, "friendship deleted");
    Ok(())
}

/// Accepted friends as profiles
pub async fn list_friends(pool: &PgPool, user_id: Uuid) -> BackendResult<Vec<UserProfile>> {
    Ok(db::list_friend_profiles(pool, user_id).await?)
}

/// Whether two users are friends
pub async fn are_friends(pool: &PgPool, user_a: Uuid, user_b: Uuid) -> BackendResult<bool> {
    Ok(db::are_friends(pool, user_a, user_b).await?)
}
