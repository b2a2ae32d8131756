//! Database operations for friendships

use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::backend::users::db::profile_from_row;
use crate::shared::messaging::{Friendship, FriendshipStatus, UserProfile};

/// An unrecognized status is a decode error, never a default
fn decode_status(raw: &str) -> Result<FriendshipStatus, sqlx::Error> {
    FriendshipStatus::from_str(raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unknown friendship status {:?}", raw).into(),
    })
}

fn friendship_from_row(row: &PgRow) -> Result<Friendship, sqlx::Error> {
    let status = decode_status(row.try_get::<String, _>("status")?.as_str())?;
    Ok(Friendship {
        id: row.get("id"),
        requester_id: row.get("requester_id"),
        addressee_id: row.get("addressee_id"),
        status,
        action_user_id: row.get("action_user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        requester: None,
        addressee: None,
    })
}

/// Create a pending friendship
pub async fn create_friendship(
    pool: &PgPool,
    requester_id: Uuid,
    addressee_id: Uuid,
) -> Result<Friendship, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO friendships (id, requester_id, addressee_id, status, action_user_id, created_at, updated_at)
        VALUES ($1, $2, $3, 'pending', $2, $4, $4)
        "#
    )
    .bind(id)
    .bind(requester_id)
    .bind(addressee_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Friendship {
        id,
        requester_id,
        addressee_id,
        status: FriendshipStatus::Pending,
        action_user_id: requester_id,
        created_at: now,
        updated_at: now,
        requester: None,
        addressee: None,
    })
}

/// Get a friendship by ID
pub async fn get_friendship(pool: &PgPool, friendship_id: Uuid) -> Result<Option<Friendship>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, requester_id, addressee_id, status, action_user_id, created_at, updated_at
        FROM friendships
        WHERE id = $1
        "#
    )
    .bind(friendship_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(friendship_from_row).transpose()
}

/// Get the friendship between two users, in either direction
pub async fn get_friendship_between(
    pool: &PgPool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Option<Friendship>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, requester_id, addressee_id, status, action_user_id, created_at, updated_at
        FROM friendships
        WHERE (requester_id = $1 AND addressee_id = $2)
           OR (requester_id = $2 AND addressee_id = $1)
        ORDER BY created_at
        LIMIT 1
        "#
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(friendship_from_row).transpose()
}

/// Set the status of a friendship, recording who changed it
pub async fn update_friendship_status(
    pool: &PgPool,
    friendship_id: Uuid,
    status: FriendshipStatus,
    action_user_id: Uuid,
) -> Result<Option<Friendship>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE friendships
        SET status = $1, action_user_id = $2, updated_at = $3
        WHERE id = $4
        RETURNING id, requester_id, addressee_id, status, action_user_id, created_at, updated_at
        "#
    )
    .bind(status.as_str())
    .bind(action_user_id)
    .bind(Utc::now())
    .bind(friendship_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(friendship_from_row).transpose()
}

/// List a user's friendships, optionally filtered by status
pub async fn list_friendships(
    pool: &PgPool,
    user_id: Uuid,
    status: Option<FriendshipStatus>,
) -> Result<Vec<Friendship>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, requester_id, addressee_id, status, action_user_id, created_at, updated_at
        FROM friendships
        WHERE (requester_id = $1 OR addressee_id = $1)
          AND ($2::text IS NULL OR status = $2)
        ORDER BY updated_at DESC
        "#
    )
    .bind(user_id)
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await?;

    rows.iter().map(friendship_from_row).collect()
}

/// Delete a friendship
pub async fn delete_friendship(pool: &PgPool, friendship_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM friendships WHERE id = $1")
        .bind(friendship_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Profiles of everyone the user has an accepted friendship with
pub async fn list_friend_profiles(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserProfile>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.username, p.display_name, p.avatar_url, p.custom_url,
               COALESCE(p.status, 'online') AS status, p.status_text,
               COALESCE(p.status_color, '#22c55e') AS status_color,
               p.created_at, p.updated_at
        FROM friendships f
        JOIN user_profiles p
          ON p.id = CASE WHEN f.requester_id = $1 THEN f.addressee_id ELSE f.requester_id END
        WHERE (f.requester_id = $1 OR f.addressee_id = $1)
          AND f.status = 'accepted'
        ORDER BY p.username
        "#
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(profile_from_row).collect())
}

/// Whether two users have an accepted friendship
pub async fn are_friends(pool: &PgPool, user_a: Uuid, user_b: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM friendships
            WHERE ((requester_id = $1 AND addressee_id = $2)
                OR (requester_id = $2 AND addressee_id = $1))
              AND status = 'accepted'
        ) AS friends
        "#
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_one(pool)
    .await?;

    Ok(row.get("friends"))
}

/// Users on the other side of a blocked friendship, whichever side blocked
pub async fn blocked_user_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT CASE WHEN requester_id = $1 THEN addressee_id ELSE requester_id END AS other_id
        FROM friendships
        WHERE (requester_id = $1 OR addressee_id = $1)
          AND status = 'blocked'
        "#
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| row.get("other_id")).collect())
}
