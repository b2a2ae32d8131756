//! Database operations for user profiles

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::messaging::{UserProfile, UserSearchResult};

pub(crate) fn profile_from_row(row: &PgRow) -> UserProfile {
    UserProfile {
        id: row.get("id"),
        username: row.get("username"),
        display_name: row.get("display_name"),
        avatar_url: row.get("avatar_url"),
        custom_url: row.get("custom_url"),
        status: row.get("status"),
        status_text: row.get("status_text"),
        status_color: row.get("status_color"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Get a profile by exact (lower-cased) username
pub async fn get_profile_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserProfile>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, username, display_name, avatar_url, custom_url,
               COALESCE(status, 'online') AS status, status_text,
               COALESCE(status_color, '#22c55e') AS status_color,
               created_at, updated_at
        FROM user_profiles
        WHERE username = $1
        "#
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(profile_from_row))
}

/// Get a profile by ID
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, username, display_name, avatar_url, custom_url,
               COALESCE(status, 'online') AS status, status_text,
               COALESCE(status_color, '#22c55e') AS status_color,
               created_at, updated_at
        FROM user_profiles
        WHERE id = $1
        "#
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(profile_from_row))
}

/// Load several profiles at once, keyed by ID
pub async fn get_profiles(
    pool: &PgPool,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, UserProfile>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query(
        r#"
        SELECT id, username, display_name, avatar_url, custom_url,
               COALESCE(status, 'online') AS status, status_text,
               COALESCE(status_color, '#22c55e') AS status_color,
               created_at, updated_at
        FROM user_profiles
        WHERE id = ANY($1)
        "#
    )
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(profile_from_row)
        .map(|profile| (profile.id, profile))
        .collect())
}

/// One page of profiles whose username or display name matches `pattern`,
/// ordered by username
pub async fn search_profiles(
    pool: &PgPool,
    requester_id: Uuid,
    pattern: &str,
    excluded: &[Uuid],
    limit: u32,
    offset: u32,
) -> Result<Vec<UserSearchResult>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, username, display_name, avatar_url,
               COALESCE(status, 'offline') AS status
        FROM user_profiles
        WHERE id <> $1
          AND (username ILIKE $2 OR display_name ILIKE $2)
          AND NOT (id = ANY($3))
        ORDER BY username
        LIMIT $4 OFFSET $5
        "#
    )
    .bind(requester_id)
    .bind(pattern)
    .bind(excluded)
    .bind(i64::from(limit))
    .bind(i64::from(offset))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| UserSearchResult {
            id: row.get("id"),
            username: row.get("username"),
            display_name: row.get("display_name"),
            avatar_url: row.get("avatar_url"),
            status: row.get("status"),
        })
        .collect())
}

/// Total number of profiles matching `pattern` across all pages
pub async fn count_profiles(
    pool: &PgPool,
    requester_id: Uuid,
    pattern: &str,
    excluded: &[Uuid],
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS total
        FROM user_profiles
        WHERE id <> $1
          AND (username ILIKE $2 OR display_name ILIKE $2)
          AND NOT (id = ANY($3))
        "#
    )
    .bind(requester_id)
    .bind(pattern)
    .bind(excluded)
    .fetch_one(pool)
    .await?;

    Ok(row.get("total"))
}
