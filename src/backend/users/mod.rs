//! Users Module
//!
//! Profile lookup and user search.

pub mod db;
pub mod search;

use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::messaging::UserProfile;

pub use search::search_users;

/// Get a user's public profile
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> BackendResult<UserProfile> {
    db::get_profile(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))
}
