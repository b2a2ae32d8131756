//! User search
//!
//! Fetches one page of profiles matching the query by username or display
//! name, alphabetically, then re-ranks that page by relevance. The requester
//! and anyone on either side of a block with them never appear.

use std::time::Instant;

use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use crate::backend::error::BackendResult;
use crate::backend::friends::db as friends_db;
use crate::shared::messaging::UserSearchResponse;
use crate::shared::search::{rank, SearchParams, SearchQuery};
use crate::shared::AppConfig;

/// Search users by username or display name
#[tracing::instrument(skip(pool, config, params), fields(q = %params.q))]
pub async fn search_users(
    pool: &PgPool,
    config: &AppConfig,
    requester_id: Uuid,
    params: &SearchParams,
) -> BackendResult<UserSearchResponse> {
    let started = Instant::now();

    let query = SearchQuery::parse(&params.q)?;
    let (limit, offset) = params.page(config.default_search_limit, config.max_search_limit);
    let pattern = query.like_pattern();

    let blocked = friends_db::blocked_user_ids(pool, requester_id).await?;
    let page = db::search_profiles(pool, requester_id, &pattern, &blocked, limit, offset).await?;
    let total = db::count_profiles(pool, requester_id, &pattern, &blocked).await?;

    let users = rank(page, query.as_str());

    let elapsed = started.elapsed();
    if elapsed >= config.search_slow_threshold {
        tracing::warn!(
            elapsed_ms = elapsed.as_millis() as u64,
            threshold_ms = config.search_slow_threshold.as_millis() as u64,
            "User search exceeded response time threshold"
        );
    } else {
        tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, results = users.len(), total, "user search");
    }

    Ok(UserSearchResponse {
        users,
        total,
        limit,
        offset,
    })
}
