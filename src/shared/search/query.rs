//! Search query and pagination parameters.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Longest accepted query, in characters after trimming
pub const MAX_QUERY_CHARS: usize = 100;

/// A trimmed, lower-cased, length-checked search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: &str) -> Result<Self, SharedError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();

        if length < 1 {
            return Err(SharedError::validation(
                "q",
                "Search query must be at least 1 character",
            ));
        }
        if length > MAX_QUERY_CHARS {
            return Err(SharedError::validation(
                "q",
                "Search query cannot exceed 100 characters",
            ));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ILIKE` pattern matching the query anywhere, with wildcards escaped
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

/// Raw user search parameters, as a client sends them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl SearchParams {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit: None,
            offset: None,
        }
    }

    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Resolve the page window: missing limit falls back to `default_limit`,
    /// and the result is clamped into `1..=max_limit`
    pub fn page(&self, default_limit: u32, max_limit: u32) -> (u32, u32) {
        let limit = self.limit.unwrap_or(default_limit).clamp(1, max_limit.max(1));
        (limit, self.offset.unwrap_or(0))
    }
}
