//! User Search
//!
//! Query parsing and the in-memory relevance ranker applied to each page of
//! search results.

pub mod query;
pub mod ranking;

pub use query::{SearchParams, SearchQuery, MAX_QUERY_CHARS};
pub use ranking::{rank, score, Candidate, MatchKind, ScoreWeights, DEFAULT_WEIGHTS};
