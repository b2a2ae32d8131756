//! Property-based tests

pub mod content_proptest;
pub mod ranking_proptest;
