//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Rich-text document builders
//! - Database test fixtures (feature `ssr`)
//! - Custom assertion macros

pub mod database;
pub mod documents;

pub use database::*;
pub use documents::*;
