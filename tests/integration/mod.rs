//! Integration tests

pub mod cli_test;
pub mod content_test;
pub mod search_test;
#[cfg(feature = "ssr")]
pub mod services_test;
