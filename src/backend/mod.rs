//! Backend Module
//!
//! Datastore services for the messaging core. Every operation is an async
//! function over a `sqlx::PgPool` plus the acting user's ID; the caller is
//! responsible for authenticating that user.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── database.rs     - Connection pool setup
//! ├── messaging/      - Send, edit, delete and list messages
//! ├── friends/        - Friend requests and friendships
//! ├── conversations/  - DM conversations
//! ├── users/          - Profiles and user search
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Services return [`error::BackendResult`]. `BackendError` implements axum's
//! `IntoResponse`, so a handler can propagate it with `?`.

/// Connection pool setup
pub mod database;

/// Backend error types
pub mod error;

/// Rich-text messages
pub mod messaging;

/// Friend requests and friendships
pub mod friends;

/// DM conversations
pub mod conversations;

/// Profiles and search
pub mod users;

pub use database::load_database;
pub use error::{BackendError, BackendResult};
