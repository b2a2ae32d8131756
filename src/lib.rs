//! AIGM - Messaging Backend Core
//!
//! Core of a chat backend whose messages are rich-text editor documents.
//! Every document a client sends is validated and sanitized before it is
//! stored, and user search results are re-ranked by relevance.
//!
//! # Module Structure
//!
//! - **`shared`** - Pure logic and data structures
//!   - Rich-text document validation and sanitization
//!   - Search query parsing and relevance ranking
//!   - Message, conversation, friendship and profile types
//!   - Configuration and error types
//!
//! - **`backend`** - Datastore services (only compiled with `ssr` feature)
//!   - Message, friendship, conversation and user search services over Postgres
//!   - HTTP-aware error type
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules (sqlx, axum, tokio)
//!
//! # Usage
//!
//! ```rust
//! use aigm::shared::content;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "type": "doc",
//!     "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "hello" }] }]
//! });
//! let clean = content::clean(&doc).unwrap();
//! assert_eq!(clean.to_value(), doc);
//! ```
//!
//! ## Server-Side
//!
//! ```rust,ignore
//! use aigm::backend::{database::load_database, messaging};
//! use aigm::shared::{messaging::MessageCreate, AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! let pool = load_database(&config).await.ok_or("no database")?;
//! let message = messaging::send_message(&pool, author_id, request).await?;
//! ```
//!
//! # Thread Safety
//!
//! The `shared` module holds no state. The backend only shares a
//! `sqlx::PgPool`, which is internally synchronized.

/// Shared types and pure logic
pub mod shared;

/// Backend datastore services
#[cfg(feature = "ssr")]
pub mod backend;
