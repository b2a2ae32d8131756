//! Backend Error Module
//!
//! Error types returned by the datastore services and their conversion to
//! HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `BadRequest`, `NotFound`, `Forbidden`, `Conflict` - Service rule violations
//! - `Database` - sqlx failures
//! - `SharedError` - Request and content validation from the shared module
//! - `SerializationError` - JSON serialization errors

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::error_body;
pub use types::BackendError;

/// Result alias used by every service function
pub type BackendResult<T> = Result<T, BackendError>;
