//! Messaging Module
//!
//! Data structures for the messaging system:
//!
//! - `Message` - A rich-text message in a DM conversation or room
//! - `Conversation` - A DM conversation between two users
//! - `Friendship` - A friend request or established friendship
//! - `UserProfile` - Public user profile and search results
//!
//! # Usage
//!
//! ```rust
//! use aigm::shared::messaging::{Conversation, Friendship, Message, UserProfile};
//! ```

pub mod conversation;
pub mod friendship;
pub mod message;
pub mod user;

pub use conversation::{sort_by_activity, Conversation, ConversationCreate, ConversationListResponse};
pub use friendship::{FriendRequestCreate, Friendship, FriendshipListResponse, FriendshipStatus};
pub use message::{
    Destination, Message, MessageCreate, MessageEdit, MessageListResponse, MessagePage,
};
pub use user::{UserProfile, UserSearchResponse, UserSearchResult};
