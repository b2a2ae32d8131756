//! Friends Module
//!
//! Friend requests and friendships between users.

pub mod db;
pub mod service;

pub use service::*;
