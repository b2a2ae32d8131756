//! Test suite for the messaging core
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
