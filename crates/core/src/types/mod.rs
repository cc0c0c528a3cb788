//! Core types for Shopkeeper.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod user_id;

pub use id::*;
pub use user_id::{UserId, UserIdError};
