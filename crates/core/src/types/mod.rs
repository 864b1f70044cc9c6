//! Core types for the school admin API.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod status;
pub mod token;

pub use id::*;
pub use status::*;
pub use token::{SessionToken, SessionTokenError};
