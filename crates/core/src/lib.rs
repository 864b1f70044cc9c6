//! School Admin Core - Shared types library.
//!
//! This crate provides common types used across the school admin components:
//! - `admin` - The admin authentication API (login, sessions, hash lookup)
//! - `cli` - Command-line tools for migrations and seeding admin users
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, roles, and session tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
