//! School Admin API library.
//!
//! This crate provides the admin authentication API as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Security
//!
//! This crate issues bearer sessions for school administrators and serves
//! stored password hashes to clients. Password verification happens on the
//! client. See [`services::auth`] for the preview-only login bypass.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::router;
pub use state::AppState;
