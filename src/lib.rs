//! # Shorty
//!
//! A small URL-shortening service with a durable embedded key-value store,
//! built with Axum.
//!
//! ## Architecture
//!
//! - **Hasher** ([`hasher`]) - pure key derivation (MD5 hex digest)
//! - **Storage** ([`storage`]) - durable key-value backend behind a trait;
//!   the production implementation is an append-only log with an in-memory
//!   index, fsynced on every write
//! - **API** ([`api`]) - HTTP handlers, DTOs, and middleware
//! - **Server** ([`server`]) - listener ownership, connection timeouts, and
//!   signal-driven graceful shutdown
//!
//! ## Quick Start
//!
//! ```bash
//! export STORAGE_PATH="./data"
//! export LISTEN="0.0.0.0:8080"
//!
//! cargo run
//! ```
//!
//! Then:
//!
//! ```bash
//! curl -X POST localhost:8080/shorten -d '{"url":"http://www.example.com"}' \
//!   -H 'content-type: application/json'
//! curl -i localhost:8080/<hash>
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`]. See the
//! [`config`] module for available options.

pub mod api;
pub mod config;
pub mod error;
pub mod hasher;
pub mod routes;
pub mod server;
pub mod state;
pub mod storage;

pub use error::AppError;
pub use state::AppState;
