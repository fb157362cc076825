//! HTTP API layer.
//!
//! Translates HTTP requests into storage operations and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - request/response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - request tracing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
