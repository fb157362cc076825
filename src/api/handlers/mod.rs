//! HTTP request handlers.
//!
//! Handlers are state-free: they compose the hasher and storage backend
//! from [`crate::state::AppState`] and never retry failed operations.

pub mod health;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
