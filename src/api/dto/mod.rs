//! Data Transfer Objects for the HTTP API.

pub mod health;
pub mod shorten;
