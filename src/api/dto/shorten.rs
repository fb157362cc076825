//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a URL.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    pub url: String,
}

/// Response carrying the derived short key.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub hash: String,
}
