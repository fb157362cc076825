//! Key derivation for shortened URLs.
//!
//! The hasher is a pure function behind a trait so handlers stay agnostic
//! of the algorithm and tests can substitute a fixed implementation.

use md5::{Digest, Md5};

/// Derives a short storage key from arbitrary text.
///
/// Implementations must be deterministic, side-effect free, and total:
/// any input (including the empty string) produces a key. Collisions
/// between distinct inputs are accepted; the store resolves them as
/// last-write-wins.
#[cfg_attr(test, mockall::automock)]
pub trait Hasher: Send + Sync {
    fn hash(&self, text: &str) -> String;
}

/// Production hasher: lowercase hex MD5 digest of the input.
///
/// MD5 is used for key derivation only, not for any security property.
#[derive(Debug, Default, Clone, Copy)]
pub struct Md5Hasher;

impl Md5Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl Hasher for Md5Hasher {
    fn hash(&self, text: &str) -> String {
        hex::encode(Md5::digest(text.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        let h = Md5Hasher::new();
        assert_eq!(h.hash("test-text"), "cf0feea200efdea7d8580c7d4ef57ced");
    }

    #[test]
    fn deterministic() {
        let h = Md5Hasher::new();
        assert_eq!(h.hash("http://www.example.com"), h.hash("http://www.example.com"));
    }

    #[test]
    fn empty_input_produces_a_key() {
        let h = Md5Hasher::new();
        assert_eq!(h.hash(""), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
