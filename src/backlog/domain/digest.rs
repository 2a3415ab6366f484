//! Content-addressed task identity.
//!
//! A task and a comment are the same task exactly when the SHA-256 digest of
//! their title followed by their body matches. Location data never takes
//! part, so moving a comment to another file or line keeps its identity.
//!
//! The digest covers the plain concatenation, so `("ab", "c")` and
//! `("a", "bc")` collide. Tracked tasks already rely on this keying, which
//! is why it is kept as is.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 digest of a task's title and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Computes the digest of `title` followed by `body`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdg_sync::backlog::domain::ContentDigest;
    ///
    /// let moved = ContentDigest::of("fix race", "in worker");
    /// assert_eq!(moved, ContentDigest::of("fix race", "in worker"));
    /// assert_ne!(moved, ContentDigest::of("fix race", "in scheduler"));
    /// ```
    #[must_use]
    pub fn of(title: &str, body: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(title.as_bytes());
        hasher.update(body.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Returns the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the lower-case hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the first eight hex characters, used in log fields.
    #[must_use]
    pub fn short(&self) -> String {
        self.to_hex().chars().take(8).collect()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
