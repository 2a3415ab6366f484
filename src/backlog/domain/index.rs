//! Digest-keyed index with stable iteration order.

use super::ContentDigest;
use std::collections::HashMap;

/// Maps content digests to values while remembering first-insertion order.
///
/// Inserting a digest that is already present replaces its value in place
/// (last seen wins) without moving it in the iteration order. Iteration is
/// therefore reproducible for a given input sequence.
#[derive(Debug, Clone)]
pub struct DigestIndex<V> {
    order: Vec<ContentDigest>,
    entries: HashMap<ContentDigest, V>,
}

impl<V> DigestIndex<V> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Builds an index from `items`, keying each with `digest_of`.
    pub fn from_items<I, F>(items: I, digest_of: F) -> Self
    where
        I: IntoIterator<Item = V>,
        F: Fn(&V) -> ContentDigest,
    {
        let mut index = Self::new();
        for item in items {
            let digest = digest_of(&item);
            index.insert(digest, item);
        }
        index
    }

    /// Inserts a value, returning the value it displaced, if any.
    pub fn insert(&mut self, digest: ContentDigest, value: V) -> Option<V> {
        let displaced = self.entries.insert(digest, value);
        if displaced.is_none() {
            self.order.push(digest);
        }
        displaced
    }

    /// Returns the value stored for `digest`.
    #[must_use]
    pub fn get(&self, digest: &ContentDigest) -> Option<&V> {
        self.entries.get(digest)
    }

    /// Returns whether `digest` is present.
    #[must_use]
    pub fn contains(&self, digest: &ContentDigest) -> bool {
        self.entries.contains_key(digest)
    }

    /// Returns the number of distinct digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContentDigest, &V)> {
        self.order
            .iter()
            .filter_map(|digest| self.entries.get(digest).map(|value| (digest, value)))
    }
}

impl<V> Default for DigestIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}
