// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Recency window used as ground truth and as a frequency prior.
//!
//! The oracle remembers the `capacity` most recently inserted distinct keys.
//! Membership means "seen within the current window", not "ever seen": both
//! estimators are scored against this sliding window, the way a live
//! heavy-hitter detector would be.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::data_structures::error::{SketchError, SketchResult};

/// Bounded, recency-ordered set of keys.
pub struct RecencyOracle {
    window: LruCache<String, ()>,
}

impl RecencyOracle {
    /// Create an oracle holding at most `capacity` keys.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidConfiguration`] when `capacity` is 0.
    pub fn new(capacity: usize) -> SketchResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| SketchError::not_positive("cache_size"))?;
        Ok(Self {
            window: LruCache::new(capacity),
        })
    }

    /// Mark `key` as the most recently seen key.
    ///
    /// A key already in the window only moves to the front. A new key that
    /// pushes the window past capacity evicts the stalest key, which is
    /// returned.
    pub fn put(&mut self, key: &str) -> Option<String> {
        if self.window.get(key).is_some() {
            return None;
        }
        self.window.push(key.to_owned(), ()).map(|(evicted, _)| evicted)
    }

    /// Whether `key` is currently inside the window. Does not refresh it.
    pub fn exists(&self, key: &str) -> bool {
        self.window.contains(key)
    }

    /// The key that would be evicted next.
    pub fn oldest(&self) -> Option<&str> {
        self.window.peek_lru().map(|(key, _)| key.as_str())
    }

    /// Number of keys in the window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Maximum number of keys the window holds.
    pub fn capacity(&self) -> usize {
        self.window.cap().get()
    }
}

impl std::fmt::Debug for RecencyOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecencyOracle")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
