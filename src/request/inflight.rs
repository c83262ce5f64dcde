// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Single-flight tracking of in-progress chunk fetches.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::types::ChunkHash;

/// Set-like map from a chunk's stable textual form to the timestamp its
/// fetch started. `try_acquire` is the only way to insert, and is atomic, so
/// two concurrent callers racing on the same hash can never both succeed.
#[derive(Default)]
pub struct InflightFetches {
    entries: DashMap<String, u64>,
}

impl InflightFetches {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Attempt to mark `hash` as in-flight. Returns `true` if this call
    /// acquired it, `false` if it was already in-flight.
    pub fn try_acquire(&self, hash: &ChunkHash, now: u64) -> bool {
        match self.entries.entry(hash.to_base58()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(now);
                true
            },
        }
    }

    /// Release a previously acquired hash. A no-op if it wasn't held.
    pub fn release(&self, hash: &ChunkHash) {
        self.entries.remove(&hash.to_base58());
    }

    /// True if `hash` is currently in-flight.
    #[must_use]
    pub fn contains(&self, hash: &ChunkHash) -> bool {
        self.entries.contains_key(&hash.to_base58())
    }

    /// Drop every entry started before `cutoff`. Returns the number removed.
    pub fn remove_older_than(&self, cutoff: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, started_at| *started_at >= cutoff);
        before - self.entries.len()
    }

    /// Current number of in-flight fetches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is in-flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Releases an [`InflightFetches`] entry when dropped, so `Fetcher::fetch`
/// releases its mark on every return path — including an early `?` or a
/// panic unwinding through the calling task.
pub struct InflightGuard<'a> {
    set: &'a InflightFetches,
    hash: ChunkHash,
}

impl<'a> InflightGuard<'a> {
    /// Acquire `hash` in `set`, returning a guard that releases it on drop.
    /// Returns `None` if the hash was already in-flight.
    #[must_use]
    pub fn acquire(set: &'a InflightFetches, hash: ChunkHash, now: u64) -> Option<Self> {
        if set.try_acquire(&hash, now) {
            Some(Self { set, hash })
        } else {
            None
        }
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        self.set.release(&self.hash);
    }
}
