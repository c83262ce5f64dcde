// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! The correlation map from in-flight message id to [`RequestRecord`].

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::request::record::RequestRecord;
use crate::types::MessageId;

/// Thread-safe correlation table. Mutations are always whole-record
/// overwrites — handlers never mutate a field in place, which would risk a
/// reader observing a torn record.
#[derive(Default)]
pub struct RequestTable {
    entries: DashMap<MessageId, RequestRecord>,
}

impl RequestTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert `record` at `id` only if `id` is not already present. Returns
    /// `true` on insert, `false` if `id` was already live.
    pub fn insert_if_absent(&self, id: MessageId, record: RequestRecord) -> bool {
        match self.entries.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            },
        }
    }

    /// Unconditionally overwrite the record at `id`, used for state
    /// transitions.
    pub fn insert(&self, id: MessageId, record: RequestRecord) {
        self.entries.insert(id, record);
    }

    /// Look up `id`. Returns an owned clone so callers never hold a lock
    /// across an `.await`.
    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<RequestRecord> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    /// Drop every entry whose `created_at` predates `cutoff`. Returns the
    /// number removed.
    pub fn remove_older_than(&self, cutoff: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, record| record.created_at() >= cutoff);
        before - self.entries.len()
    }

    /// Current number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The id of the table's single entry, if it holds exactly one. Test-only
    /// helper for scenarios that need to observe an id `find` generated
    /// internally.
    #[cfg(test)]
    #[must_use]
    pub fn only_id(&self) -> Option<MessageId> {
        if self.entries.len() == 1 {
            self.entries.iter().next().map(|entry| *entry.key())
        } else {
            None
        }
    }
}
