// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Process-wide counters surfaced to the host node (§4.8).

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for `GetArbitraryDataFile` and `GetArbitraryDataFileList`
/// traffic. Cheap to share: every field is an independent `AtomicU64`, so
/// readers never block writers.
#[derive(Default)]
pub struct Stats {
    get_file_requests: AtomicU64,
    get_file_unknown: AtomicU64,
    get_file_list_requests: AtomicU64,
}

/// A point-in-time snapshot of [`Stats`], suitable for logging or export to
/// an external metrics backend (none is wired up by default).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StatsSnapshot {
    pub get_arbitrary_data_file_requests: u64,
    pub get_arbitrary_data_file_unknown_files: u64,
    pub get_arbitrary_data_file_list_requests: u64,
}

impl Stats {
    /// All counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_get_file_request(&self) {
        self.get_file_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_get_file_unknown(&self) {
        self.get_file_unknown.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_get_file_list_request(&self) {
        self.get_file_list_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// A consistent-enough snapshot for logging or metrics export. Each
    /// field is read independently, so under concurrent writers the
    /// snapshot is not atomic as a whole — acceptable for counters that only
    /// ever increase.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            get_arbitrary_data_file_requests: self.get_file_requests.load(Ordering::Relaxed),
            get_arbitrary_data_file_unknown_files: self.get_file_unknown.load(Ordering::Relaxed),
            get_arbitrary_data_file_list_requests: self
                .get_file_list_requests
                .load(Ordering::Relaxed),
        }
    }
}
