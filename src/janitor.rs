// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Periodic TTL sweep of the request table and the in-flight fetch set
//! (§4.7).

use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::request::{InflightFetches, RequestTable, ARBITRARY_REQUEST_TIMEOUT_MS};

/// How often the janitor sweeps.
const SWEEP_INTERVAL: Duration = Duration::from_millis(1_000);

/// Counts of entries removed by one sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SweepCounts {
    pub requests_removed: usize,
    pub inflight_removed: usize,
}

/// Remove every request-table and in-flight entry older than
/// [`ARBITRARY_REQUEST_TIMEOUT_MS`].
#[must_use]
pub fn sweep(table: &RequestTable, inflight: &InflightFetches, now: u64) -> SweepCounts {
    let cutoff = now.saturating_sub(ARBITRARY_REQUEST_TIMEOUT_MS);
    SweepCounts {
        requests_removed: table.remove_older_than(cutoff),
        inflight_removed: inflight.remove_older_than(cutoff),
    }
}

/// Run [`sweep`] on [`SWEEP_INTERVAL`], until `shutdown` fires.
pub async fn run(
    table: Arc<RequestTable>,
    inflight: Arc<InflightFetches>,
    clock: Arc<dyn Clock>,
    shutdown: Arc<tokio::sync::Notify>,
) {
    loop {
        tokio::select! {
            () = shutdown.notified() => {
                tracing::info!("janitor received shutdown");
                return;
            },
            () = tokio::time::sleep(SWEEP_INTERVAL) => {},
        }

        let counts = sweep(&table, &inflight, clock.now());
        if counts.requests_removed > 0 || counts.inflight_removed > 0 {
            tracing::debug!(?counts, "janitor swept stale entries");
        }
    }
}
