// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Monotonic-ish time, abstracted behind a trait so tests can control it.
//!
//! Unlike `Repository`/`Network`/`BlobStore`, `Clock` is trivial enough that
//! this crate owns a concrete implementation rather than pushing it onto the
//! embedder.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of milliseconds since some fixed but unspecified epoch, monotonic
/// for the lifetime of the process.
pub trait Clock: Send + Sync {
    /// The current time, in milliseconds.
    fn now(&self) -> u64;
}

/// The real clock, backed by the system wall-clock time.
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock is before the Unix epoch")
            .as_millis() as u64
    }
}

/// A deterministic clock for tests: starts at zero and only advances when
/// told to.
#[derive(Default)]
pub struct FakeClock {
    millis: AtomicU64,
}

impl FakeClock {
    /// A fake clock starting at `start` milliseconds.
    #[must_use]
    pub fn at(start: u64) -> Self {
        Self {
            millis: AtomicU64::new(start),
        }
    }

    /// Advance the clock by `delta` milliseconds.
    pub fn advance(&self, delta: u64) {
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }

    /// Set the clock to an absolute value.
    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}
