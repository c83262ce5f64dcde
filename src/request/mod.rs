// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! The request/response correlation table (§4.1-4.2 of the design doc).

pub mod inflight;
pub mod record;
pub mod table;

pub use inflight::{InflightFetches, InflightGuard};
pub use record::RequestRecord;
pub use table::RequestTable;

/// How long a request id or an in-flight fetch mark may live before the
/// janitor is entitled to sweep it. Governs both discovery's poll budget and
/// TTL-based pruning of both containers.
pub const ARBITRARY_REQUEST_TIMEOUT_MS: u64 = 5_000;
