// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Peer-to-peer content discovery and chunk-fetch controller for
//! arbitrary-data transactions.
//!
//! An embedding node constructs one [`manager::ArbitraryDataManager`],
//! starts its background tasks, and routes inbound wire messages to its
//! `on_*` methods. Everything the ADM needs from the host — chain storage,
//! the transport, on-disk blob storage, peer reputation — is expressed as a
//! trait in [`repository`], [`network`], [`blobstore`], and [`controller`],
//! so the whole crate can be exercised against in-memory fakes.

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    missing_docs,
    unused_import_braces,
    unused_qualifications
)]
#![allow(
    clippy::cargo_common_metadata,
    clippy::clone_on_ref_ptr,
    clippy::expect_used,
    clippy::implicit_return,
    clippy::integer_arithmetic,
    clippy::missing_inline_in_public_items,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::multiple_inherent_impl,
    clippy::similar_names,
    clippy::too_many_lines
)]

#[cfg(test)]
extern crate assert_matches;

pub mod blobstore;
pub mod clock;
pub mod config;
pub mod controller;
pub mod discovery;
pub mod error;
pub mod fetcher;
pub mod handlers;
pub mod janitor;
pub mod manager;
pub mod messages;
pub mod network;
pub mod repository;
pub mod request;
pub mod scavenger;
pub mod stats;
pub mod types;

pub use blobstore::BlobStore;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::Settings;
pub use controller::Controller;
pub use error::{BlobStoreError, ManagerError, RepositoryError};
pub use manager::ArbitraryDataManager;
pub use messages::{Envelope, Payload};
pub use network::{Network, Peer};
pub use repository::{Repository, TransactionView};
pub use stats::{Stats, StatsSnapshot};
pub use types::{ChunkHash, MessageId, PeerId, Signature};
