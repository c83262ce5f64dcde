// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Single-chunk fetch from one peer (§4.5).

use crate::messages::{Envelope, Payload};
use crate::network::Peer;
use crate::request::{InflightFetches, InflightGuard};
use crate::types::ChunkHash;

/// What fetching one chunk from one peer produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The chunk arrived; the caller is responsible for persisting it.
    Fetched(Vec<u8>),
    /// `peer` answered but does not have `hash` (§9.1's unified sentinel).
    PeerDoesNotHaveIt,
    /// `peer` never replied before the transport gave up.
    NoResponse,
    /// `hash` was already being fetched by another task; this call did
    /// nothing.
    AlreadyInflight,
}

/// Fetch `hash` from `peer`, holding the single-flight mark for the whole
/// round trip. The source design left the fetch outcome unobserved by its
/// caller; per §9.3 this reimplementation surfaces it so callers can log or
/// retry, which changes no observable peer-facing behavior.
pub async fn fetch(
    inflight: &InflightFetches,
    peer: &dyn Peer,
    hash: &ChunkHash,
    id: crate::types::MessageId,
    now: u64,
) -> FetchOutcome {
    let guard = match InflightGuard::acquire(inflight, hash.clone(), now) {
        Some(guard) => guard,
        None => return FetchOutcome::AlreadyInflight,
    };

    let request = Envelope::new(id, Payload::GetArbitraryDataFile { hash: hash.clone() });
    if !peer.send_message(request.clone()).await {
        drop(guard);
        peer.disconnect("send failed for GetArbitraryDataFile").await;
        return FetchOutcome::NoResponse;
    }

    let response = peer.get_response(&request).await;
    drop(guard);

    match response {
        None => FetchOutcome::NoResponse,
        Some(envelope) if envelope.payload.is_file_unknown() => {
            tracing::debug!(peer = peer.id().0, %hash, "peer does not have chunk");
            FetchOutcome::PeerDoesNotHaveIt
        },
        Some(Envelope {
            payload: Payload::ArbitraryDataFile { bytes },
            ..
        }) => FetchOutcome::Fetched(bytes),
        Some(_) => FetchOutcome::NoResponse,
    }
}
