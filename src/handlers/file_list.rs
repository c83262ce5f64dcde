// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! `on_arbitrary_data_file_list` (§4.6.3): the response side of discovery,
//! and the trigger for per-chunk fetching.

use crate::blobstore::BlobStore;
use crate::clock::Clock;
use crate::fetcher::{self, FetchOutcome};
use crate::handlers::{HandlerOutcome, IgnoredReason};
use crate::messages::Envelope;
use crate::network::Peer;
use crate::repository::{Repository, TransactionView};
use crate::request::{InflightFetches, RequestRecord, RequestTable};
use crate::types::{ChunkHash, MessageId, Signature};

#[allow(clippy::too_many_arguments)]
pub async fn handle<R: Repository, B: BlobStore>(
    table: &RequestTable,
    inflight: &InflightFetches,
    repository: &R,
    blobstore: &B,
    clock: &dyn Clock,
    peer: &dyn Peer,
    id: MessageId,
    signature: &Signature,
    hashes: &[ChunkHash],
) -> HandlerOutcome {
    let record = match table.get(id) {
        Some(record) if !record.is_resolved() => record,
        _ => return HandlerOutcome::Ignored(IgnoredReason::DuplicateOrStale),
    };

    if record.signature() != Some(signature) {
        return HandlerOutcome::Ignored(IgnoredReason::SignatureMismatch);
    }

    if hashes.is_empty() {
        return HandlerOutcome::Ignored(IgnoredReason::EmptyHashList);
    }

    let manifest = match repository.transaction(signature).await {
        Ok(Some(transaction)) => transaction.manifest().to_vec(),
        Ok(None) => return HandlerOutcome::Ignored(IgnoredReason::UnknownTransaction),
        Err(err) => {
            tracing::error!(%err, %signature, "repository fault handling ArbitraryDataFileList");
            return HandlerOutcome::Ignored(IgnoredReason::UnknownTransaction);
        },
    };

    for hash in hashes {
        if !manifest.contains(hash) {
            tracing::warn!(%signature, %hash, "peer sent a hash outside the transaction manifest, dropping reply");
            return HandlerOutcome::Ignored(IgnoredReason::HashNotInManifest);
        }
    }

    let now = clock.now();
    table.insert(id, record.clone().into_received(now));

    for hash in hashes {
        if blobstore.chunk_exists(hash).await {
            continue;
        }
        if inflight.contains(hash) {
            continue;
        }

        let request_id: MessageId = rand::random();
        let outcome = fetcher::fetch(inflight, peer, hash, request_id, now).await;

        match outcome {
            FetchOutcome::Fetched(bytes) => {
                if let Err(err) = blobstore.write_chunk(hash, bytes).await {
                    tracing::error!(%err, %hash, "failed to persist fetched chunk");
                }
            },
            FetchOutcome::PeerDoesNotHaveIt | FetchOutcome::NoResponse => {
                tracing::debug!(%hash, peer = peer.id().0, ?outcome, "chunk fetch did not complete");
            },
            FetchOutcome::AlreadyInflight => {},
        }
    }

    // If this id was `Forwarding`, it is now `PendingForward`; the embedder
    // relays the reply to its origin via `forward_if_pending`.
    HandlerOutcome::Handled
}

/// Relay a received `FileList` reply to the peer that originally asked us,
/// if this record was `Forwarding` when the reply arrived. Separate from
/// [`handle`] because it needs the originating `Peer` handle, which the
/// embedder resolves by id after `handle` runs.
pub async fn forward_if_pending(
    table: &RequestTable,
    clock: &dyn Clock,
    id: MessageId,
    origin_peer: &dyn Peer,
    reply: Envelope,
) {
    let Some(record) = table.get(id) else {
        return;
    };
    if record.forward_origin().is_none() {
        return;
    }

    if !origin_peer.send_message(reply).await {
        origin_peer
            .disconnect("failed to forward arbitrary data file list")
            .await;
    }
    table.insert(id, record.into_forwarded(clock.now()));
}
