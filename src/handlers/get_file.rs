// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! `on_get_arbitrary_data_file` (§4.6.4): serve a single chunk, or reply
//! with the unknown-file sentinel.

use crate::blobstore::BlobStore;
use crate::messages::{Envelope, Payload};
use crate::network::Peer;
use crate::stats::Stats;
use crate::types::{ChunkHash, MessageId};

pub async fn handle<B: BlobStore>(blobstore: &B, stats: &Stats, peer: &dyn Peer, id: MessageId, hash: &ChunkHash) {
    stats.record_get_file_request();

    match blobstore.read_chunk(hash).await {
        Some(bytes) => {
            let response = Envelope::new(id, Payload::ArbitraryDataFile { bytes });
            if !peer.send_message(response).await {
                peer.disconnect("failed to send file").await;
            }
        },
        None => {
            stats.record_get_file_unknown();
            let response = Envelope::new(id, Payload::FileUnknown);
            if !peer.send_message(response).await {
                peer.disconnect("failed to send file").await;
            }
        },
    }
}
