// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! `on_get_arbitrary_data_file_list` (§4.6.2): a pure read-side responder,
//! never touches the request table.

use crate::blobstore::BlobStore;
use crate::messages::{Envelope, Payload};
use crate::network::Peer;
use crate::repository::Repository;
use crate::stats::Stats;
use crate::types::{MessageId, Signature};

pub async fn handle<R: Repository, B: BlobStore>(
    repository: &R,
    blobstore: &B,
    stats: &Stats,
    peer: &dyn Peer,
    id: MessageId,
    signature: &Signature,
) {
    stats.record_get_file_list_request();

    let known = match repository.transaction(signature).await {
        Ok(transaction) => transaction.is_some(),
        Err(err) => {
            tracing::error!(%err, %signature, "repository fault serving GetArbitraryDataFileList");
            false
        },
    };

    let mut hashes = Vec::new();
    if known {
        let manifest = blobstore.manifest(signature).await.unwrap_or_default();
        for hash in manifest {
            if blobstore.chunk_exists(&hash).await {
                hashes.push(hash);
            }
        }
    }

    let response = Envelope::new(
        id,
        Payload::ArbitraryDataFileList {
            signature: signature.clone(),
            hashes,
        },
    );
    if !peer.send_message(response).await {
        peer.disconnect("failed to send list of hashes").await;
    }
}
