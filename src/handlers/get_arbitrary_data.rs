// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! `on_get_arbitrary_data` (§4.6.1): serve or forward a monolithic-blob
//! request.

use crate::blobstore::BlobStore;
use crate::clock::Clock;
use crate::handlers::{HandlerOutcome, IgnoredReason};
use crate::messages::{Envelope, Payload};
use crate::network::{Network, Peer};
use crate::repository::Repository;
use crate::request::{RequestRecord, RequestTable};
use crate::types::Signature;

#[allow(clippy::too_many_arguments)]
pub async fn handle<R: Repository, N: Network, B: BlobStore>(
    table: &RequestTable,
    repository: &R,
    network: &N,
    blobstore: &B,
    clock: &dyn Clock,
    peer: &dyn Peer,
    id: crate::types::MessageId,
    signature: &Signature,
) -> HandlerOutcome {
    let inserted = table.insert_if_absent(
        id,
        RequestRecord::Forwarding {
            signature: signature.clone(),
            origin: peer.id(),
            created_at: clock.now(),
        },
    );
    if !inserted {
        return HandlerOutcome::Ignored(IgnoredReason::DuplicateOrStale);
    }

    let transaction = match repository.transaction(signature).await {
        Ok(Some(transaction)) => transaction,
        Ok(None) => return HandlerOutcome::Ignored(IgnoredReason::UnknownTransaction),
        Err(err) => {
            tracing::error!(%err, %signature, "repository fault serving GetArbitraryData");
            return HandlerOutcome::Ignored(IgnoredReason::UnknownTransaction);
        },
    };
    let _ = transaction;

    if blobstore.exists(signature).await {
        if let Some(bytes) = blobstore.read_blob(signature).await {
            table.insert(id, RequestRecord::Resolved { created_at: clock.now() });
            let response = Envelope::new(
                id,
                Payload::ArbitraryData {
                    signature: signature.clone(),
                    bytes,
                },
            );
            if !peer.send_message(response).await {
                peer.disconnect("failed to send arbitrary data").await;
            }
        }
        return HandlerOutcome::Handled;
    }

    let requester = peer.id();
    let forward = Envelope::new(
        id,
        Payload::GetArbitraryData {
            signature: signature.clone(),
        },
    );
    network
        .broadcast(&move |candidate: &dyn Peer| {
            if candidate.id() == requester {
                None
            } else {
                Some(forward.clone())
            }
        })
        .await;
    HandlerOutcome::Handled
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::clock::FakeClock;
    use crate::error::{BlobStoreError, RepositoryError};
    use crate::repository::TransactionView;
    use crate::types::{ChunkHash, PeerId};

    struct FakeTransaction;
    impl TransactionView for FakeTransaction {
        fn is_data_local(&self) -> bool {
            true
        }
        fn manifest(&self) -> &[ChunkHash] {
            &[]
        }
    }

    struct FakeRepository {
        has_transaction: bool,
    }

    #[async_trait]
    impl Repository for FakeRepository {
        type Transaction = FakeTransaction;
        async fn transaction(&self, _s: &Signature) -> Result<Option<Self::Transaction>, RepositoryError> {
            Ok(self.has_transaction.then(|| FakeTransaction))
        }
        async fn arbitrary_signatures(&self) -> Result<Vec<Signature>, RepositoryError> {
            Ok(vec![])
        }
    }

    struct FakeBlobStore {
        local_bytes: Option<Vec<u8>>,
    }

    #[async_trait]
    impl BlobStore for FakeBlobStore {
        async fn exists(&self, _s: &Signature) -> bool {
            self.local_bytes.is_some()
        }
        async fn manifest(&self, _s: &Signature) -> Option<Vec<ChunkHash>> {
            None
        }
        async fn chunk_exists(&self, _h: &ChunkHash) -> bool {
            false
        }
        async fn read_chunk(&self, _h: &ChunkHash) -> Option<Vec<u8>> {
            None
        }
        async fn read_blob(&self, _s: &Signature) -> Option<Vec<u8>> {
            self.local_bytes.clone()
        }
        async fn write_chunk(&self, _h: &ChunkHash, _b: Vec<u8>) -> Result<(), BlobStoreError> {
            Ok(())
        }
    }

    struct RecordingPeer {
        id: u64,
        sent: std::sync::Mutex<Vec<Envelope>>,
        disconnects: AtomicUsize,
    }

    #[async_trait]
    impl Peer for RecordingPeer {
        fn id(&self) -> PeerId {
            PeerId(self.id)
        }
        async fn send_message(&self, msg: Envelope) -> bool {
            self.sent.lock().unwrap().push(msg);
            true
        }
        async fn get_response(&self, _msg: &Envelope) -> Option<Envelope> {
            None
        }
        async fn disconnect(&self, _reason: &str) {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct RecordingNetwork {
        broadcasts: std::sync::Mutex<Vec<(PeerId, Option<Envelope>)>>,
        peers: Vec<PeerId>,
    }

    #[async_trait]
    impl Network for RecordingNetwork {
        async fn handshaked_peers(&self) -> Vec<Arc<dyn Peer>> {
            vec![]
        }
        async fn broadcast(&self, filter: &(dyn Fn(&dyn Peer) -> Option<Envelope> + Send + Sync)) {
            struct Stub(PeerId);
            #[async_trait]
            impl Peer for Stub {
                fn id(&self) -> PeerId {
                    self.0
                }
                async fn send_message(&self, _msg: Envelope) -> bool {
                    true
                }
                async fn get_response(&self, _msg: &Envelope) -> Option<Envelope> {
                    None
                }
                async fn disconnect(&self, _reason: &str) {}
            }
            let mut log = self.broadcasts.lock().unwrap();
            for id in &self.peers {
                let stub = Stub(*id);
                log.push((*id, filter(&stub)));
            }
        }
    }

    #[tokio::test]
    async fn duplicate_id_is_ignored() {
        let table = RequestTable::new();
        table.insert_if_absent(
            1,
            RequestRecord::Forwarding {
                signature: Signature::new(vec![1]),
                origin: PeerId(9),
                created_at: 0,
            },
        );
        let repository = FakeRepository { has_transaction: true };
        let network = RecordingNetwork {
            broadcasts: std::sync::Mutex::new(vec![]),
            peers: vec![],
        };
        let blobstore = FakeBlobStore { local_bytes: None };
        let clock = FakeClock::at(0);
        let peer = RecordingPeer {
            id: 1,
            sent: std::sync::Mutex::new(vec![]),
            disconnects: AtomicUsize::new(0),
        };

        let outcome = handle(
            &table,
            &repository,
            &network,
            &blobstore,
            &clock,
            &peer,
            1,
            &Signature::new(vec![1]),
        )
        .await;
        assert_eq!(outcome, HandlerOutcome::Ignored(IgnoredReason::DuplicateOrStale));
        assert!(peer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn serves_locally_when_data_is_present() {
        let table = RequestTable::new();
        let repository = FakeRepository { has_transaction: true };
        let network = RecordingNetwork {
            broadcasts: std::sync::Mutex::new(vec![]),
            peers: vec![],
        };
        let blobstore = FakeBlobStore {
            local_bytes: Some(vec![1, 2, 3]),
        };
        let clock = FakeClock::at(0);
        let peer = RecordingPeer {
            id: 1,
            sent: std::sync::Mutex::new(vec![]),
            disconnects: AtomicUsize::new(0),
        };
        let signature = Signature::new(vec![1]);

        let outcome = handle(&table, &repository, &network, &blobstore, &clock, &peer, 7, &signature).await;
        assert_eq!(outcome, HandlerOutcome::Handled);
        let sent = peer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, 7);
        assert_eq!(
            table.get(7),
            Some(RequestRecord::Resolved { created_at: 0 })
        );
    }

    #[tokio::test]
    async fn forwards_to_other_peers_when_data_is_absent() {
        let table = RequestTable::new();
        let repository = FakeRepository { has_transaction: true };
        let network = RecordingNetwork {
            broadcasts: std::sync::Mutex::new(vec![]),
            peers: vec![PeerId(1), PeerId(2)],
        };
        let blobstore = FakeBlobStore { local_bytes: None };
        let clock = FakeClock::at(0);
        let peer = RecordingPeer {
            id: 1,
            sent: std::sync::Mutex::new(vec![]),
            disconnects: AtomicUsize::new(0),
        };
        let signature = Signature::new(vec![1]);

        let outcome = handle(&table, &repository, &network, &blobstore, &clock, &peer, 7, &signature).await;
        assert_eq!(outcome, HandlerOutcome::Handled);
        let log = network.broadcasts.lock().unwrap();
        assert_eq!(log.len(), 2);
        let requester_entry = log.iter().find(|(id, _)| *id == PeerId(1)).unwrap();
        assert!(requester_entry.1.is_none(), "requester must be excluded");
        let other_entry = log.iter().find(|(id, _)| *id == PeerId(2)).unwrap();
        assert!(other_entry.1.is_some());
    }

    #[tokio::test]
    async fn unknown_transaction_is_ignored() {
        let table = RequestTable::new();
        let repository = FakeRepository { has_transaction: false };
        let network = RecordingNetwork {
            broadcasts: std::sync::Mutex::new(vec![]),
            peers: vec![],
        };
        let blobstore = FakeBlobStore { local_bytes: None };
        let clock = FakeClock::at(0);
        let peer = RecordingPeer {
            id: 1,
            sent: std::sync::Mutex::new(vec![]),
            disconnects: AtomicUsize::new(0),
        };
        let outcome = handle(
            &table,
            &repository,
            &network,
            &blobstore,
            &clock,
            &peer,
            7,
            &Signature::new(vec![1]),
        )
        .await;
        assert_eq!(outcome, HandlerOutcome::Ignored(IgnoredReason::UnknownTransaction));
    }
}
