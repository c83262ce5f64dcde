// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Shared in-memory collaborators for the scenario tests in
//! `tests/scenarios.rs`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use arbitrary_data_manager::{
    BlobStoreError,
    ChunkHash,
    Envelope,
    Payload,
    Peer,
    PeerId,
    Repository,
    RepositoryError,
    Signature,
    TransactionView,
};

pub struct FakeTransaction {
    pub manifest: Vec<ChunkHash>,
}

impl TransactionView for FakeTransaction {
    fn is_data_local(&self) -> bool {
        false
    }

    fn manifest(&self) -> &[ChunkHash] {
        &self.manifest
    }
}

/// A chain backed by a fixed table of transaction manifests.
#[derive(Default)]
pub struct FakeRepository {
    pub manifests: HashMap<Signature, Vec<ChunkHash>>,
}

#[async_trait]
impl Repository for FakeRepository {
    type Transaction = FakeTransaction;

    async fn transaction(&self, signature: &Signature) -> Result<Option<Self::Transaction>, RepositoryError> {
        Ok(self.manifests.get(signature).map(|manifest| FakeTransaction {
            manifest: manifest.clone(),
        }))
    }

    async fn arbitrary_signatures(&self) -> Result<Vec<Signature>, RepositoryError> {
        Ok(self.manifests.keys().cloned().collect())
    }
}

/// An on-disk blob store backed by in-memory maps, so tests can assert on
/// what ended up persisted.
#[derive(Default)]
pub struct FakeBlobStore {
    chunks: Mutex<HashMap<ChunkHash, Vec<u8>>>,
    blobs: Mutex<HashMap<Signature, Vec<u8>>>,
}

#[async_trait]
impl arbitrary_data_manager::BlobStore for FakeBlobStore {
    async fn exists(&self, signature: &Signature) -> bool {
        self.blobs.lock().unwrap().contains_key(signature)
    }

    async fn manifest(&self, _signature: &Signature) -> Option<Vec<ChunkHash>> {
        None
    }

    async fn chunk_exists(&self, hash: &ChunkHash) -> bool {
        self.chunks.lock().unwrap().contains_key(hash)
    }

    async fn read_chunk(&self, hash: &ChunkHash) -> Option<Vec<u8>> {
        self.chunks.lock().unwrap().get(hash).cloned()
    }

    async fn read_blob(&self, signature: &Signature) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(signature).cloned()
    }

    async fn write_chunk(&self, hash: &ChunkHash, bytes: Vec<u8>) -> Result<(), BlobStoreError> {
        self.chunks.lock().unwrap().insert(hash.clone(), bytes);
        Ok(())
    }
}

impl FakeBlobStore {
    pub fn with_blob(self, signature: Signature, bytes: Vec<u8>) -> Self {
        self.blobs.lock().unwrap().insert(signature, bytes);
        self
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.lock().unwrap().len()
    }

    pub fn has_chunk(&self, hash: &ChunkHash) -> bool {
        self.chunks.lock().unwrap().contains_key(hash)
    }
}

/// A remote peer that answers `GetArbitraryDataFile` from a fixed set of
/// chunks it holds, and records everything it was asked to send.
#[derive(Default)]
pub struct FakePeer {
    pub peer_id: u64,
    pub chunks: HashMap<ChunkHash, Vec<u8>>,
    pub sent: Mutex<Vec<Envelope>>,
    pub disconnects: Mutex<usize>,
}

impl FakePeer {
    pub fn new(peer_id: u64) -> Self {
        Self {
            peer_id,
            ..Self::default()
        }
    }

    pub fn holding(mut self, hash: ChunkHash, bytes: Vec<u8>) -> Self {
        self.chunks.insert(hash, bytes);
        self
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn disconnect_count(&self) -> usize {
        *self.disconnects.lock().unwrap()
    }
}

#[async_trait]
impl Peer for FakePeer {
    fn id(&self) -> PeerId {
        PeerId(self.peer_id)
    }

    async fn send_message(&self, msg: Envelope) -> bool {
        self.sent.lock().unwrap().push(msg);
        true
    }

    async fn get_response(&self, msg: &Envelope) -> Option<Envelope> {
        match &msg.payload {
            Payload::GetArbitraryDataFile { hash } => Some(Envelope::new(
                msg.id,
                match self.chunks.get(hash) {
                    Some(bytes) => Payload::ArbitraryDataFile { bytes: bytes.clone() },
                    None => Payload::FileUnknown,
                },
            )),
            _ => None,
        }
    }

    async fn disconnect(&self, _reason: &str) {
        *self.disconnects.lock().unwrap() += 1;
    }
}

/// A transport with a fixed set of handshaked peers; `broadcast` captures the
/// envelope the filter produced for each peer instead of actually delivering
/// it, mirroring how the handler tests observe outbound traffic.
#[derive(Default)]
pub struct FakeNetwork {
    pub peers: Vec<Arc<dyn Peer>>,
    pub broadcasts: Mutex<Vec<(PeerId, Option<Envelope>)>>,
}

impl FakeNetwork {
    pub fn with_peers(peers: Vec<Arc<dyn Peer>>) -> Self {
        Self {
            peers,
            broadcasts: Mutex::new(vec![]),
        }
    }

    pub fn last_broadcast(&self) -> Option<Envelope> {
        self.broadcasts
            .lock()
            .unwrap()
            .iter()
            .find_map(|(_, envelope)| envelope.clone())
    }

    pub fn broadcast_count(&self) -> usize {
        self.broadcasts.lock().unwrap().len()
    }
}

#[async_trait]
impl arbitrary_data_manager::Network for FakeNetwork {
    async fn handshaked_peers(&self) -> Vec<Arc<dyn Peer>> {
        self.peers.clone()
    }

    async fn broadcast(&self, filter: &(dyn Fn(&dyn Peer) -> Option<Envelope> + Send + Sync)) {
        let mut log = self.broadcasts.lock().unwrap();
        for peer in &self.peers {
            log.push((peer.id(), filter(peer.as_ref())));
        }
    }
}

pub struct NoMisbehavior;

impl arbitrary_data_manager::Controller for NoMisbehavior {
    fn has_misbehaved(&self, _peer: &PeerId) -> bool {
        false
    }
}
