// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Minimal standalone runner for [`arbitrary_data_manager::ArbitraryDataManager`],
//! wired up against in-memory demo collaborators so the crate can be
//! exercised locally without a real chain or transport.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use structopt::StructOpt;

use arbitrary_data_manager::{
    BlobStore,
    BlobStoreError,
    ChunkHash,
    Controller,
    Envelope,
    Network,
    Peer,
    PeerId,
    Repository,
    RepositoryError,
    Settings,
    Signature,
    SystemClock,
    TransactionView,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "adm-node", about = "Standalone runner for the arbitrary-data manager")]
struct Args {
    /// Number of handshaked, well-behaved peers required before the
    /// scavenger will broadcast a discovery request.
    #[structopt(long, default_value = "3")]
    min_blockchain_peers: usize,

    /// `tracing_subscriber::EnvFilter` directive string.
    #[structopt(long, default_value = "arbitrary_data_manager=info")]
    log_filter: String,
}

impl From<&Args> for Settings {
    fn from(args: &Args) -> Self {
        Self {
            min_blockchain_peers: args.min_blockchain_peers,
        }
    }
}

struct DemoTransaction {
    manifest: Vec<ChunkHash>,
}

impl TransactionView for DemoTransaction {
    fn is_data_local(&self) -> bool {
        false
    }

    fn manifest(&self) -> &[ChunkHash] {
        &self.manifest
    }
}

/// An empty in-memory repository: every lookup misses. Enough to boot the
/// manager; an embedder wires in a real chain-backed implementation.
struct DemoRepository;

#[async_trait]
impl Repository for DemoRepository {
    type Transaction = DemoTransaction;

    async fn transaction(&self, _signature: &Signature) -> Result<Option<Self::Transaction>, RepositoryError> {
        Ok(None)
    }

    async fn arbitrary_signatures(&self) -> Result<Vec<Signature>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// An empty in-memory blob store: nothing is ever present locally.
struct DemoBlobStore;

#[async_trait]
impl BlobStore for DemoBlobStore {
    async fn exists(&self, _signature: &Signature) -> bool {
        false
    }

    async fn manifest(&self, _signature: &Signature) -> Option<Vec<ChunkHash>> {
        None
    }

    async fn chunk_exists(&self, _hash: &ChunkHash) -> bool {
        false
    }

    async fn read_chunk(&self, _hash: &ChunkHash) -> Option<Vec<u8>> {
        None
    }

    async fn read_blob(&self, _signature: &Signature) -> Option<Vec<u8>> {
        None
    }

    async fn write_chunk(&self, _hash: &ChunkHash, _bytes: Vec<u8>) -> Result<(), BlobStoreError> {
        Ok(())
    }
}

/// A network with no handshaked peers; the scavenger stays below quorum
/// until an embedder substitutes a real transport.
struct DemoNetwork;

#[async_trait]
impl Network for DemoNetwork {
    async fn handshaked_peers(&self) -> Vec<Arc<dyn Peer>> {
        Vec::new()
    }

    async fn broadcast(&self, _filter: &(dyn Fn(&dyn Peer) -> Option<Envelope> + Send + Sync)) {}
}

struct DemoController;

impl Controller for DemoController {
    fn has_misbehaved(&self, _peer: &PeerId) -> bool {
        false
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log_filter))
        .init();

    let settings = Settings::from(&args);
    tracing::info!(?settings, "starting arbitrary-data manager demo node");

    let manager = arbitrary_data_manager::ArbitraryDataManager::new(
        Arc::new(DemoRepository),
        Arc::new(DemoNetwork),
        Arc::new(DemoBlobStore),
        Arc::new(DemoController),
        settings,
        Arc::new(SystemClock),
    );

    manager.start().await;
    tracing::info!("scavenger and janitor tasks running, press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    manager.shutdown().await?;
    Ok(())
}
