// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! `ArbitraryDataManager`: wires the request table, in-flight set,
//! scavenger and janitor tasks, and handlers into one long-lived object
//! (§6 Lifecycle).

use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;

use crate::blobstore::BlobStore;
use crate::clock::Clock;
use crate::config::Settings;
use crate::controller::Controller;
use crate::error::ManagerError;
use crate::handlers::{self, HandlerOutcome};
use crate::janitor;
use crate::messages::Envelope;
use crate::network::{Network, Peer};
use crate::repository::Repository;
use crate::request::{InflightFetches, RequestTable};
use crate::scavenger;
use crate::stats::{Stats, StatsSnapshot};
use crate::types::{ChunkHash, MessageId, Signature};

/// The long-lived ADM object an embedder constructs once and shares via
/// `Arc`. Generic over its four external collaborators so tests can
/// exercise it against in-memory fakes.
pub struct ArbitraryDataManager<R, N, B, C>
where
    R: Repository,
    N: Network,
    B: BlobStore,
    C: Controller,
{
    table: Arc<RequestTable>,
    inflight: Arc<InflightFetches>,
    repository: Arc<R>,
    network: Arc<N>,
    blobstore: Arc<B>,
    controller: Arc<C>,
    settings: Settings,
    clock: Arc<dyn Clock>,
    stats: Stats,
    shutdown: Arc<tokio::sync::Notify>,
    tasks: AsyncMutex<Option<(JoinHandle<()>, JoinHandle<()>)>>,
}

impl<R, N, B, C> ArbitraryDataManager<R, N, B, C>
where
    R: Repository + 'static,
    N: Network + 'static,
    B: BlobStore + 'static,
    C: Controller + 'static,
{
    /// Construct a manager. Does not start any background tasks; call
    /// [`Self::start`] for that.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        network: Arc<N>,
        blobstore: Arc<B>,
        controller: Arc<C>,
        settings: Settings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            table: Arc::new(RequestTable::new()),
            inflight: Arc::new(InflightFetches::new()),
            repository,
            network,
            blobstore,
            controller,
            settings,
            clock,
            stats: Stats::new(),
            shutdown: Arc::new(tokio::sync::Notify::new()),
            tasks: AsyncMutex::new(None),
        }
    }

    /// Launch the scavenger and janitor tasks. Calling this a second time
    /// without an intervening [`Self::shutdown`] replaces the stored
    /// handles, leaking the previous tasks until they next notice the (not
    /// yet re-fired) shutdown signal — embedders should call this once.
    pub async fn start(&self) {
        let scavenger = tokio::spawn(scavenger::run(
            self.table.clone(),
            self.repository.clone(),
            self.network.clone(),
            self.controller.clone(),
            self.settings,
            self.clock.clone(),
            self.shutdown.clone(),
        ));
        let janitor = tokio::spawn(janitor::run(
            self.table.clone(),
            self.inflight.clone(),
            self.clock.clone(),
            self.shutdown.clone(),
        ));
        *self.tasks.lock().await = Some((scavenger, janitor));
    }

    /// Notify the background tasks to stop and wait for them to exit.
    pub async fn shutdown(&self) -> Result<(), ManagerError> {
        self.shutdown.notify_waiters();
        if let Some((scavenger, janitor)) = self.tasks.lock().await.take() {
            scavenger.await.map_err(|_| ManagerError::TaskJoin)?;
            janitor.await.map_err(|_| ManagerError::TaskJoin)?;
        }
        Ok(())
    }

    /// Handle an inbound `GetArbitraryData` message (§4.6.1).
    pub async fn on_get_arbitrary_data(&self, peer: &dyn Peer, id: MessageId, signature: &Signature) -> HandlerOutcome {
        handlers::get_arbitrary_data::handle(
            &self.table,
            self.repository.as_ref(),
            self.network.as_ref(),
            self.blobstore.as_ref(),
            self.clock.as_ref(),
            peer,
            id,
            signature,
        )
        .await
    }

    /// Handle an inbound `GetArbitraryDataFileList` message (§4.6.2).
    pub async fn on_get_arbitrary_data_file_list(&self, peer: &dyn Peer, id: MessageId, signature: &Signature) {
        handlers::get_file_list::handle(
            self.repository.as_ref(),
            self.blobstore.as_ref(),
            &self.stats,
            peer,
            id,
            signature,
        )
        .await;
    }

    /// Handle an inbound `ArbitraryDataFileList` reply (§4.6.3).
    pub async fn on_arbitrary_data_file_list(
        &self,
        peer: &dyn Peer,
        id: MessageId,
        signature: &Signature,
        hashes: &[ChunkHash],
    ) -> HandlerOutcome {
        handlers::file_list::handle(
            &self.table,
            &self.inflight,
            self.repository.as_ref(),
            self.blobstore.as_ref(),
            self.clock.as_ref(),
            peer,
            id,
            signature,
            hashes,
        )
        .await
    }

    /// Relay a just-received `ArbitraryDataFileList` reply to the peer that
    /// originally asked us, if this id is pending a forward (§4.6.3 step 7).
    pub async fn forward_if_pending(&self, id: MessageId, origin_peer: &dyn Peer, reply: Envelope) {
        handlers::file_list::forward_if_pending(&self.table, self.clock.as_ref(), id, origin_peer, reply).await;
    }

    /// Handle an inbound `GetArbitraryDataFile` message (§4.6.4).
    pub async fn on_get_arbitrary_data_file(&self, peer: &dyn Peer, id: MessageId, hash: &ChunkHash) {
        handlers::get_file::handle(self.blobstore.as_ref(), &self.stats, peer, id, hash).await;
    }

    /// A snapshot of the traffic counters (§4.8).
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of live request-table entries, for diagnostics.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.table.len()
    }

    /// Number of in-flight chunk fetches, for diagnostics.
    #[must_use]
    pub fn inflight_fetches(&self) -> usize {
        self.inflight.len()
    }
}
