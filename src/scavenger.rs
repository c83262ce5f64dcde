// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! The background task that looks for arbitrary transactions missing local
//! data and kicks off discovery for one of them each cycle (§4.3).

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::clock::Clock;
use crate::config::Settings;
use crate::controller::Controller;
use crate::discovery;
use crate::network::Network;
use crate::repository::{Repository, TransactionView};
use crate::request::RequestTable;
use crate::types::Signature;

/// How often the scavenger looks for work.
const SCAVENGE_INTERVAL: Duration = Duration::from_millis(2_000);

/// One scavenge cycle: find a signature missing local data and ask
/// [`discovery::find`] to locate it. Returns the signature it chose, or
/// `None` if there was nothing to do this cycle (below quorum, or every
/// known arbitrary transaction is already complete locally).
pub async fn run_once<R, N, C>(
    table: &RequestTable,
    repository: &R,
    network: &N,
    controller: &C,
    settings: &Settings,
    clock: &dyn Clock,
) -> Result<Option<Signature>, crate::error::ManagerError>
where
    R: Repository,
    N: Network,
    C: Controller,
{
    let peers = network.handshaked_peers().await;
    let well_behaved = peers.iter().filter(|peer| !controller.has_misbehaved(&peer.id())).count();
    if well_behaved < settings.min_blockchain_peers {
        tracing::debug!(well_behaved, required = settings.min_blockchain_peers, "below quorum, skipping cycle");
        return Ok(None);
    }

    let signatures = repository.arbitrary_signatures().await?;
    let mut incomplete = Vec::with_capacity(signatures.len());
    for signature in signatures {
        match repository.transaction(&signature).await {
            Ok(Some(transaction)) => {
                if !transaction.is_data_local() {
                    incomplete.push(signature);
                }
            },
            Ok(None) => {},
            Err(err) => {
                tracing::error!(%err, %signature, "repository fault checking transaction completeness");
            },
        }
    }

    let chosen = incomplete.choose(&mut rand::thread_rng()).cloned();
    if let Some(signature) = &chosen {
        discovery::find(table, network, clock, signature).await;
    }
    Ok(chosen)
}

/// Run [`run_once`] on [`SCAVENGE_INTERVAL`], until `shutdown` fires.
pub async fn run<R, N, C>(
    table: Arc<RequestTable>,
    repository: Arc<R>,
    network: Arc<N>,
    controller: Arc<C>,
    settings: Settings,
    clock: Arc<dyn Clock>,
    shutdown: Arc<tokio::sync::Notify>,
) where
    R: Repository + 'static,
    N: Network + 'static,
    C: Controller + 'static,
{
    loop {
        tokio::select! {
            () = shutdown.notified() => {
                tracing::info!("scavenger received shutdown");
                return;
            },
            () = tokio::time::sleep(SCAVENGE_INTERVAL) => {},
        }

        if let Err(err) = run_once(&table, repository.as_ref(), network.as_ref(), controller.as_ref(), &settings, clock.as_ref()).await
        {
            tracing::warn!(%err, "scavenger cycle failed");
        }
    }
}
