// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! The peer-to-peer transport, peer selection, and broadcast primitive
//! (§6). Out of scope to implement — this module only names the seam.

use std::sync::Arc;

use async_trait::async_trait;

use crate::messages::Envelope;
use crate::types::PeerId;

/// One connected, handshaked remote peer.
#[async_trait]
pub trait Peer: Send + Sync {
    /// This peer's identity.
    fn id(&self) -> PeerId;

    /// Send a message to this peer. Returns `false` on a transport-level
    /// send failure; callers disconnect on `false`, never retry.
    async fn send_message(&self, msg: Envelope) -> bool;

    /// Block until this peer replies to `msg` (matched by correlation id),
    /// or the transport gives up. `None` means no reply arrived.
    async fn get_response(&self, msg: &Envelope) -> Option<Envelope>;

    /// Disconnect this peer, recording `reason` for diagnostics.
    async fn disconnect(&self, reason: &str);
}

/// The transport: peer discovery, handshake state, and the broadcast
/// fanout. Out of scope to implement.
#[async_trait]
pub trait Network: Send + Sync {
    /// Peers that have completed the transport-level handshake.
    async fn handshaked_peers(&self) -> Vec<Arc<dyn Peer>>;

    /// Fan a message out to a subset of peers. `filter` is called once per
    /// handshaked peer; returning `None` skips that peer, mirroring the
    /// per-peer broadcast filter described in §6.
    async fn broadcast(&self, filter: &(dyn Fn(&dyn Peer) -> Option<Envelope> + Send + Sync));
}
