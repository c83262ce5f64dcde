// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Peer misbehavior tracking (§6). Out of scope to implement.

use crate::types::PeerId;

/// Host-node peer reputation tracking, consumed but not implemented here.
pub trait Controller: Send + Sync {
    /// True if `peer` has previously misbehaved and should be excluded from
    /// the scavenger's quorum count.
    fn has_misbehaved(&self, peer: &PeerId) -> bool;
}
