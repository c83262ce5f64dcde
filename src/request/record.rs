// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! The small state machine carried per in-flight request id.

use crate::types::{PeerId, Signature};

/// The lifecycle of a single request/response correlation id.
///
/// The source design represents this as two nullable fields on a single
/// struct (`signature: Option<Signature>`, `origin: Option<PeerId>`); this
/// reimplementation follows the recommendation in the design notes and makes
/// the four reachable combinations an explicit tagged enum instead, so an
/// invalid combination cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RequestRecord {
    /// We originated this request; no response received yet.
    Originated {
        signature: Signature,
        created_at: u64,
    },
    /// We are forwarding this request on behalf of `origin`; no response
    /// received yet.
    Forwarding {
        signature: Signature,
        origin: PeerId,
        created_at: u64,
    },
    /// Fully resolved: we originated and processed the response, or we
    /// already forwarded it to `origin`.
    Resolved { created_at: u64 },
    /// Transient: a response was received while we were forwarding, but the
    /// forward to `origin` has not gone out yet.
    PendingForward { origin: PeerId, created_at: u64 },
}

impl RequestRecord {
    /// The timestamp this record was last written (inserted or transitioned).
    #[must_use]
    pub fn created_at(&self) -> u64 {
        match self {
            Self::Originated { created_at, .. }
            | Self::Forwarding { created_at, .. }
            | Self::Resolved { created_at }
            | Self::PendingForward { created_at, .. } => *created_at,
        }
    }

    /// The signature this record is tracking, if the response hasn't been
    /// processed yet.
    #[must_use]
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Originated { signature, .. } | Self::Forwarding { signature, .. } => {
                Some(signature)
            },
            Self::Resolved { .. } | Self::PendingForward { .. } => None,
        }
    }

    /// True once the response for this id has been received and processed
    /// (`Resolved`) or is only waiting on a forward (`PendingForward`).
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::PendingForward { .. })
    }

    /// Transition a record whose response just arrived. `Originated` becomes
    /// `Resolved`; `Forwarding` becomes `PendingForward` (the forward is sent
    /// by the caller afterwards). Any other starting state is returned
    /// unchanged, which callers should treat as "ignore" per the handler
    /// contract in §4.6.3.
    #[must_use]
    pub fn into_received(self, now: u64) -> Self {
        match self {
            Self::Originated { .. } => Self::Resolved { created_at: now },
            Self::Forwarding { origin, .. } => Self::PendingForward {
                origin,
                created_at: now,
            },
            other @ (Self::Resolved { .. } | Self::PendingForward { .. }) => other,
        }
    }

    /// The peer to forward the response to, if this record was `Forwarding`
    /// or is now `PendingForward`.
    #[must_use]
    pub fn forward_origin(&self) -> Option<PeerId> {
        match self {
            Self::Forwarding { origin, .. } | Self::PendingForward { origin, .. } => Some(*origin),
            Self::Originated { .. } | Self::Resolved { .. } => None,
        }
    }

    /// Mark a `PendingForward` record as fully resolved once the forward has
    /// been attempted (successfully or not — see §9.4).
    #[must_use]
    pub fn into_forwarded(self, now: u64) -> Self {
        match self {
            Self::PendingForward { .. } => Self::Resolved { created_at: now },
            other => other,
        }
    }
}
