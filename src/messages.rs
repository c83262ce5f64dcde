// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Wire message payload shapes (§6). Encoding/decoding is the Codec's job
//! and out of scope here — these types exist purely so the rest of the
//! crate has something concrete to pattern-match on.

use crate::types::{ChunkHash, MessageId, Signature};

/// Every message the ADM sends or receives, tagged with its correlation id.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Envelope {
    pub id: MessageId,
    pub payload: Payload,
}

impl Envelope {
    #[must_use]
    pub const fn new(id: MessageId, payload: Payload) -> Self {
        Self { id, payload }
    }
}

/// The payload shapes named in §6. `BlockSummaries` is kept only so
/// `Fetcher` can recognize the legacy "file unknown" sentinel on inbound
/// replies (§9.1); this implementation never constructs it itself.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Payload {
    GetArbitraryData { signature: Signature },
    ArbitraryData { signature: Signature, bytes: Vec<u8> },
    GetArbitraryDataFileList { signature: Signature },
    ArbitraryDataFileList {
        signature: Signature,
        hashes: Vec<ChunkHash>,
    },
    GetArbitraryDataFile { hash: ChunkHash },
    ArbitraryDataFile { bytes: Vec<u8> },
    /// Dedicated "I don't have it" sentinel, sent by this implementation.
    FileUnknown,
    /// Legacy "I don't have it" sentinel (an empty `BLOCK_SUMMARIES`),
    /// accepted on the inbound path for interoperability with older peers.
    BlockSummaries,
}

impl Payload {
    /// True for [`Payload::FileUnknown`] and the legacy empty
    /// `BlockSummaries` synonym (§9.1).
    #[must_use]
    pub const fn is_file_unknown(&self) -> bool {
        matches!(self, Self::FileUnknown | Self::BlockSummaries)
    }
}
