// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Content-addressed file storage on disk, including chunk reassembly (§6).
//! Out of scope to implement — this module only names the seam.

use async_trait::async_trait;

use crate::error::BlobStoreError;
use crate::types::{ChunkHash, Signature};

/// The on-disk, content-addressed blob store. Out of scope to implement;
/// the ADM only ever calls through this trait.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// True if the whole blob for `signature` is present locally.
    async fn exists(&self, signature: &Signature) -> bool;

    /// The locally-known chunk manifest for `signature`, if any blob
    /// metadata exists for it yet (distinct from the Repository's canonical
    /// manifest, which is used to validate inbound hash lists — see §4.6.2
    /// vs §4.6.3).
    async fn manifest(&self, signature: &Signature) -> Option<Vec<ChunkHash>>;

    /// True if the chunk `hash` is present locally.
    async fn chunk_exists(&self, hash: &ChunkHash) -> bool;

    /// Read one chunk's bytes, if present.
    async fn read_chunk(&self, hash: &ChunkHash) -> Option<Vec<u8>>;

    /// Read the whole reassembled blob's bytes, if present.
    async fn read_blob(&self, signature: &Signature) -> Option<Vec<u8>>;

    /// Persist a freshly-fetched chunk.
    async fn write_chunk(&self, hash: &ChunkHash, bytes: Vec<u8>) -> Result<(), BlobStoreError>;
}
