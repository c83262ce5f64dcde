// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Error kinds (§7). Protocol-level "ignore this" outcomes are *not*
//! modeled as errors here — see [`crate::handlers::HandlerOutcome`] — only
//! genuine collaborator/setup faults are.

use thiserror::Error;

/// A failure reading from the blockchain's transaction store.
#[derive(Debug, Error)]
#[error("repository fault: {0}")]
pub struct RepositoryError(pub String);

/// A failure persisting or reading a chunk from disk.
#[derive(Debug, Error)]
#[error("blob store fault: {0}")]
pub struct BlobStoreError(pub String);

/// Errors that can prevent constructing or running an
/// [`crate::manager::ArbitraryDataManager`].
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    BlobStore(#[from] BlobStoreError),

    #[error("a background task panicked or was dropped without a clean shutdown")]
    TaskJoin,
}
