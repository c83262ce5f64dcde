// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Blockchain storage and transaction lookup (§6). Out of scope to
//! implement — this module only names the seam.

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::types::{ChunkHash, Signature};

/// A read-only view onto one arbitrary transaction, as handed back by
/// [`Repository::transaction`].
pub trait TransactionView: Send + Sync {
    /// True if the transaction's payload is already wholly present locally.
    fn is_data_local(&self) -> bool;

    /// The ordered list of chunk hashes that make up this transaction's
    /// payload, used to validate candidate lists sent by peers.
    fn manifest(&self) -> &[ChunkHash];
}

/// The chain's transaction store, consumed but not implemented by the ADM.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The concrete [`TransactionView`] type this repository hands back.
    type Transaction: TransactionView;

    /// Load the transaction for `signature`, if one exists.
    async fn transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<Self::Transaction>, RepositoryError>;

    /// All arbitrary-type transaction signatures, confirmed or not.
    async fn arbitrary_signatures(&self) -> Result<Vec<Signature>, RepositoryError>;
}
