// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Inbound message handlers (§4.6).

pub mod file_list;
pub mod get_arbitrary_data;
pub mod get_file;
pub mod get_file_list;

/// Why a handler took no action. Not an error — routine protocol noise that
/// a `Result::Err` would force callers to treat as a fault (§7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoredReason {
    /// `msg.id` was already present in the request table (duplicate, or a
    /// reply arriving after its record was already resolved/swept).
    DuplicateOrStale,
    /// The repository has no transaction for the given signature.
    UnknownTransaction,
    /// A `FileList` reply's signature did not match the record it
    /// correlates to.
    SignatureMismatch,
    /// A `FileList` reply carried an empty hash list.
    EmptyHashList,
    /// A `FileList` reply named a hash absent from the transaction's
    /// canonical manifest.
    HashNotInManifest,
}

/// What a handler did with an inbound message. See [`IgnoredReason`] for why
/// `Ignored` is not modeled as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerOutcome {
    Handled,
    Ignored(IgnoredReason),
}
