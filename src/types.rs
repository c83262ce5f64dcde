// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Opaque content-addressing identifiers and their stable textual forms.

use std::fmt;

/// Identifies an arbitrary transaction. Opaque beyond its byte representation;
/// the ADM never interprets the bytes, only uses them as a map key and as an
/// argument to the `Repository`/`BlobStore` collaborators.
#[derive(Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Signature(Vec<u8>);

/// Identifies one chunk of content-addressed data.
#[derive(Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ChunkHash(Vec<u8>);

/// A peer identity, as handed to us by the `Network` collaborator.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct PeerId(pub u64);

/// A 32-bit message correlation id.
pub type MessageId = u32;

macro_rules! base58_bytes {
    ($name:ident) => {
        impl $name {
            /// Wrap an existing byte string. The ADM does not validate length
            /// or content; that is the Codec's and Repository's job.
            #[must_use]
            pub fn new(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            /// The raw bytes.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// The stable base58 textual form, used only as a map key.
            #[must_use]
            pub fn to_base58(&self) -> String {
                bs58::encode(&self.0).into_string()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.to_base58())
                    .finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base58())
            }
        }
    };
}

base58_bytes!(Signature);
base58_bytes!(ChunkHash);
