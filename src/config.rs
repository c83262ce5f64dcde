// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! Ambient configuration (§9.5). Unlike `Repository`/`Network`/`BlobStore`,
//! `Settings` is trivial enough that this crate owns a concrete type rather
//! than a trait.

/// Runtime knobs the ADM reads from its host. `min_blockchain_peers` is the
/// only one named in the source design; it gates the scavenger (§4.3 step
/// 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Quorum the scavenger requires before it will broadcast a discovery
    /// request.
    pub min_blockchain_peers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_blockchain_peers: 3,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_settings_require_some_quorum() {
        assert!(Settings::default().min_blockchain_peers > 0);
    }
}
