// Copyright © 2019-2020 The Radicle Foundation <hello@radicle.foundation>
//
// This file is part of radicle-link, distributed under the GPLv3 with Radicle
// Linking Exception. For full terms see the included LICENSE file.

//! "Do any peers have chunks for this signature?" broadcast (§4.4).

use std::time::Duration;

use rand::Rng;

use crate::clock::Clock;
use crate::messages::{Envelope, Payload};
use crate::network::Network;
use crate::request::{RequestRecord, RequestTable, ARBITRARY_REQUEST_TIMEOUT_MS};
use crate::types::Signature;

/// How often `find` polls the request table while waiting for a reply.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Broadcast a `GetArbitraryDataFileList` for `signature` and wait for a
/// handler to mark the correlating id resolved.
///
/// Returns `true` if a response was observed before the deadline, or if the
/// deadline elapsed without the id disappearing from the table (the source
/// design's optimistic timeout behavior, preserved per §9.2). Returns
/// `false` only if the entry vanished — i.e. was already swept by the
/// janitor — before either happened, which given the timeout equals the
/// sweep window should not occur in practice but is handled defensively.
pub async fn find(
    table: &RequestTable,
    network: &dyn Network,
    clock: &dyn Clock,
    signature: &Signature,
) -> bool {
    let id = loop {
        let candidate = rand::thread_rng().gen::<u32>();
        let record = RequestRecord::Originated {
            signature: signature.clone(),
            created_at: clock.now(),
        };
        if table.insert_if_absent(candidate, record) {
            break candidate;
        }
    };

    let message = Envelope::new(
        id,
        Payload::GetArbitraryDataFileList {
            signature: signature.clone(),
        },
    );
    network
        .broadcast(&move |_peer| Some(message.clone()))
        .await;

    let deadline = clock.now() + ARBITRARY_REQUEST_TIMEOUT_MS;
    loop {
        match table.get(id) {
            None => return false,
            Some(record) if record.is_resolved() => return true,
            Some(_) => {},
        }

        if clock.now() >= deadline {
            tracing::info!(id, %signature, "discovery timed out, leaving record for janitor");
            return true;
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
