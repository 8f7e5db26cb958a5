use futures::future;
use futures::stream::{self, Stream, StreamExt};

use super::sync_patch;
use crate::models::rpc::{RpcCall, RpcEntry};
use crate::stream::{fold_first, start_with};

/// Most recent console results kept in the history ring.
pub const HISTORY_LIMIT: usize = 20;

/// One step of the console-history fold.
#[derive(Debug, Clone)]
pub enum HistoryUpdate {
    Entry(RpcEntry),
    Clear,
}

pub fn apply_history(mut history: Vec<RpcEntry>, update: HistoryUpdate) -> Vec<RpcEntry> {
    match update {
        HistoryUpdate::Entry(entry) => {
            history.insert(0, entry);
            history.truncate(HISTORY_LIMIT);
            history
        }
        HistoryUpdate::Clear => Vec::new(),
    }
}

/// Running count of foreground requests awaiting a response.
///
/// Every non-background call contributes `+1` the moment it is seen and
/// exactly one `-1` when its response stream ends — response and error
/// alike, so a failing call can never wedge the counter. Background
/// pollers are excluded entirely. Starts at 0 and never goes negative.
pub fn loading(requests: impl Stream<Item = RpcCall>) -> impl Stream<Item = i64> {
    let deltas = requests
        .filter(|call| future::ready(!call.background))
        .map(|call| {
            let done = call
                .responses
                .inspect(|res| {
                    if let Err(err) = res {
                        tracing::debug!(target: "wallet::model", %err, "rpc call failed");
                    }
                })
                .filter_map(|_| future::ready(None::<i64>))
                .chain(stream::once(future::ready(-1)));
            start_with(1, done).boxed()
        })
        .flatten_unordered(None);
    fold_first(start_with(0, deltas), |count, delta| count + delta)
}

/// Console history ring: newest result first, capped, reset by clear.
pub fn rpc_history(
    results: impl Stream<Item = RpcEntry>,
    clear: impl Stream<Item = ()>,
) -> impl Stream<Item = Vec<RpcEntry>> {
    let updates = stream::select(
        results.map(HistoryUpdate::Entry),
        clear.map(|_| HistoryUpdate::Clear),
    );
    sync_patch(Vec::new(), updates, apply_history)
}
