pub mod alert_service;
pub mod balance_service;
pub mod config_service;
pub mod console_service;
pub mod feed_service;
pub mod ledger_service;
pub mod unit_service;

use futures::future;
use futures::stream::{Stream, StreamExt};

use crate::stream::start_with;

/// The sync+patch fold shared by every reconciled collection: emit the
/// initial value, then apply updates in arrival order.
///
/// A snapshot update replaces the whole value, a patch amends it; the
/// effect of a patch therefore lasts exactly until the next snapshot
/// lands. Callers must tolerate a patched record disappearing at a
/// resync that has not yet caught up with the backend's own state —
/// snapshots are authoritative by design.
pub fn sync_patch<T, U, F>(
    initial: T,
    updates: impl Stream<Item = U>,
    mut apply: F,
) -> impl Stream<Item = T>
where
    T: Clone,
    F: FnMut(T, U) -> T,
{
    let seed = initial.clone();
    start_with(
        seed,
        updates.scan(initial, move |state, update| {
            let next = apply(state.clone(), update);
            *state = next.clone();
            future::ready(Some(next))
        }),
    )
}
