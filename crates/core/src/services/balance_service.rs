use futures::stream::{self, Stream, StreamExt};

use super::sync_patch;
use crate::models::funds::Funds;
use crate::models::invoice::InvoicePaid;
use crate::models::payment::Payment;
use crate::models::peer::{ChannelState, Peer};
use crate::stream::distinct_until_changed;

/// One step of the channel-balance reconciliation.
#[derive(Debug, Clone)]
pub enum BalanceUpdate {
    Resync(Vec<Peer>),
    Received(u64),
    Sent(u64),
}

/// Sum of our side of every fully established channel, in msat.
pub fn channel_total(peers: &[Peer]) -> i64 {
    peers
        .iter()
        .filter_map(|peer| peer.channels.as_deref())
        .flatten()
        .filter(|chan| chan.state == ChannelState::Normal)
        .map(|chan| chan.msatoshi_to_us as i64)
        .sum()
}

pub fn apply_balance(balance: Option<i64>, update: BalanceUpdate) -> Option<i64> {
    match update {
        BalanceUpdate::Resync(peers) => Some(channel_total(&peers)),
        BalanceUpdate::Received(msat) => Some(balance.unwrap_or(0) + msat as i64),
        BalanceUpdate::Sent(msat) => Some(balance.unwrap_or(0) - msat as i64),
    }
}

/// Periodically re-synced channel balance, continuously patched with
/// incoming and outgoing payment amounts.
///
/// `None` until the first snapshot or patch arrives. Patches observed
/// before the first snapshot apply against zero. Equal consecutive
/// values are suppressed so downstream consumers are not recomputed for
/// no-op changes.
pub fn channel_balance(
    peers_snapshot: impl Stream<Item = Vec<Peer>>,
    incoming: impl Stream<Item = InvoicePaid>,
    outgoing: impl Stream<Item = Payment>,
) -> impl Stream<Item = Option<i64>> {
    let updates = stream::select(
        peers_snapshot.map(BalanceUpdate::Resync),
        stream::select(
            incoming.map(|inv| BalanceUpdate::Received(inv.msatoshi_received)),
            outgoing.map(|pay| BalanceUpdate::Sent(pay.msatoshi_sent)),
        ),
    );
    distinct_until_changed(sync_patch(None, updates, apply_balance))
}

/// Total value of the node's on-chain outputs. Snapshot-only: there is
/// no low-latency incremental source for on-chain funds in this design.
pub fn onchain_balance(funds: impl Stream<Item = Funds>) -> impl Stream<Item = u64> {
    funds.map(|funds| funds.outputs.iter().map(|out| out.value).sum())
}
