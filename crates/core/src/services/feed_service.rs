use futures::stream::Stream;

use crate::models::feed::{Direction, FeedEntry, FeedRecord};
use crate::models::invoice::Invoice;
use crate::models::payment::Payment;
use crate::stream::combine_latest;

/// Build the complete feed from the current collections: paid invoices
/// become incoming entries, payments outgoing ones, newest first.
///
/// Rebuilt from scratch on every contributing change rather than merged
/// incrementally — collections stay small enough that the full sort is
/// cheaper than being clever.
pub fn build_feed(invoices: &[Invoice], payments: &[Payment]) -> Vec<FeedEntry> {
    let mut entries: Vec<FeedEntry> = invoices
        .iter()
        .map(|inv| FeedEntry {
            direction: Direction::In,
            timestamp: inv.paid_at.unwrap_or(0),
            msatoshi: inv.msatoshi_received.unwrap_or(0),
            record: FeedRecord::Invoice(inv.clone()),
        })
        .chain(payments.iter().map(|pay| FeedEntry {
            direction: Direction::Out,
            timestamp: pay.created_at,
            msatoshi: pay.msatoshi.unwrap_or(0),
            record: FeedRecord::Payment(pay.clone()),
        }))
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}

/// Chronologically sorted feed of incoming and outgoing payments,
/// re-derived whenever either collection changes.
pub fn feed(
    invoices: impl Stream<Item = Vec<Invoice>>,
    payments: impl Stream<Item = Vec<Payment>>,
) -> impl Stream<Item = Vec<FeedEntry>> {
    combine_latest(invoices, payments, |invs, pays| build_feed(invs, pays))
}
