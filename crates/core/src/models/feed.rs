use serde::{Deserialize, Serialize};

use super::invoice::Invoice;
use super::payment::Payment;

/// Direction of a feed entry relative to this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// The raw record behind a feed row, kept whole for detail display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedRecord {
    Invoice(Invoice),
    Payment(Payment),
}

/// One row of the combined payment activity feed.
///
/// The feed is rebuilt in full on every contributing change and handed
/// to consumers as a complete replacement, never an append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub direction: Direction,

    /// Settlement time for incoming entries, creation time for outgoing
    /// ones (UNIX seconds).
    pub timestamp: u64,

    pub msatoshi: u64,

    pub record: FeedRecord,
}
