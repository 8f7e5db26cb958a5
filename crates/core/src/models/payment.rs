use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State of an outgoing payment as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Complete,
    Pending,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Complete => write!(f, "complete"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// An outgoing payment as listed by the node, or as delivered by the
/// pay-completion event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub status: PaymentStatus,

    /// Amount delivered to the destination, excluding fees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msatoshi: Option<u64>,

    /// Amount actually sent, including fees.
    pub msatoshi_sent: u64,

    /// Creation time (UNIX seconds).
    pub created_at: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_hash: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payment {
    /// Mark this payment as settled at the current wall-clock time.
    ///
    /// Used when patching the payment list ahead of the next resync: the
    /// completion event does not carry the node's own timestamp, so one
    /// is synthesized and holds until the next authoritative listing.
    pub fn settled_now(mut self) -> Self {
        self.status = PaymentStatus::Complete;
        self.created_at = chrono::Utc::now().timestamp().max(0) as u64;
        self
    }
}
