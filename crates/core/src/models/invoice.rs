use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payment state of an invoice as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Expired,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Unpaid => write!(f, "unpaid"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Expired => write!(f, "expired"),
        }
    }
}

/// A receivable invoice as listed by the node.
///
/// Unknown backend fields are preserved in `extra` so the raw record can
/// be surfaced unchanged in the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Caller-chosen label, unique per invoice. Incoming-payment events
    /// are matched against invoices by this label.
    pub label: String,

    pub status: InvoiceStatus,

    /// Requested amount in msat; absent for "any amount" invoices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msatoshi: Option<u64>,

    /// Amount actually received in msat, present once paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msatoshi_received: Option<u64>,

    /// Settlement time (UNIX seconds), present once paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_index: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt11: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settlement event for an invoice, pushed by the node the moment the
/// invoice is paid — ahead of the next full invoice resync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePaid {
    pub label: String,
    pub msatoshi_received: u64,
    pub paid_at: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_index: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Invoice {
    /// Overlay the fields of a settlement event onto this invoice,
    /// record-spread style: event fields win, everything else stays.
    pub fn merge_paid(&mut self, paid: &InvoicePaid) {
        self.status = InvoiceStatus::Paid;
        self.msatoshi_received = Some(paid.msatoshi_received);
        self.paid_at = Some(paid.paid_at);
        if paid.pay_index.is_some() {
            self.pay_index = paid.pay_index;
        }
        for (key, value) in &paid.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}
