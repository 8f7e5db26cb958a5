use futures::stream::{self, Stream, StreamExt};

use super::sync_patch;
use crate::models::invoice::{Invoice, InvoicePaid, InvoiceStatus};
use crate::models::payment::Payment;

/// One step of the payments reconciliation.
#[derive(Debug, Clone)]
pub enum PaymentsUpdate {
    /// Authoritative resync from the node's full payment listing.
    Resync(Vec<Payment>),
    /// A just-settled outgoing payment, appended ahead of the next
    /// resync.
    Settled(Payment),
}

/// One step of the invoices reconciliation.
#[derive(Debug, Clone)]
pub enum InvoicesUpdate {
    /// Authoritative resync from the node's full invoice listing.
    Resync(Vec<Invoice>),
    /// A freshly created invoice.
    Created(Invoice),
    /// A settlement event, matched to its invoice by label.
    Paid(InvoicePaid),
}

pub fn apply_payments(mut payments: Vec<Payment>, update: PaymentsUpdate) -> Vec<Payment> {
    match update {
        PaymentsUpdate::Resync(list) => list,
        PaymentsUpdate::Settled(pay) => {
            payments.push(pay);
            payments
        }
    }
}

pub fn apply_invoices(mut invoices: Vec<Invoice>, update: InvoicesUpdate) -> Vec<Invoice> {
    match update {
        InvoicesUpdate::Resync(list) => list,
        InvoicesUpdate::Created(inv) => {
            invoices.push(inv);
            invoices
        }
        InvoicesUpdate::Paid(paid) => {
            // update-by-label; an event matching no known invoice is
            // dropped and the next resync settles the difference
            for inv in &mut invoices {
                if inv.label == paid.label {
                    inv.merge_paid(&paid);
                }
            }
            invoices
        }
    }
}

/// Periodically re-synced payment list, continuously patched with
/// settled outgoing payments.
///
/// A patched payment carries a completion timestamp synthesized at
/// arrival; the next resync replaces it with the node's own record.
pub fn fresh_payments(
    payments_snapshot: impl Stream<Item = Vec<Payment>>,
    outgoing: impl Stream<Item = Payment>,
) -> impl Stream<Item = Vec<Payment>> {
    let updates = stream::select(
        payments_snapshot.map(PaymentsUpdate::Resync),
        outgoing.map(|pay| PaymentsUpdate::Settled(pay.settled_now())),
    );
    sync_patch(Vec::new(), updates, apply_payments)
}

/// Periodically re-synced invoice list, continuously patched with new
/// and settled invoices. Only paid invoices survive the post-filter.
pub fn fresh_invoices(
    invoices_snapshot: impl Stream<Item = Vec<Invoice>>,
    created: impl Stream<Item = Invoice>,
    incoming: impl Stream<Item = InvoicePaid>,
) -> impl Stream<Item = Vec<Invoice>> {
    let updates = stream::select(
        invoices_snapshot.map(InvoicesUpdate::Resync),
        stream::select(
            created.map(InvoicesUpdate::Created),
            incoming.map(InvoicesUpdate::Paid),
        ),
    );
    sync_patch(Vec::new(), updates, apply_invoices).map(|invoices| {
        invoices
            .into_iter()
            .filter(|inv| inv.status == InvoiceStatus::Paid)
            .collect()
    })
}
