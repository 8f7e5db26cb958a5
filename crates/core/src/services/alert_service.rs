use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};

use crate::models::alert::{Alert, AlertKind};
use crate::models::config::SavedConfig;
use crate::models::invoice::InvoicePaid;
use crate::models::payment::Payment;
use crate::models::unit::UnitFormatter;
use crate::stream::{combine_latest, switch_latest};

/// Delay between a save-settings event and its confirmation alert. A
/// second save within the window supersedes the pending confirmation.
const SETTINGS_SAVED_DELAY: Duration = Duration::from_millis(1);

/// Merge every alert source into a single `Option<AlertKind>` stream;
/// `None` is a dismissal.
pub fn alert_events(
    error: impl Stream<Item = String>,
    incoming: impl Stream<Item = InvoicePaid>,
    outgoing: impl Stream<Item = Payment>,
    save_conf: impl Stream<Item = SavedConfig> + Send + 'static,
    dismiss: impl Stream<Item = ()>,
) -> impl Stream<Item = Option<AlertKind>> {
    let saved = switch_latest(save_conf.map(|_| {
        stream::once(async {
            tokio::time::sleep(SETTINGS_SAVED_DELAY).await;
            AlertKind::SettingsSaved
        })
    }));
    stream::select(
        stream::select(
            error.map(|err| Some(AlertKind::Error(err))),
            dismiss.map(|_| None),
        ),
        stream::select(
            stream::select(
                incoming.map(|inv| Some(AlertKind::Received(inv.msatoshi_received))),
                outgoing.map(|pay| Some(AlertKind::Sent(pay.msatoshi.unwrap_or(pay.msatoshi_sent)))),
            ),
            saved.map(Some),
        ),
    )
}

/// Substitute the amount placeholder with the formatter active at
/// emission time. An amount alert re-renders whenever the unit or rate
/// changes while it is showing.
pub fn render_alert(kind: &AlertKind, formatter: &UnitFormatter) -> Alert {
    let message = match kind {
        AlertKind::Error(err) => err.clone(),
        AlertKind::Received(msat) => format!("Received payment of {}", formatter.format(*msat)),
        AlertKind::Sent(msat) => format!("Sent payment of {}", formatter.format(*msat)),
        AlertKind::SettingsSaved => "Settings saved successfully".to_string(),
    };
    Alert {
        severity: kind.severity(),
        message,
    }
}

/// User-visible alerts: merged events combined with the live formatter.
/// Nothing is emitted until the formatter is available.
pub fn alerts(
    events: impl Stream<Item = Option<AlertKind>>,
    formatter: impl Stream<Item = UnitFormatter>,
) -> impl Stream<Item = Option<Alert>> {
    combine_latest(events, formatter, |kind, fmt| {
        kind.as_ref().map(|kind| render_alert(kind, fmt))
    })
}
