// ═══════════════════════════════════════════════════════════════════
// Configuration & Alert Tests — cyclic settings, expert flag, server
// override, combined config gating, alert pipeline with deferred
// amount substitution
// ═══════════════════════════════════════════════════════════════════

use futures::channel::mpsc;
use futures::stream::StreamExt;
use futures::{pin_mut, poll};
use rust_decimal_macros::dec;
use serde_json::Map;

use ln_wallet_core::models::alert::{AlertKind, Severity};
use ln_wallet_core::models::config::{SavedConfig, Tables};
use ln_wallet_core::models::invoice::InvoicePaid;
use ln_wallet_core::models::payment::{Payment, PaymentStatus};
use ln_wallet_core::models::unit::UnitFormatter;
use ln_wallet_core::services::alert_service::{alert_events, alerts, render_alert};
use ln_wallet_core::services::config_service::{config, expert_mode, server, setting_cycle};

// ═══════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════

fn units() -> Vec<String> {
    Tables::default().units
}

fn sat_formatter() -> UnitFormatter {
    UnitFormatter {
        unit: "sat".to_string(),
        rate: Some(dec!(0.001)),
        step: dec!(0.001),
    }
}

fn bits_formatter() -> UnitFormatter {
    UnitFormatter {
        unit: "bits".to_string(),
        rate: Some(dec!(0.00001)),
        step: dec!(0.00001),
    }
}

fn paid_event(msat: u64) -> InvoicePaid {
    InvoicePaid {
        label: "x".to_string(),
        msatoshi_received: msat,
        paid_at: 1,
        pay_index: None,
        extra: Map::new(),
    }
}

fn sent_payment(msat: u64) -> Payment {
    Payment {
        status: PaymentStatus::Complete,
        msatoshi: Some(msat),
        msatoshi_sent: msat + 10,
        created_at: 1,
        destination: None,
        payment_hash: None,
        extra: Map::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Cyclic settings
// ═══════════════════════════════════════════════════════════════════

/// Starting at "sat" (index 0), two +1 toggles land on "milli":
/// (0 + 1 + 1) mod 5 = 2 in `sat bits milli btc usd`.
#[tokio::test]
async fn unit_cycle_advances_by_modular_increment() {
    let (seed_tx, seed_rx) = mpsc::unbounded();
    let (tog_tx, tog_rx) = mpsc::unbounded();
    let s = setting_cycle(units(), "sat".to_string(), seed_rx, tog_rx);
    pin_mut!(s);

    seed_tx.unbounded_send(None).unwrap();
    assert_eq!(s.next().await.as_deref(), Some("sat"));

    tog_tx.unbounded_send(1).unwrap();
    assert_eq!(s.next().await.as_deref(), Some("bits"));

    tog_tx.unbounded_send(1).unwrap();
    assert_eq!(s.next().await.as_deref(), Some("milli"));
}

/// Advancing `units.len()` times is a complete cycle back to the start.
#[tokio::test]
async fn unit_cycle_is_a_total_bijection() {
    let list = units();
    let (seed_tx, seed_rx) = mpsc::unbounded();
    let (tog_tx, tog_rx) = mpsc::unbounded();
    let s = setting_cycle(list.clone(), "sat".to_string(), seed_rx, tog_rx);
    pin_mut!(s);

    seed_tx.unbounded_send(Some("btc".to_string())).unwrap();
    assert_eq!(s.next().await.as_deref(), Some("btc"));

    let mut seen = Vec::new();
    for _ in 0..list.len() {
        tog_tx.unbounded_send(1).unwrap();
        seen.push(s.next().await.unwrap());
    }
    assert_eq!(seen.last().map(String::as_str), Some("btc"));

    // every unit was visited exactly once along the way
    let mut sorted = seen.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), list.len());
}

#[tokio::test]
async fn setting_cycle_seeds_from_persisted_value() {
    let (seed_tx, seed_rx) = mpsc::unbounded();
    let (_tog_tx, tog_rx) = mpsc::unbounded::<i64>();
    let s = setting_cycle(units(), "sat".to_string(), seed_rx, tog_rx);
    pin_mut!(s);

    seed_tx.unbounded_send(Some("milli".to_string())).unwrap();
    assert_eq!(s.next().await.as_deref(), Some("milli"));
}

#[tokio::test]
async fn setting_cycle_falls_back_to_index_zero_for_unknown_values() {
    let (seed_tx, seed_rx) = mpsc::unbounded();
    let (_tog_tx, tog_rx) = mpsc::unbounded::<i64>();
    let s = setting_cycle(units(), "sat".to_string(), seed_rx, tog_rx);
    pin_mut!(s);

    seed_tx.unbounded_send(Some("doge".to_string())).unwrap();
    assert_eq!(s.next().await.as_deref(), Some("sat"));
}

// ═══════════════════════════════════════════════════════════════════
// Expert & server
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn expert_mode_seeds_then_flips() {
    let (seed_tx, seed_rx) = mpsc::unbounded();
    let (tog_tx, tog_rx) = mpsc::unbounded();
    let s = expert_mode(seed_rx, tog_rx);
    pin_mut!(s);

    seed_tx.unbounded_send(None).unwrap();
    assert_eq!(s.next().await, Some(false));

    tog_tx.unbounded_send(()).unwrap();
    assert_eq!(s.next().await, Some(true));
    tog_tx.unbounded_send(()).unwrap();
    assert_eq!(s.next().await, Some(false));
}

#[tokio::test]
async fn server_seeds_then_follows_saves() {
    let (seed_tx, seed_rx) = mpsc::unbounded();
    let (save_tx, save_rx) = mpsc::unbounded();
    let s = server(Some("http://localhost:9737".to_string()), seed_rx, save_rx);
    pin_mut!(s);

    // persisted config has no server: the build default applies
    seed_tx.unbounded_send(None).unwrap();
    assert_eq!(s.next().await.unwrap().as_deref(), Some("http://localhost:9737"));

    save_tx
        .unbounded_send(SavedConfig {
            server: Some("https://node.example".to_string()),
            ..SavedConfig::default()
        })
        .unwrap();
    assert_eq!(s.next().await.unwrap().as_deref(), Some("https://node.example"));
}

// ═══════════════════════════════════════════════════════════════════
// Combined config
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn config_emits_once_every_field_is_available() {
    let (server_tx, server_rx) = mpsc::unbounded();
    let (expert_tx, expert_rx) = mpsc::unbounded();
    let (theme_tx, theme_rx) = mpsc::unbounded();
    let (unit_tx, unit_rx) = mpsc::unbounded();
    let s = config(server_rx, expert_rx, theme_rx, unit_rx);
    pin_mut!(s);

    server_tx.unbounded_send(None).unwrap();
    expert_tx.unbounded_send(false).unwrap();
    theme_tx.unbounded_send("yeti".to_string()).unwrap();
    assert!(poll!(s.next()).is_pending(), "unit still missing");

    unit_tx.unbounded_send("sat".to_string()).unwrap();
    let conf = s.next().await.unwrap();
    assert_eq!(conf.server, None);
    assert!(!conf.expert);
    assert_eq!(conf.theme, "yeti");
    assert_eq!(conf.unit, "sat");

    // each later field change re-emits the whole record
    unit_tx.unbounded_send("bits".to_string()).unwrap();
    assert_eq!(s.next().await.unwrap().unit, "bits");
}

// ═══════════════════════════════════════════════════════════════════
// Alerts
// ═══════════════════════════════════════════════════════════════════

#[test]
fn render_alert_substitutes_amounts_with_the_current_formatter() {
    let rendered = render_alert(&AlertKind::Received(123_456), &sat_formatter());
    assert_eq!(rendered.severity, Severity::Success);
    assert_eq!(rendered.message, "Received payment of 123.456 sat");

    let rendered = render_alert(&AlertKind::Error("rpc timeout".to_string()), &sat_formatter());
    assert_eq!(rendered.severity, Severity::Danger);
    assert_eq!(rendered.message, "rpc timeout");
}

fn alert_harness() -> (
    mpsc::UnboundedSender<String>,
    mpsc::UnboundedSender<InvoicePaid>,
    mpsc::UnboundedSender<Payment>,
    mpsc::UnboundedSender<SavedConfig>,
    mpsc::UnboundedSender<()>,
    mpsc::UnboundedSender<UnitFormatter>,
    futures::stream::BoxStream<'static, Option<ln_wallet_core::models::alert::Alert>>,
) {
    let (err_tx, err_rx) = mpsc::unbounded();
    let (in_tx, in_rx) = mpsc::unbounded();
    let (out_tx, out_rx) = mpsc::unbounded();
    let (save_tx, save_rx) = mpsc::unbounded();
    let (dismiss_tx, dismiss_rx) = mpsc::unbounded();
    let (fmt_tx, fmt_rx) = mpsc::unbounded();
    let events = alert_events(err_rx, in_rx, out_rx, save_rx, dismiss_rx);
    let s = alerts(events, fmt_rx).boxed();
    (err_tx, in_tx, out_tx, save_tx, dismiss_tx, fmt_tx, s)
}

#[tokio::test]
async fn alerts_wait_for_the_formatter_then_render_live() {
    let (err_tx, in_tx, _out_tx, _save_tx, dismiss_tx, fmt_tx, s) = alert_harness();
    pin_mut!(s);

    err_tx.unbounded_send("rpc timeout".to_string()).unwrap();
    assert!(poll!(s.next()).is_pending(), "no formatter yet");

    fmt_tx.unbounded_send(sat_formatter()).unwrap();
    let alert = s.next().await.unwrap().unwrap();
    assert_eq!(alert.severity, Severity::Danger);

    in_tx.unbounded_send(paid_event(123_456)).unwrap();
    let alert = s.next().await.unwrap().unwrap();
    assert_eq!(alert.message, "Received payment of 123.456 sat");

    dismiss_tx.unbounded_send(()).unwrap();
    assert_eq!(s.next().await, Some(None));
}

/// The amount placeholder is resolved with the formatter active at
/// emission time: a unit switch re-renders the alert that is showing.
#[tokio::test]
async fn alerts_rerender_under_a_new_formatter() {
    let (_err_tx, in_tx, _out_tx, _save_tx, _dismiss_tx, fmt_tx, s) = alert_harness();
    pin_mut!(s);

    fmt_tx.unbounded_send(sat_formatter()).unwrap();
    in_tx.unbounded_send(paid_event(123_456)).unwrap();
    let alert = s.next().await.unwrap().unwrap();
    assert_eq!(alert.message, "Received payment of 123.456 sat");

    fmt_tx.unbounded_send(bits_formatter()).unwrap();
    let alert = s.next().await.unwrap().unwrap();
    assert_eq!(alert.message, "Received payment of 1.23456 bits");
}

#[tokio::test]
async fn alerts_report_sent_payments() {
    let (_err_tx, _in_tx, out_tx, _save_tx, _dismiss_tx, fmt_tx, s) = alert_harness();
    pin_mut!(s);

    fmt_tx.unbounded_send(sat_formatter()).unwrap();
    out_tx.unbounded_send(sent_payment(50_000)).unwrap();
    let alert = s.next().await.unwrap().unwrap();
    assert_eq!(alert.severity, Severity::Success);
    assert_eq!(alert.message, "Sent payment of 50 sat");
}

#[tokio::test(start_paused = true)]
async fn settings_saved_confirmation_arrives_after_the_delay() {
    let (_err_tx, _in_tx, _out_tx, save_tx, _dismiss_tx, fmt_tx, s) = alert_harness();
    pin_mut!(s);

    fmt_tx.unbounded_send(sat_formatter()).unwrap();
    save_tx.unbounded_send(SavedConfig::default()).unwrap();

    let alert = s.next().await.unwrap().unwrap();
    assert_eq!(alert.severity, Severity::Success);
    assert_eq!(alert.message, "Settings saved successfully");
}

#[tokio::test(start_paused = true)]
async fn rapid_saves_collapse_into_one_confirmation() {
    let (_err_tx, _in_tx, _out_tx, save_tx, _dismiss_tx, fmt_tx, s) = alert_harness();
    pin_mut!(s);

    fmt_tx.unbounded_send(sat_formatter()).unwrap();
    save_tx.unbounded_send(SavedConfig::default()).unwrap();
    save_tx.unbounded_send(SavedConfig::default()).unwrap();

    let alert = s.next().await.unwrap().unwrap();
    assert_eq!(alert.message, "Settings saved successfully");
    assert!(poll!(s.next()).is_pending(), "the first save was superseded");
}
