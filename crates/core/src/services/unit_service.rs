use futures::future;
use futures::stream::{self, Stream, StreamExt};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::config::Tables;
use crate::models::unit::{parse_amount, render_amount, AmountFields, UnitFormatter};
use crate::stream::{combine_latest, start_with};

const MSAT_PER_BTC: Decimal = dec!(100000000000);

/// USD per millisatoshi, derived from the BTC/USD price feed. Starts as
/// pending (`None`) until the feed delivers a usable price.
pub fn msat_usd(btcusd: impl Stream<Item = f64>) -> impl Stream<Item = Option<Decimal>> {
    start_with(
        None,
        btcusd.filter_map(|price| {
            let converted = Decimal::from_f64(price);
            if converted.is_none() {
                tracing::warn!(target: "wallet::model", price, "unusable btcusd rate");
            }
            future::ready(converted.map(|rate| Some(rate / MSAT_PER_BTC)))
        }),
    )
}

/// Display-units-per-msat for a unit: the fixed-table entry when the
/// unit is pegged to bitcoin, otherwise the live feed rate.
pub fn effective_rate(tables: &Tables, unit: &str, live: Option<Decimal>) -> Option<Decimal> {
    tables.fixed_rate(unit).or(live)
}

/// The active formatter, rebuilt whenever the selected unit or the live
/// rate changes so formatted amounts always agree with the current
/// selection.
pub fn unit_formatter(
    tables: Tables,
    unit: impl Stream<Item = String>,
    msat_usd: impl Stream<Item = Option<Decimal>>,
) -> impl Stream<Item = UnitFormatter> {
    combine_latest(unit, msat_usd, move |unit, live| UnitFormatter {
        unit: unit.clone(),
        rate: effective_rate(&tables, unit, *live),
        step: tables.step_for(unit),
    })
}

#[derive(Debug, Clone)]
enum AmountEvent {
    Input(String),
    PageChanged,
    EnterReceive,
    Unit(String),
    LiveRate(Option<Decimal>),
}

#[derive(Debug, Default)]
struct AmountState {
    unit: Option<String>,
    live: Option<Decimal>,
    msatoshi: Option<u64>,
    display: String,
}

/// The shared payment-amount form, used for creating invoices and for
/// paying custom amounts.
///
/// The msat value is recomputed from the typed text under the rate in
/// effect at typing time and reset on page changes; the displayed amount
/// is re-rendered only when the unit switches (converting the held msat
/// into the new unit) and cleared on (re)entering the receive view.
/// Nothing is emitted until the unit selection is known; live-rate
/// arrivals update sampling state without emitting.
pub fn amount_fields(
    tables: Tables,
    amount_input: impl Stream<Item = String>,
    page: impl Stream<Item = String>,
    go_receive: impl Stream<Item = ()>,
    unit: impl Stream<Item = String>,
    msat_usd: impl Stream<Item = Option<Decimal>>,
) -> impl Stream<Item = AmountFields> {
    let events = stream::select(
        stream::select(
            amount_input.map(AmountEvent::Input),
            unit.map(AmountEvent::Unit),
        ),
        stream::select(
            stream::select(
                page.map(|_| AmountEvent::PageChanged),
                go_receive.map(|_| AmountEvent::EnterReceive),
            ),
            msat_usd.map(AmountEvent::LiveRate),
        ),
    );
    events
        .scan(AmountState::default(), move |state, event| {
            let silent = matches!(event, AmountEvent::LiveRate(_));
            match event {
                AmountEvent::Input(raw) => {
                    state.msatoshi = state.unit.as_ref().and_then(|unit| {
                        if raw.trim().is_empty() {
                            return None;
                        }
                        let rate = effective_rate(&tables, unit, state.live)?;
                        match parse_amount(&raw, rate) {
                            Ok(msat) => Some(msat),
                            Err(err) => {
                                tracing::debug!(target: "wallet::model", %err, "unparseable amount input");
                                None
                            }
                        }
                    });
                }
                AmountEvent::PageChanged => state.msatoshi = None,
                AmountEvent::EnterReceive => state.display.clear(),
                AmountEvent::Unit(next) => {
                    let rate = effective_rate(&tables, &next, state.live);
                    state.display = match (state.msatoshi, rate) {
                        (Some(msat), Some(rate)) => {
                            render_amount(msat, rate, tables.step_for(&next))
                        }
                        _ => String::new(),
                    };
                    state.unit = Some(next);
                }
                AmountEvent::LiveRate(live) => state.live = live,
            }
            let out = if silent {
                None
            } else {
                state.unit.as_ref().map(|unit| AmountFields {
                    msatoshi: state.msatoshi,
                    amount: state.display.clone(),
                    unit: unit.clone(),
                    step: tables.step_for(unit),
                })
            };
            future::ready(Some(out))
        })
        .filter_map(future::ready)
}
