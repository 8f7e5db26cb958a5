pub mod errors;
pub mod models;
pub mod services;
pub mod stream;

use futures::stream::{BoxStream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use models::config::{SavedConfig, Tables};
use models::funds::Funds;
use models::invoice::{Invoice, InvoicePaid};
use models::node::NodeInfo;
use models::payment::Payment;
use models::peer::Peer;
use models::rpc::{RpcCall, RpcEntry, RpcRequest};
use models::state::{AppState, StateUpdate};
use services::{
    alert_service, balance_service, config_service, console_service, feed_service,
    ledger_service, unit_service,
};
use stream::{share_latest, Fanout};

/// Event source injected by the hosting layer.
pub type InputStream<T> = BoxStream<'static, T>;

/// Every external event source the model consumes, one stream per
/// source. The hosting layer owns transport and persistence; it pushes
/// decoded events in and reads derived state out — nothing in here does
/// I/O of its own.
pub struct ModelInputs {
    // ── User interaction ────────────────────────────────────────────
    pub dismiss: InputStream<()>,
    pub save_conf: InputStream<SavedConfig>,
    pub toggle_expert: InputStream<()>,
    /// Toggle increments; the theme advances by this amount, wrapping.
    pub toggle_theme: InputStream<i64>,
    pub toggle_unit: InputStream<i64>,
    pub page: InputStream<String>,
    pub go_receive: InputStream<()>,
    pub amount_input: InputStream<String>,
    pub execute_rpc: InputStream<RpcRequest>,
    pub rpc_result: InputStream<RpcEntry>,
    pub clear_history: InputStream<()>,
    pub feed_start: InputStream<u64>,

    // ── Environment ─────────────────────────────────────────────────
    /// Persisted configuration; read once, never re-read afterwards.
    pub saved_config: InputStream<SavedConfig>,
    /// Every RPC round trip, for the loading indicator.
    pub requests: InputStream<RpcCall>,
    pub error: InputStream<String>,

    // ── Node events & resync snapshots ──────────────────────────────
    pub invoice: InputStream<Invoice>,
    pub incoming: InputStream<InvoicePaid>,
    pub outgoing: InputStream<Payment>,
    pub funds: InputStream<Funds>,
    pub payments: InputStream<Vec<Payment>>,
    pub invoices: InputStream<Vec<Invoice>>,
    pub btcusd: InputStream<f64>,
    pub node_info: InputStream<NodeInfo>,
    pub peers: InputStream<Vec<Peer>>,
}

/// Handle to the shared application-state stream.
///
/// One producer, replay 1: every clone and every subscriber observes the
/// most recent state immediately and live updates afterwards.
#[derive(Debug, Clone)]
pub struct StateHandle {
    rx: watch::Receiver<AppState>,
}

impl StateHandle {
    /// The latest state right now.
    #[must_use]
    pub fn current(&self) -> AppState {
        self.rx.borrow().clone()
    }

    /// Live state stream: the latest value immediately, then every
    /// change. Slow consumers observe the newest state rather than every
    /// intermediate one.
    #[must_use]
    pub fn subscribe(&self) -> WatchStream<AppState> {
        WatchStream::new(self.rx.clone())
    }

    /// Wait until the state satisfies `pred` and return it. If the model
    /// stops first, the final state is returned regardless.
    pub async fn wait_for<F>(&mut self, mut pred: F) -> AppState
    where
        F: FnMut(&AppState) -> bool,
    {
        loop {
            {
                let state = self.rx.borrow_and_update();
                if pred(&state) {
                    return state.clone();
                }
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}

/// The derived-state composition engine.
///
/// Holds the immutable option tables and, on [`spawn`](Self::spawn),
/// wires every derived node between the injected inputs and the shared
/// application-state output.
#[derive(Debug, Clone)]
pub struct WalletModel {
    tables: Tables,
}

impl WalletModel {
    pub fn new(tables: Tables) -> Self {
        Self { tables }
    }

    /// Build the reactive graph and start its driver tasks. Must be
    /// called within a tokio runtime.
    ///
    /// Inputs consumed by several nodes are fanned out so every node
    /// sees every value; all other streams flow straight through their
    /// node chain. The combined state is published through a
    /// replay-1 watch channel — the only shared subscription in the
    /// system.
    pub fn spawn(self, inputs: ModelInputs) -> StateHandle {
        let tables = self.tables;
        let ModelInputs {
            dismiss,
            save_conf,
            toggle_expert,
            toggle_theme,
            toggle_unit,
            page,
            go_receive,
            amount_input,
            execute_rpc,
            rpc_result,
            clear_history,
            feed_start,
            saved_config,
            requests,
            error,
            invoice,
            incoming,
            outgoing,
            funds,
            payments,
            invoices,
            btcusd,
            node_info,
            peers,
        } = inputs;

        // Dispatch of console requests belongs to the hosting layer;
        // the model only logs them alongside their results.
        let mut execute_rpc = execute_rpc;
        tokio::spawn(async move {
            while let Some(req) = execute_rpc.next().await {
                tracing::debug!(target: "wallet::console", method = %req.method, "rpc dispatched");
            }
        });

        // ── Input fan-out ───────────────────────────────────────────
        let mut incoming = Fanout::new(incoming);
        let incoming_ledger = incoming.subscribe();
        let incoming_balance = incoming.subscribe();
        let incoming_alerts = incoming.subscribe();
        incoming.spawn();

        let mut outgoing = Fanout::new(outgoing);
        let outgoing_ledger = outgoing.subscribe();
        let outgoing_balance = outgoing.subscribe();
        let outgoing_alerts = outgoing.subscribe();
        outgoing.spawn();

        let mut save_conf = Fanout::new(save_conf);
        let save_conf_server = save_conf.subscribe();
        let save_conf_alerts = save_conf.subscribe();
        save_conf.spawn();

        let mut page = Fanout::new(page);
        let page_amount = page.subscribe();
        let page_state = page.subscribe();
        page.spawn();

        let mut btcusd = Fanout::new(btcusd);
        let btcusd_rate = btcusd.subscribe();
        let btcusd_state = btcusd.subscribe();
        btcusd.spawn();

        let mut peers = Fanout::new(peers);
        let peers_balance = peers.subscribe();
        let peers_state = peers.subscribe();
        peers.spawn();

        let mut funds = Fanout::new(funds);
        let funds_balance = funds.subscribe();
        let funds_state = funds.subscribe();
        funds.spawn();

        let mut saved_config = Fanout::new(saved_config);
        let saved_server = saved_config.subscribe();
        let saved_expert = saved_config.subscribe();
        let saved_theme = saved_config.subscribe();
        let saved_unit = saved_config.subscribe();
        saved_config.spawn();

        // ── Configuration ───────────────────────────────────────────
        let server = config_service::server(
            tables.default_server.clone(),
            saved_server.map(|conf| conf.server),
            save_conf_server,
        );
        let expert = config_service::expert_mode(
            saved_expert.map(|conf| conf.expert),
            toggle_expert,
        );
        let theme = config_service::setting_cycle(
            tables.themes.clone(),
            tables.default_theme.clone(),
            saved_theme.map(|conf| conf.theme),
            toggle_theme,
        );
        let unit = config_service::setting_cycle(
            tables.units.clone(),
            tables.default_unit.clone(),
            saved_unit.map(|conf| conf.unit),
            toggle_unit,
        );

        let mut unit = Fanout::new(unit);
        let unit_config = unit.subscribe();
        let unit_formatter = unit.subscribe();
        let unit_amount = unit.subscribe();
        unit.spawn();

        let config = config_service::config(server, expert, theme, unit_config)
            .inspect(|conf| tracing::debug!(target: "wallet::config", ?conf, "config updated"));

        // ── Unit conversion ─────────────────────────────────────────
        let mut msat_usd = Fanout::new(unit_service::msat_usd(btcusd_rate));
        let msat_usd_formatter = msat_usd.subscribe();
        let msat_usd_amount = msat_usd.subscribe();
        msat_usd.spawn();

        let mut formatter = Fanout::new(unit_service::unit_formatter(
            tables.clone(),
            unit_formatter,
            msat_usd_formatter,
        ));
        let formatter_alerts = formatter.subscribe();
        let formatter_state = formatter.subscribe();
        formatter.spawn();

        let amount = unit_service::amount_fields(
            tables.clone(),
            amount_input,
            page_amount,
            go_receive,
            unit_amount,
            msat_usd_amount,
        );

        // ── Ledgers & aggregates ────────────────────────────────────
        let mut fresh_payments =
            Fanout::new(ledger_service::fresh_payments(payments, outgoing_ledger));
        let payments_feed = fresh_payments.subscribe();
        let payments_state = fresh_payments.subscribe();
        fresh_payments.spawn();

        let mut fresh_invoices = Fanout::new(ledger_service::fresh_invoices(
            invoices,
            invoice,
            incoming_ledger,
        ));
        let invoices_feed = fresh_invoices.subscribe();
        let invoices_state = fresh_invoices.subscribe();
        fresh_invoices.spawn();

        let feed = feed_service::feed(invoices_feed, payments_feed);
        let channel_balance =
            balance_service::channel_balance(peers_balance, incoming_balance, outgoing_balance);
        let onchain_balance = balance_service::onchain_balance(funds_balance);

        // ── Console ─────────────────────────────────────────────────
        let loading = console_service::loading(requests)
            .inspect(|count| tracing::debug!(target: "wallet::model", in_flight = *count, "loading"));
        let rpc_history = console_service::rpc_history(rpc_result, clear_history);

        // ── Alerts ──────────────────────────────────────────────────
        let error = error
            .inspect(|err| tracing::debug!(target: "wallet::error", %err, "error event"));
        let alert_events = alert_service::alert_events(
            error,
            incoming_alerts,
            outgoing_alerts,
            save_conf_alerts,
            dismiss,
        );
        let alerts = alert_service::alerts(alert_events, formatter_alerts)
            .inspect(|alert| tracing::debug!(target: "wallet::model", ?alert, "alert"));

        // ── Combined state ──────────────────────────────────────────
        let updates: Vec<BoxStream<'static, StateUpdate>> = vec![
            config.map(StateUpdate::Config).boxed(),
            page_state.map(StateUpdate::Page).boxed(),
            loading.map(StateUpdate::Loading).boxed(),
            alerts.map(StateUpdate::Alert).boxed(),
            node_info.map(StateUpdate::NodeInfo).boxed(),
            peers_state.map(StateUpdate::Peers).boxed(),
            funds_state.map(StateUpdate::Funds).boxed(),
            btcusd_state.map(StateUpdate::BtcUsd).boxed(),
            formatter_state.map(StateUpdate::UnitFormat).boxed(),
            channel_balance.map(StateUpdate::ChannelBalance).boxed(),
            onchain_balance.map(StateUpdate::OnchainBalance).boxed(),
            feed.map(StateUpdate::Feed).boxed(),
            feed_start.map(StateUpdate::FeedStart).boxed(),
            amount.map(StateUpdate::Amount).boxed(),
            rpc_history.map(StateUpdate::RpcHistory).boxed(),
        ];

        let state = futures::stream::select_all(updates).scan(
            AppState::default(),
            |state, update| {
                state.apply(update);
                futures::future::ready(Some(state.clone()))
            },
        );

        StateHandle {
            rx: share_latest(AppState::default(), state),
        }
    }
}

impl Default for WalletModel {
    fn default() -> Self {
        Self::new(Tables::default())
    }
}
