use super::alert::Alert;
use super::config::Config;
use super::feed::FeedEntry;
use super::funds::Funds;
use super::node::NodeInfo;
use super::peer::Peer;
use super::rpc::RpcEntry;
use super::unit::{AmountFields, UnitFormatter};

/// The combined application state, one field per derived node.
///
/// Every field is `None` until its upstream source has produced at least
/// one value; consumers must handle partial availability. `alert` stays
/// `None` both before the first alert and after a dismissal, and
/// `channel_balance` stays `None` until the first snapshot or patch —
/// "not yet known" and "currently nothing" render the same.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub config: Option<Config>,
    pub page: Option<String>,
    pub loading: Option<i64>,
    pub alert: Option<Alert>,
    pub node_info: Option<NodeInfo>,
    pub peers: Option<Vec<Peer>>,
    pub funds: Option<Funds>,
    pub btcusd: Option<f64>,
    pub unit_format: Option<UnitFormatter>,
    pub channel_balance: Option<i64>,
    pub onchain_balance: Option<u64>,
    pub feed: Option<Vec<FeedEntry>>,
    pub feed_start: Option<u64>,
    pub amount_fields: Option<AmountFields>,
    pub rpc_history: Option<Vec<RpcEntry>>,
}

/// One field refresh emitted by a derived node, folded into [`AppState`].
#[derive(Debug, Clone)]
pub enum StateUpdate {
    Config(Config),
    Page(String),
    Loading(i64),
    Alert(Option<Alert>),
    NodeInfo(NodeInfo),
    Peers(Vec<Peer>),
    Funds(Funds),
    BtcUsd(f64),
    UnitFormat(UnitFormatter),
    ChannelBalance(Option<i64>),
    OnchainBalance(u64),
    Feed(Vec<FeedEntry>),
    FeedStart(u64),
    Amount(AmountFields),
    RpcHistory(Vec<RpcEntry>),
}

impl AppState {
    /// Fold one node emission into the combined state.
    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::Config(v) => self.config = Some(v),
            StateUpdate::Page(v) => self.page = Some(v),
            StateUpdate::Loading(v) => self.loading = Some(v),
            StateUpdate::Alert(v) => self.alert = v,
            StateUpdate::NodeInfo(v) => self.node_info = Some(v),
            StateUpdate::Peers(v) => self.peers = Some(v),
            StateUpdate::Funds(v) => self.funds = Some(v),
            StateUpdate::BtcUsd(v) => self.btcusd = Some(v),
            StateUpdate::UnitFormat(v) => self.unit_format = Some(v),
            StateUpdate::ChannelBalance(v) => self.channel_balance = v,
            StateUpdate::OnchainBalance(v) => self.onchain_balance = Some(v),
            StateUpdate::Feed(v) => self.feed = Some(v),
            StateUpdate::FeedStart(v) => self.feed_start = Some(v),
            StateUpdate::Amount(v) => self.amount_fields = Some(v),
            StateUpdate::RpcHistory(v) => self.rpc_history = Some(v),
        }
    }
}
