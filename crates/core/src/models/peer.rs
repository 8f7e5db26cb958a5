use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state of a channel. Only fully established channels count
/// toward the spendable balance; every other state (opening, closing,
/// onchain) is lumped together and never re-serialized verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelState {
    Normal,
    Other,
}

impl From<String> for ChannelState {
    fn from(state: String) -> Self {
        if state == "CHANNELD_NORMAL" {
            ChannelState::Normal
        } else {
            ChannelState::Other
        }
    }
}

impl From<ChannelState> for String {
    fn from(state: ChannelState) -> Self {
        match state {
            ChannelState::Normal => "CHANNELD_NORMAL".to_string(),
            ChannelState::Other => "OTHER".to_string(),
        }
    }
}

/// A single channel with a peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub state: ChannelState,

    /// Our side of the channel balance, in msat.
    pub msatoshi_to_us: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A connected or known peer and its channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub id: String,

    #[serde(default)]
    pub connected: bool,

    /// Absent for peers without any channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<Channel>>,
}
