use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A console RPC command as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,

    #[serde(default)]
    pub params: Vec<Value>,
}

/// One executed console command with its outcome. The history ring keeps
/// the most recent entries, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RpcRequest>,

    pub result: Value,
}

/// An in-flight RPC round trip as seen by the loading tracker.
///
/// The response stream yields the call's terminal outcome and then ends;
/// a failed call is an `Err` item, never a stream panic, so one bad call
/// cannot take down the tracker.
pub struct RpcCall {
    /// Background calls (periodic pollers) do not count toward the
    /// user-visible loading indicator.
    pub background: bool,

    pub responses: BoxStream<'static, Result<Value, String>>,
}

impl std::fmt::Debug for RpcCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcCall")
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}
