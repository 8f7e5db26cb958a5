use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One confirmed on-chain output owned by the node's wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundsOutput {
    /// Output value in satoshi.
    pub value: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Snapshot of the node's on-chain funds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Funds {
    #[serde(default)]
    pub outputs: Vec<FundsOutput>,
}
