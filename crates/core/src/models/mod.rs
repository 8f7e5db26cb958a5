pub mod alert;
pub mod config;
pub mod feed;
pub mod funds;
pub mod invoice;
pub mod node;
pub mod payment;
pub mod peer;
pub mod rpc;
pub mod state;
pub mod unit;

use serde::de::DeserializeOwned;

use crate::errors::CoreError;

/// Decode a raw RPC payload into a typed record.
///
/// Validation happens here, at the boundary: once a record is inside the
/// model it is treated as well-formed. Unknown fields land in the
/// record's `extra` map rather than failing.
pub fn record_from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, CoreError> {
    Ok(serde_json::from_value(value)?)
}
