use thiserror::Error;

/// Unified error type for the wallet core library.
///
/// Deliberately small: the derived-state engine treats bad data as
/// ordinary values and per-request failures as stream items, so errors
/// only surface at the conversion and decoding boundaries.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Amounts & conversion ────────────────────────────────────────
    #[error("Invalid amount '{0}': not a decimal number")]
    AmountParse(String),

    #[error("Amount '{0}' is out of range for millisatoshi")]
    AmountRange(String),

    #[error("No conversion rate available for '{0}'")]
    RateUnavailable(String),

    // ── Boundary records ────────────────────────────────────────────
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<rust_decimal::Error> for CoreError {
    fn from(e: rust_decimal::Error) -> Self {
        CoreError::AmountParse(e.to_string())
    }
}
