use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Placeholder shown for feed-priced units while no rate has arrived.
pub const RATE_PENDING: &str = "⌛";

/// Snapshot of the active display unit and its effective rate.
///
/// Rebuilt whenever the unit or the rate changes, so anything formatted
/// through it always reflects the current selection — amounts are never
/// cached under a stale rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFormatter {
    pub unit: String,

    /// Display units per millisatoshi. `None` while the live rate for a
    /// feed-priced unit has not arrived yet.
    pub rate: Option<Decimal>,

    /// Display precision: amounts are rounded to this step's decimals.
    pub step: Decimal,
}

impl UnitFormatter {
    /// Render an msat amount with the unit suffix, e.g. `"123.456 sat"`.
    /// Falls back to a pending placeholder while the rate is unknown.
    pub fn format(&self, msat: u64) -> String {
        match self.rate {
            Some(rate) => format!("{} {}", render_amount(msat, rate, self.step), self.unit),
            None => format!("{RATE_PENDING} {}", self.unit),
        }
    }

    /// Render the number alone, for form fields. Empty while the rate is
    /// unknown.
    pub fn format_bare(&self, msat: u64) -> String {
        match self.rate {
            Some(rate) => render_amount(msat, rate, self.step),
            None => String::new(),
        }
    }

    /// Parse a display-unit amount back into msat, truncating to whole
    /// millisatoshi.
    pub fn parse(&self, display: &str) -> Result<u64, CoreError> {
        let rate = self
            .rate
            .ok_or_else(|| CoreError::RateUnavailable(self.unit.clone()))?;
        parse_amount(display, rate)
    }
}

/// Form state of the shared payment-amount field, used both for creating
/// invoices and for paying custom amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFields {
    /// Parsed amount in msat, when the form holds a valid amount.
    pub msatoshi: Option<u64>,

    /// Display-unit rendition of the amount; empty when cleared.
    pub amount: String,

    pub unit: String,

    /// HTML number-input step for the unit.
    pub step: Decimal,
}

/// `msat * rate`, rounded (half away from zero) to the step's decimals,
/// with trailing zeros dropped.
pub fn render_amount(msat: u64, rate: Decimal, step: Decimal) -> String {
    let amount = Decimal::from(msat) * rate;
    amount
        .round_dp_with_strategy(step.scale(), RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// `display / rate`, truncated to zero decimals. Decimal arithmetic all
/// the way down; floats would drift at satoshi precision.
pub fn parse_amount(display: &str, rate: Decimal) -> Result<u64, CoreError> {
    let trimmed = display.trim();
    let amount: Decimal = trimmed
        .parse()
        .map_err(|_| CoreError::AmountParse(trimmed.to_string()))?;
    if rate <= Decimal::ZERO {
        return Err(CoreError::RateUnavailable(rate.to_string()));
    }
    (amount / rate)
        .trunc()
        .to_u64()
        .ok_or_else(|| CoreError::AmountRange(trimmed.to_string()))
}
