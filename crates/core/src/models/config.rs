use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Combined user configuration as exposed on the application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub server: Option<String>,
    pub expert: bool,
    pub theme: String,
    pub unit: String,
}

/// Persisted configuration, read once at startup by the hosting layer.
/// Every field is optional; absent fields fall back to the defaults in
/// [`Tables`]. Also the payload of a save-settings event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Immutable option tables the model is constructed with.
///
/// Cyclic settings advance through these lists by index; rates and steps
/// drive amount conversion and display precision. No process-wide
/// mutable state — the tables are cloned into whichever node needs them.
#[derive(Debug, Clone)]
pub struct Tables {
    pub themes: Vec<String>,
    pub default_theme: String,

    /// Display units in toggle order.
    pub units: Vec<String>,
    pub default_unit: String,

    /// Fixed display-units-per-msat rate for units pegged to bitcoin.
    /// Units missing here (usd) use the live price feed instead.
    pub unit_rate: HashMap<String, Decimal>,

    /// Form input step per unit, which doubles as display precision.
    pub unit_step: HashMap<String, Decimal>,

    /// Server address used when the persisted configuration has none.
    pub default_server: Option<String>,
}

impl Tables {
    /// Input step for a unit; 1 for units outside the table.
    pub fn step_for(&self, unit: &str) -> Decimal {
        self.unit_step.get(unit).copied().unwrap_or(Decimal::ONE)
    }

    /// Fixed rate for a unit, if it has one.
    pub fn fixed_rate(&self, unit: &str) -> Option<Decimal> {
        self.unit_rate.get(unit).copied()
    }
}

impl Default for Tables {
    fn default() -> Self {
        let themes = "cerulean cosmo cyborg dark darkly flatly journal litera lumen lux \
                      materia minty pulse sandstone simplex sketchy slate solar spacelab \
                      superhero united yeti"
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let units: Vec<String> = ["sat", "bits", "milli", "btc", "usd"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();

        let unit_rate = HashMap::from([
            ("sat".to_string(), dec!(0.001)),
            ("bits".to_string(), dec!(0.00001)),
            ("milli".to_string(), dec!(0.00000001)),
            ("btc".to_string(), dec!(0.00000000001)),
        ]);

        let mut unit_step = unit_rate.clone();
        unit_step.insert("usd".to_string(), dec!(0.00001));

        Self {
            themes,
            default_theme: "yeti".to_string(),
            units,
            default_unit: "sat".to_string(),
            unit_rate,
            unit_step,
            default_server: None,
        }
    }
}
