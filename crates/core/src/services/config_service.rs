use futures::future;
use futures::stream::{self, Stream, StreamExt};

use crate::models::config::{Config, SavedConfig};
use crate::stream::fold_first;

/// Seed-then-advance over a cyclic option list.
///
/// The persisted value (or the default, when absent or unknown) picks
/// the starting index; each toggle advances the index by its increment,
/// wrapping around, and the named value is emitted. Advancing once per
/// list entry is a full cycle back to the start. The list must not be
/// empty.
pub fn setting_cycle(
    list: Vec<String>,
    default_value: String,
    seed: impl Stream<Item = Option<String>>,
    toggles: impl Stream<Item = i64>,
) -> impl Stream<Item = String> {
    let len = list.len() as i64;
    let names = list.clone();
    let start = seed.take(1).map(move |value| {
        let name = value.unwrap_or_else(|| default_value.clone());
        list.iter().position(|entry| *entry == name).unwrap_or(0) as i64
    });
    fold_first(start.chain(toggles), move |index, step| {
        (index + step).rem_euclid(len)
    })
    .map(move |index| names[index as usize].clone())
}

/// Boolean setting: seeded once from persisted config, flipped on every
/// toggle for the rest of the stream's life.
pub fn expert_mode(
    seed: impl Stream<Item = Option<bool>>,
    toggles: impl Stream<Item = ()>,
) -> impl Stream<Item = bool> {
    let start = seed.take(1).map(|value| value.unwrap_or(false));
    fold_first(start.chain(toggles.map(|_| true)), |current, _| !current)
}

/// Server address: persisted value or the build default, then overridden
/// by every save-settings event. Never re-read from persistence.
pub fn server(
    default_server: Option<String>,
    seed: impl Stream<Item = Option<String>>,
    save_conf: impl Stream<Item = SavedConfig>,
) -> impl Stream<Item = Option<String>> {
    let start = seed
        .take(1)
        .map(move |value| value.or_else(|| default_server.clone()));
    start.chain(save_conf.map(|conf| conf.server))
}

enum ConfigUpdate {
    Server(Option<String>),
    Expert(bool),
    Theme(String),
    Unit(String),
}

#[derive(Default)]
struct PartialConfig {
    server: Option<Option<String>>,
    expert: Option<bool>,
    theme: Option<String>,
    unit: Option<String>,
}

impl PartialConfig {
    fn complete(&self) -> Option<Config> {
        Some(Config {
            server: self.server.clone()?,
            expert: self.expert?,
            theme: self.theme.clone()?,
            unit: self.unit.clone()?,
        })
    }
}

/// Combined configuration, emitted on every field change once all four
/// fields have produced a value.
pub fn config(
    server: impl Stream<Item = Option<String>>,
    expert: impl Stream<Item = bool>,
    theme: impl Stream<Item = String>,
    unit: impl Stream<Item = String>,
) -> impl Stream<Item = Config> {
    let updates = stream::select(
        stream::select(
            server.map(ConfigUpdate::Server),
            expert.map(ConfigUpdate::Expert),
        ),
        stream::select(
            theme.map(ConfigUpdate::Theme),
            unit.map(ConfigUpdate::Unit),
        ),
    );
    updates
        .scan(PartialConfig::default(), |partial, update| {
            match update {
                ConfigUpdate::Server(v) => partial.server = Some(v),
                ConfigUpdate::Expert(v) => partial.expert = Some(v),
                ConfigUpdate::Theme(v) => partial.theme = Some(v),
                ConfigUpdate::Unit(v) => partial.unit = Some(v),
            }
            future::ready(Some(partial.complete()))
        })
        .filter_map(future::ready)
}
