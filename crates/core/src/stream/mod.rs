pub mod ops;
pub mod share;

pub use ops::{
    combine_latest, distinct_until_changed, fold_first, start_with, switch_latest,
    with_latest_from,
};
pub use share::{share_latest, Fanout};
