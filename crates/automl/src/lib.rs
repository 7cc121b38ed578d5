//! # automl
//!
//! Automatic model search and ensembling behind a small fit / predict
//! façade. Pick a metric by name, fit on labeled tabular data, and get a
//! holdout score, predictions, a leaderboard and the selected ensemble.

pub use automl_facade::*;
