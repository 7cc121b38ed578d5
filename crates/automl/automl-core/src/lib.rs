//! AutoML Core
//!
//! Core implementations for automatic machine learning:
//! - Metric functions and the metric registry
//! - Train / holdout splitting
//! - The built-in candidate search engine
//! - The [`AutoML`] façade

mod automl;
pub mod engine;
pub mod metrics;
pub mod registry;
mod split;

pub use automl::{AutoML, FitState};
pub use engine::{CandidateSearch, EngineSettings};
pub use registry::MetricEntry;
pub use split::TrainTestSplit;

// Re-export from API for convenience
pub use automl_api::{
    engine_keys, fit_keys, split_keys, AutoMLError, EngineConfig, FitConfig, MetricName, Result,
    SplitConfig, Task,
};

// Re-export SPI contracts and data types
pub use automl_spi::{
    CandidateStatus, Dataset, EngineScorer, EnsembleDescription, EnsembleMember, Labels,
    Leaderboard, LeaderboardEntry, Options, Predictions, SearchEngine, Split, Splitter,
};
