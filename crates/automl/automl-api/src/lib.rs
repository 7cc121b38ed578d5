//! AutoML Consumer API
//!
//! Metric names and configuration builders for AutoML consumers.

mod config;
mod metric;

pub use config::{
    engine_keys, fit_keys, split_keys, EngineConfig, FitConfig, SplitConfig, Task,
    DEFAULT_ENSEMBLE_NBEST, DEFAULT_ENSEMBLE_SIZE, DEFAULT_HOLDOUT_FRACTION,
    DEFAULT_MAX_CANDIDATES, DEFAULT_MEMORY_LIMIT_MB, DEFAULT_SEED, DEFAULT_TEST_SIZE,
    DEFAULT_TIME_LEFT_SECS,
};
pub use metric::MetricName;

// Re-export SPI types
pub use automl_spi::{
    AutoMLError, CandidateStatus, Dataset, EngineScorer, EnsembleDescription, EnsembleMember,
    Labels, Leaderboard, LeaderboardEntry, Options, Predictions, Result, SearchEngine, Split,
    Splitter,
};
