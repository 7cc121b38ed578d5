//! Typed builders for the three option dictionaries.
//!
//! Each builder only records what the caller sets; defaults are applied by
//! the collaborator that reads the resulting [`Options`].

use std::fmt;
use std::str::FromStr;

use automl_spi::{AutoMLError, Options};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option keys understood by the built-in search engine.
pub mod engine_keys {
    pub const TIME_LEFT_FOR_THIS_TASK: &str = "time_left_for_this_task";
    pub const PER_RUN_TIME_LIMIT: &str = "per_run_time_limit";
    pub const MEMORY_LIMIT: &str = "memory_limit";
    pub const SEED: &str = "seed";
    pub const ENSEMBLE_SIZE: &str = "ensemble_size";
    pub const ENSEMBLE_NBEST: &str = "ensemble_nbest";
    pub const MAX_CANDIDATES: &str = "max_candidates";
    pub const HOLDOUT_FRACTION: &str = "holdout_fraction";
    pub const TASK: &str = "task";

    pub const ALL: [&str; 9] = [
        TIME_LEFT_FOR_THIS_TASK,
        PER_RUN_TIME_LIMIT,
        MEMORY_LIMIT,
        SEED,
        ENSEMBLE_SIZE,
        ENSEMBLE_NBEST,
        MAX_CANDIDATES,
        HOLDOUT_FRACTION,
        TASK,
    ];
}

/// Option keys understood by the built-in splitter.
pub mod split_keys {
    pub const TEST_SIZE: &str = "test_size";
    pub const TRAIN_SIZE: &str = "train_size";
    pub const SHUFFLE: &str = "shuffle";
    pub const RANDOM_STATE: &str = "random_state";
    pub const STRATIFY: &str = "stratify";

    pub const ALL: [&str; 5] = [TEST_SIZE, TRAIN_SIZE, SHUFFLE, RANDOM_STATE, STRATIFY];
}

/// Fit-time option keys understood by the built-in search engine.
pub mod fit_keys {
    pub const DATASET_NAME: &str = "dataset_name";

    pub const ALL: [&str; 1] = [DATASET_NAME];
}

/// Engine defaults.
pub const DEFAULT_TIME_LEFT_SECS: u64 = 3600;
pub const DEFAULT_MEMORY_LIMIT_MB: u64 = 3072;
pub const DEFAULT_SEED: u64 = 1;
pub const DEFAULT_ENSEMBLE_SIZE: usize = 50;
pub const DEFAULT_ENSEMBLE_NBEST: usize = 50;
pub const DEFAULT_MAX_CANDIDATES: usize = 64;
pub const DEFAULT_HOLDOUT_FRACTION: f64 = 0.33;

/// Splitter defaults.
pub const DEFAULT_TEST_SIZE: f64 = 0.25;

/// Learning task the engine searches models for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    #[default]
    Classification,
    Regression,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Classification => "classification",
            Task::Regression => "regression",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = AutoMLError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classification" => Ok(Task::Classification),
            "regression" => Ok(Task::Regression),
            other => Err(AutoMLError::InvalidParameter {
                name: engine_keys::TASK.to_string(),
                reason: format!(
                    "unknown task '{}', expected classification or regression",
                    other
                ),
            }),
        }
    }
}

/// Engine construction options (time and memory budgets, search tuning).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    options: Options,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total search budget in seconds.
    pub fn time_left_for_this_task(mut self, secs: u64) -> Self {
        self.options.insert(engine_keys::TIME_LEFT_FOR_THIS_TASK, secs);
        self
    }

    /// Budget for a single candidate in seconds.
    pub fn per_run_time_limit(mut self, secs: u64) -> Self {
        self.options.insert(engine_keys::PER_RUN_TIME_LIMIT, secs);
        self
    }

    /// Memory ceiling in megabytes; `None` removes the limit.
    pub fn memory_limit(mut self, megabytes: Option<u64>) -> Self {
        let value = megabytes.map_or(Value::Null, Value::from);
        self.options.insert(engine_keys::MEMORY_LIMIT, value);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.options.insert(engine_keys::SEED, seed);
        self
    }

    /// Number of greedy selection rounds when building the ensemble.
    pub fn ensemble_size(mut self, size: usize) -> Self {
        self.options.insert(engine_keys::ENSEMBLE_SIZE, size as u64);
        self
    }

    /// Only the `n` best candidates are eligible for the ensemble.
    pub fn ensemble_nbest(mut self, n: usize) -> Self {
        self.options.insert(engine_keys::ENSEMBLE_NBEST, n as u64);
        self
    }

    pub fn max_candidates(mut self, n: usize) -> Self {
        self.options.insert(engine_keys::MAX_CANDIDATES, n as u64);
        self
    }

    /// Fraction of the engine's training rows held out for validation.
    pub fn holdout_fraction(mut self, fraction: f64) -> Self {
        self.options.insert(engine_keys::HOLDOUT_FRACTION, fraction);
        self
    }

    pub fn task(mut self, task: Task) -> Self {
        self.options.insert(engine_keys::TASK, task.as_str());
        self
    }

    /// Any other engine-specific key, forwarded as is.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}

impl From<EngineConfig> for Options {
    fn from(config: EngineConfig) -> Self {
        config.build()
    }
}

/// Train / holdout split options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    options: Options,
}

impl SplitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holdout size as a fraction in (0, 1) of the rows.
    pub fn test_size(mut self, size: f64) -> Self {
        self.options.insert(split_keys::TEST_SIZE, size);
        self
    }

    /// Holdout size as an absolute row count.
    pub fn test_rows(mut self, rows: u64) -> Self {
        self.options.insert(split_keys::TEST_SIZE, rows);
        self
    }

    pub fn train_size(mut self, size: f64) -> Self {
        self.options.insert(split_keys::TRAIN_SIZE, size);
        self
    }

    pub fn train_rows(mut self, rows: u64) -> Self {
        self.options.insert(split_keys::TRAIN_SIZE, rows);
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.options.insert(split_keys::SHUFFLE, shuffle);
        self
    }

    pub fn random_state(mut self, seed: u64) -> Self {
        self.options.insert(split_keys::RANDOM_STATE, seed);
        self
    }

    /// Keep class proportions equal in both partitions.
    pub fn stratify(mut self, stratify: bool) -> Self {
        self.options.insert(split_keys::STRATIFY, stratify);
        self
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}

impl From<SplitConfig> for Options {
    fn from(config: SplitConfig) -> Self {
        config.build()
    }
}

/// Engine fit-time options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    options: Options,
}

impl FitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset_name(mut self, name: impl Into<String>) -> Self {
        self.options.insert(fit_keys::DATASET_NAME, name.into());
        self
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}

impl From<FitConfig> for Options {
    fn from(config: FitConfig) -> Self {
        config.build()
    }
}
