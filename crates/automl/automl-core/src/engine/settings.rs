//! Engine option parsing

use std::time::Duration;

use automl_api::{
    engine_keys, MetricName, Task, DEFAULT_ENSEMBLE_NBEST, DEFAULT_ENSEMBLE_SIZE,
    DEFAULT_HOLDOUT_FRACTION, DEFAULT_MAX_CANDIDATES, DEFAULT_MEMORY_LIMIT_MB, DEFAULT_SEED,
    DEFAULT_TIME_LEFT_SECS,
};
use automl_spi::{AutoMLError, EngineScorer, Options, Result};
use tracing::debug;

/// Validated engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub time_left: Duration,
    pub per_run_time_limit: Duration,
    /// Recorded for callers; the built-in models run in-process and do not
    /// enforce it.
    pub memory_limit_mb: Option<u64>,
    pub seed: u64,
    pub ensemble_size: usize,
    pub ensemble_nbest: usize,
    pub max_candidates: usize,
    pub holdout_fraction: f64,
    pub task: Task,
}

fn invalid(name: &str, reason: impl Into<String>) -> AutoMLError {
    AutoMLError::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn positive_secs(options: &Options, key: &str) -> Result<Option<Duration>> {
    match options.get_f64(key)? {
        Some(secs) if secs > 0.0 => Duration::try_from_secs_f64(secs)
            .map(Some)
            .map_err(|e| invalid(key, format!("{secs} seconds: {e}"))),
        Some(secs) => Err(invalid(key, format!("must be a positive number of seconds, got {secs}"))),
        None => Ok(None),
    }
}

fn count(options: &Options, key: &str, default: usize, min: usize) -> Result<usize> {
    let value = options
        .get_u64(key)?
        .map_or(default, |v| usize::try_from(v).unwrap_or(usize::MAX));
    if value < min {
        return Err(invalid(key, format!("must be at least {min}, got {value}")));
    }
    Ok(value)
}

impl EngineSettings {
    /// Parse `options` for an engine optimizing `scorer`.
    ///
    /// Without an explicit `task`, metrics from the regression family select
    /// regression and everything else selects classification.
    pub fn from_options(scorer: &EngineScorer, options: &Options) -> Result<Self> {
        for key in options.unknown_keys(&engine_keys::ALL) {
            debug!(key, "ignoring unknown engine option");
        }

        let time_left = positive_secs(options, engine_keys::TIME_LEFT_FOR_THIS_TASK)?
            .unwrap_or(Duration::from_secs(DEFAULT_TIME_LEFT_SECS));
        let per_run_time_limit =
            positive_secs(options, engine_keys::PER_RUN_TIME_LIMIT)?.unwrap_or(time_left / 10);

        let memory_limit_mb = match options.get(engine_keys::MEMORY_LIMIT) {
            None => Some(DEFAULT_MEMORY_LIMIT_MB),
            Some(_) => options.get_u64(engine_keys::MEMORY_LIMIT)?,
        };

        let holdout_fraction = options
            .get_f64(engine_keys::HOLDOUT_FRACTION)?
            .unwrap_or(DEFAULT_HOLDOUT_FRACTION);
        if !(holdout_fraction > 0.0 && holdout_fraction < 1.0) {
            return Err(invalid(
                engine_keys::HOLDOUT_FRACTION,
                format!("must lie in (0, 1), got {holdout_fraction}"),
            ));
        }

        let task = match options.get_str(engine_keys::TASK)? {
            Some(task) => task.parse()?,
            None => match MetricName::parse(scorer.name()) {
                Some(metric) if !metric.is_classification() => Task::Regression,
                _ => Task::Classification,
            },
        };

        Ok(Self {
            time_left,
            per_run_time_limit,
            memory_limit_mb,
            seed: options.get_u64(engine_keys::SEED)?.unwrap_or(DEFAULT_SEED),
            ensemble_size: count(options, engine_keys::ENSEMBLE_SIZE, DEFAULT_ENSEMBLE_SIZE, 0)?,
            ensemble_nbest: count(
                options,
                engine_keys::ENSEMBLE_NBEST,
                DEFAULT_ENSEMBLE_NBEST,
                1,
            )?,
            max_candidates: count(
                options,
                engine_keys::MAX_CANDIDATES,
                DEFAULT_MAX_CANDIDATES,
                1,
            )?,
            holdout_fraction,
            task,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automl_api::EngineConfig;

    use crate::registry;

    fn scorer(metric: MetricName) -> EngineScorer {
        registry::resolve(metric).engine_scorer()
    }

    #[test]
    fn test_defaults() {
        let settings =
            EngineSettings::from_options(&scorer(MetricName::Accuracy), &Options::new()).unwrap();
        assert_eq!(settings.time_left, Duration::from_secs(3600));
        assert_eq!(settings.per_run_time_limit, Duration::from_secs(360));
        assert_eq!(settings.memory_limit_mb, Some(3072));
        assert_eq!(settings.seed, 1);
        assert_eq!(settings.ensemble_size, 50);
        assert_eq!(settings.ensemble_nbest, 50);
        assert_eq!(settings.max_candidates, 64);
        assert_eq!(settings.holdout_fraction, 0.33);
        assert_eq!(settings.task, Task::Classification);
    }

    #[test]
    fn test_builder_options() {
        let options = EngineConfig::new()
            .time_left_for_this_task(120)
            .per_run_time_limit(30)
            .memory_limit(None)
            .seed(7)
            .ensemble_size(5)
            .build();
        let settings =
            EngineSettings::from_options(&scorer(MetricName::F1), &options).unwrap();
        assert_eq!(settings.time_left, Duration::from_secs(120));
        assert_eq!(settings.per_run_time_limit, Duration::from_secs(30));
        assert_eq!(settings.memory_limit_mb, None);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.ensemble_size, 5);
    }

    #[test]
    fn test_task_follows_metric_family() {
        for (metric, task) in [
            (MetricName::R2, Task::Regression),
            (MetricName::Medae, Task::Regression),
            (MetricName::RocAuc, Task::Classification),
        ] {
            let settings = EngineSettings::from_options(&scorer(metric), &Options::new()).unwrap();
            assert_eq!(settings.task, task, "{metric}");
        }

        let explicit = Options::new().with("task", "classification");
        let settings = EngineSettings::from_options(&scorer(MetricName::Mae), &explicit).unwrap();
        assert_eq!(settings.task, Task::Classification);
    }

    #[test]
    fn test_rejects_bad_values() {
        let accuracy = scorer(MetricName::Accuracy);
        for options in [
            Options::new().with("time_left_for_this_task", 0),
            Options::new().with("per_run_time_limit", -1.0),
            Options::new().with("time_left_for_this_task", 1e20),
            Options::new().with("per_run_time_limit", f64::MAX),
            Options::new().with("holdout_fraction", 1.0),
            Options::new().with("max_candidates", 0),
            Options::new().with("ensemble_nbest", 0),
            Options::new().with("seed", "seven"),
            Options::new().with("task", "clustering"),
        ] {
            assert!(
                matches!(
                    EngineSettings::from_options(&accuracy, &options),
                    Err(AutoMLError::InvalidParameter { .. })
                ),
                "{options:?}"
            );
        }
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let options = Options::new()
            .with("n_jobs", 4)
            .with("resampling_strategy", "cv");
        assert!(EngineSettings::from_options(&scorer(MetricName::Accuracy), &options).is_ok());
    }
}
