//! Built-in search engine
//!
//! [`CandidateSearch`] evaluates a fixed space of small pipelines on an
//! internal holdout, ranks them by the configured scorer's cost and blends
//! the best of them with greedy ensemble selection.

mod candidate;
mod ensemble;
mod settings;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use automl_api::{fit_keys, split_keys, Task};
use automl_spi::{
    AutoMLError, CandidateStatus, Dataset, EngineScorer, EnsembleDescription, EnsembleMember,
    Labels, Leaderboard, LeaderboardEntry, Options, Result, SearchEngine, Splitter,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::split::TrainTestSplit;

pub use candidate::{search_space, CandidateConfig, FittedCandidate, ModelFamily, Preprocessing};
pub use ensemble::{combine, greedy_selection, Selection};
pub use settings::EngineSettings;

/// Result of evaluating one candidate on the internal holdout.
#[derive(Debug, Clone)]
struct Evaluation {
    model_id: usize,
    config: CandidateConfig,
    status: CandidateStatus,
    cost: Option<f64>,
    duration: Duration,
    predictions: Vec<f64>,
}

#[derive(Debug, Clone)]
struct Member {
    weight: f64,
    model: FittedCandidate,
}

#[derive(Debug, Clone)]
struct SearchOutcome {
    n_cols: usize,
    members: Vec<Member>,
    leaderboard: Leaderboard,
    description: EnsembleDescription,
}

/// Random search over [`search_space`] followed by ensemble selection.
#[derive(Debug, Clone)]
pub struct CandidateSearch {
    scorer: EngineScorer,
    settings: EngineSettings,
    outcome: Option<SearchOutcome>,
}

impl CandidateSearch {
    pub fn scorer(&self) -> &EngineScorer {
        &self.scorer
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn outcome(&self) -> Result<&SearchOutcome> {
        self.outcome
            .as_ref()
            .ok_or_else(|| AutoMLError::PredictionError("search has not been run".to_string()))
    }

    /// Candidates in evaluation order: the baseline, then the rest shuffled.
    fn schedule(&self) -> Vec<CandidateConfig> {
        let mut space = search_space(self.settings.task);
        let mut rng = StdRng::seed_from_u64(self.settings.seed);
        space[1..].shuffle(&mut rng);
        space.truncate(self.settings.max_candidates);
        space
    }

    fn evaluate(
        &self,
        model_id: usize,
        config: CandidateConfig,
        build: (&Dataset, &Labels),
        valid: (&Dataset, &Labels),
    ) -> Evaluation {
        let started = Instant::now();
        let predictions = config
            .fit(build.0, build.1, self.settings.task)
            .and_then(|model| model.predict(valid.0));
        let duration = started.elapsed();

        let mut evaluation = Evaluation {
            model_id,
            config,
            status: CandidateStatus::Crashed,
            cost: None,
            duration,
            predictions: Vec::new(),
        };

        match predictions {
            Err(e) => {
                warn!(model_id, model = %config, error = %e, "candidate crashed");
            }
            Ok(_) if duration > self.settings.per_run_time_limit => {
                warn!(
                    model_id,
                    model = %config,
                    duration_secs = duration.as_secs_f64(),
                    "candidate exceeded per-run time limit"
                );
                evaluation.status = CandidateStatus::Timeout;
            }
            Ok(predictions) => {
                let cost = self.scorer.cost(valid.1.as_slice(), &predictions);
                if cost.is_finite() {
                    debug!(model_id, model = %config, cost, "evaluated candidate");
                    evaluation.status = CandidateStatus::Success;
                    evaluation.cost = Some(cost);
                    evaluation.predictions = predictions;
                } else {
                    warn!(model_id, model = %config, cost, "candidate produced a non-finite score");
                }
            }
        }

        evaluation
    }
}

fn validate(x: &Dataset, y: &Labels) -> Result<()> {
    if x.n_rows() != y.len() {
        return Err(AutoMLError::InvalidData(format!(
            "x has {} rows but y has {} labels",
            x.n_rows(),
            y.len()
        )));
    }
    if x.n_rows() < 2 {
        return Err(AutoMLError::InsufficientData {
            required: 2,
            actual: x.n_rows(),
        });
    }
    if x.n_cols() == 0 {
        return Err(AutoMLError::InvalidData("x has no feature columns".to_string()));
    }
    if x.as_slice().iter().any(|v| !v.is_finite()) {
        return Err(AutoMLError::InvalidData("x contains non-finite values".to_string()));
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(AutoMLError::InvalidData("y contains non-finite values".to_string()));
    }
    Ok(())
}

impl SearchEngine for CandidateSearch {
    fn construct(scorer: EngineScorer, options: &Options) -> Result<Self> {
        let settings = EngineSettings::from_options(&scorer, options)?;
        debug!(metric = scorer.name(), ?settings, "constructed search engine");
        Ok(Self {
            scorer,
            settings,
            outcome: None,
        })
    }

    fn fit(&mut self, x: &Dataset, y: &Labels, options: &Options) -> Result<()> {
        validate(x, y)?;
        for key in options.unknown_keys(&fit_keys::ALL) {
            debug!(key, "ignoring unknown fit option");
        }
        let dataset_name = options.get_str(fit_keys::DATASET_NAME)?.map(str::to_string);

        let started = Instant::now();
        let task = self.settings.task;
        info!(
            metric = self.scorer.name(),
            task = task.as_str(),
            n_rows = x.n_rows(),
            n_cols = x.n_cols(),
            time_left_secs = self.settings.time_left.as_secs_f64(),
            "starting candidate search"
        );

        let holdout = Options::new()
            .with(split_keys::TEST_SIZE, self.settings.holdout_fraction)
            .with(split_keys::RANDOM_STATE, self.settings.seed)
            .with(split_keys::STRATIFY, task == Task::Classification);
        let (x_build, x_valid, y_build, y_valid) =
            TrainTestSplit.split(x, y, &holdout)?.into_parts();

        let mut evaluations = Vec::new();
        let mut budget_exhausted = false;
        for (i, config) in self.schedule().into_iter().enumerate() {
            if started.elapsed() >= self.settings.time_left {
                warn!(evaluated = i, "time budget exhausted, stopping search");
                budget_exhausted = true;
                break;
            }
            evaluations.push(self.evaluate(
                i + 1,
                config,
                (&x_build, &y_build),
                (&x_valid, &y_valid),
            ));
        }

        let mut successes: Vec<&Evaluation> = evaluations
            .iter()
            .filter(|e| e.status == CandidateStatus::Success)
            .collect();
        if successes.is_empty() {
            let timed_out = evaluations
                .iter()
                .any(|e| e.status == CandidateStatus::Timeout);
            return Err(if budget_exhausted || timed_out {
                AutoMLError::TimeBudgetExhausted {
                    budget_secs: self.settings.time_left.as_secs_f64(),
                }
            } else {
                AutoMLError::NoValidModels(format!(
                    "all {} candidates failed",
                    evaluations.len()
                ))
            });
        }
        successes.sort_by(|a, b| {
            let (ca, cb) = (a.cost.unwrap_or(f64::INFINITY), b.cost.unwrap_or(f64::INFINITY));
            ca.total_cmp(&cb).then(a.model_id.cmp(&b.model_id))
        });

        let pool: Vec<&Evaluation> = successes
            .iter()
            .take(self.settings.ensemble_nbest)
            .copied()
            .collect();
        let validation: Vec<Vec<f64>> = pool.iter().map(|e| e.predictions.clone()).collect();
        let selection = greedy_selection(
            &validation,
            y_valid.as_slice(),
            &self.scorer,
            task,
            self.settings.ensemble_size,
        );

        let mut weights: HashMap<usize, f64> = HashMap::new();
        let mut members = Vec::new();
        for (evaluation, &weight) in pool.iter().zip(&selection.weights) {
            if weight > 0.0 {
                weights.insert(evaluation.model_id, weight);
                members.push(Member {
                    weight,
                    model: evaluation.config.fit(x, y, task)?,
                });
            }
        }

        let entries: Vec<LeaderboardEntry> = successes
            .iter()
            .copied()
            .chain(
                evaluations
                    .iter()
                    .filter(|e| e.status != CandidateStatus::Success),
            )
            .enumerate()
            .map(|(i, e)| LeaderboardEntry {
                rank: i + 1,
                model_id: e.model_id,
                model: e.config.to_string(),
                ensemble_weight: weights.get(&e.model_id).copied().unwrap_or(0.0),
                cost: e.cost,
                duration_secs: e.duration.as_secs_f64(),
                status: e.status,
            })
            .collect();
        let leaderboard = Leaderboard::new(self.scorer.name(), entries);

        let mut ensemble_members: Vec<EnsembleMember> = leaderboard
            .iter()
            .filter(|entry| entry.ensemble_weight > 0.0)
            .map(|entry| EnsembleMember {
                model_id: entry.model_id,
                rank: entry.rank,
                model: entry.model.clone(),
                weight: entry.ensemble_weight,
                cost: entry.cost.unwrap_or(f64::INFINITY),
            })
            .collect();
        ensemble_members.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.rank.cmp(&b.rank)));

        let description = EnsembleDescription {
            task: task.as_str().to_string(),
            metric: self.scorer.name().to_string(),
            dataset_name,
            ensemble_cost: selection.cost,
            members: ensemble_members,
        };

        info!(
            evaluated = evaluations.len(),
            succeeded = successes.len(),
            ensemble_size = members.len(),
            ensemble_cost = selection.cost,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "candidate search finished"
        );

        self.outcome = Some(SearchOutcome {
            n_cols: x.n_cols(),
            members,
            leaderboard,
            description,
        });
        Ok(())
    }

    fn predict(&self, x: &Dataset) -> Result<Labels> {
        let outcome = self.outcome()?;
        if x.n_cols() != outcome.n_cols && !x.is_empty() {
            return Err(AutoMLError::InvalidData(format!(
                "expected {} feature columns, got {}",
                outcome.n_cols,
                x.n_cols()
            )));
        }

        let predictions: Vec<Vec<f64>> = outcome
            .members
            .iter()
            .map(|m| m.model.predict(x))
            .collect::<Result<_>>()?;
        let views: Vec<&[f64]> = predictions.iter().map(Vec::as_slice).collect();
        let weights: Vec<f64> = outcome.members.iter().map(|m| m.weight).collect();
        Ok(Labels::new(combine(&views, &weights, self.settings.task)))
    }

    fn leaderboard(&self) -> Result<Leaderboard> {
        Ok(self.outcome()?.leaderboard.clone())
    }

    fn ensemble(&self) -> Result<EnsembleDescription> {
        Ok(self.outcome()?.description.clone())
    }
}
