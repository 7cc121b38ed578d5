//! Search engine trait for AutoML.

use crate::error::AutoMLError;
use crate::model::{Dataset, EngineScorer, EnsembleDescription, Labels, Leaderboard, Options};

/// Result type for search engine operations.
pub type Result<T> = std::result::Result<T, AutoMLError>;

/// Architecture-search and ensemble-building engine driven by the facade.
///
/// The facade treats implementors as opaque: it constructs one per instance,
/// forwards option dictionaries untouched, and passes any error straight
/// back to its caller.
pub trait SearchEngine: Sized {
    /// Build an engine that optimizes `scorer`, configured by `options`
    /// (time budgets, memory ceiling, engine-specific tuning).
    fn construct(scorer: EngineScorer, options: &Options) -> Result<Self>;

    /// Run the search and build the ensemble on the training data.
    fn fit(&mut self, x: &Dataset, y: &Labels, options: &Options) -> Result<()>;

    /// Predict with the fitted ensemble.
    fn predict(&self, x: &Dataset) -> Result<Labels>;

    /// Ranked table of evaluated candidates.
    fn leaderboard(&self) -> Result<Leaderboard>;

    /// Description of the selected ensemble.
    fn ensemble(&self) -> Result<EnsembleDescription>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandidateStatus, EnsembleMember, LeaderboardEntry};

    // ========== Mock Implementations ==========

    fn hits(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
        correct as f64 / y_true.len() as f64
    }

    /// Predicts the most frequent training label.
    struct MajorityEngine {
        scorer: EngineScorer,
        label: Option<f64>,
        cost: f64,
    }

    impl SearchEngine for MajorityEngine {
        fn construct(scorer: EngineScorer, _options: &Options) -> Result<Self> {
            Ok(Self {
                scorer,
                label: None,
                cost: f64::INFINITY,
            })
        }

        fn fit(&mut self, x: &Dataset, y: &Labels, _options: &Options) -> Result<()> {
            if x.n_rows() != y.len() {
                return Err(AutoMLError::InvalidData("row count mismatch".to_string()));
            }
            if y.is_empty() {
                return Err(AutoMLError::InsufficientData {
                    required: 1,
                    actual: 0,
                });
            }
            let ones = y.iter().filter(|&&v| v == 1.0).count();
            let label = if ones * 2 >= y.len() { 1.0 } else { 0.0 };
            let predictions = vec![label; y.len()];
            self.cost = self.scorer.cost(y.as_slice(), &predictions);
            self.label = Some(label);
            Ok(())
        }

        fn predict(&self, x: &Dataset) -> Result<Labels> {
            let label = self
                .label
                .ok_or_else(|| AutoMLError::PredictionError("engine not fitted".to_string()))?;
            Ok(Labels::new(vec![label; x.n_rows()]))
        }

        fn leaderboard(&self) -> Result<Leaderboard> {
            Ok(Leaderboard::new(
                self.scorer.name(),
                vec![LeaderboardEntry {
                    rank: 1,
                    model_id: 1,
                    model: "majority".to_string(),
                    ensemble_weight: 1.0,
                    cost: Some(self.cost),
                    duration_secs: 0.0,
                    status: CandidateStatus::Success,
                }],
            ))
        }

        fn ensemble(&self) -> Result<EnsembleDescription> {
            Ok(EnsembleDescription {
                task: "classification".to_string(),
                metric: self.scorer.name().to_string(),
                dataset_name: None,
                ensemble_cost: self.cost,
                members: vec![EnsembleMember {
                    model_id: 1,
                    rank: 1,
                    model: "majority".to_string(),
                    weight: 1.0,
                    cost: self.cost,
                }],
            })
        }
    }

    /// Refuses to be constructed without a time budget.
    struct BudgetedEngine;

    impl SearchEngine for BudgetedEngine {
        fn construct(_scorer: EngineScorer, options: &Options) -> Result<Self> {
            match options.get_u64("time_left_for_this_task")? {
                Some(_) => Ok(Self),
                None => Err(AutoMLError::InvalidParameter {
                    name: "time_left_for_this_task".to_string(),
                    reason: "required".to_string(),
                }),
            }
        }

        fn fit(&mut self, _x: &Dataset, _y: &Labels, _options: &Options) -> Result<()> {
            Err(AutoMLError::TimeBudgetExhausted { budget_secs: 0.0 })
        }

        fn predict(&self, _x: &Dataset) -> Result<Labels> {
            Err(AutoMLError::PredictionError("never fitted".to_string()))
        }

        fn leaderboard(&self) -> Result<Leaderboard> {
            Ok(Leaderboard::default())
        }

        fn ensemble(&self) -> Result<EnsembleDescription> {
            Ok(EnsembleDescription::default())
        }
    }

    fn scorer() -> EngineScorer {
        EngineScorer::new("accuracy", 1.0, 0.0, true, hits)
    }

    fn data() -> (Dataset, Labels) {
        let x = Dataset::from(vec![[0.0], [1.0], [2.0], [3.0]]);
        let y = Labels::from(vec![1.0, 1.0, 0.0, 1.0]);
        (x, y)
    }

    // ========== Success Cases ==========

    #[test]
    fn test_majority_engine_round() {
        let (x, y) = data();
        let mut engine = MajorityEngine::construct(scorer(), &Options::new()).unwrap();
        engine.fit(&x, &y, &Options::new()).unwrap();

        let predictions = engine.predict(&x).unwrap();
        assert_eq!(predictions.as_slice(), &[1.0, 1.0, 1.0, 1.0]);

        let board = engine.leaderboard().unwrap();
        assert_eq!(board.metric, "accuracy");
        assert!((board.best().unwrap().cost.unwrap() - 0.25).abs() < f64::EPSILON);

        let ensemble = engine.ensemble().unwrap();
        assert_eq!(ensemble.len(), 1);
    }

    #[test]
    fn test_construct_reads_options() {
        let options = Options::new().with("time_left_for_this_task", 30);
        assert!(BudgetedEngine::construct(scorer(), &options).is_ok());
        assert!(matches!(
            BudgetedEngine::construct(scorer(), &Options::new()),
            Err(AutoMLError::InvalidParameter { .. })
        ));
    }

    // ========== Error Cases ==========

    #[test]
    fn test_predict_before_fit_fails() {
        let (x, _) = data();
        let engine = MajorityEngine::construct(scorer(), &Options::new()).unwrap();
        assert!(matches!(
            engine.predict(&x),
            Err(AutoMLError::PredictionError(_))
        ));
    }

    #[test]
    fn test_fit_rejects_mismatched_rows() {
        let (x, _) = data();
        let y = Labels::from(vec![1.0]);
        let mut engine = MajorityEngine::construct(scorer(), &Options::new()).unwrap();
        assert!(matches!(
            engine.fit(&x, &y, &Options::new()),
            Err(AutoMLError::InvalidData(_))
        ));
    }

    #[test]
    fn test_fit_error_is_returned_verbatim() {
        let (x, y) = data();
        let options = Options::new().with("time_left_for_this_task", 1);
        let mut engine = BudgetedEngine::construct(scorer(), &options).unwrap();
        assert_eq!(
            engine.fit(&x, &y, &Options::new()),
            Err(AutoMLError::TimeBudgetExhausted { budget_secs: 0.0 })
        );
    }

    // ========== Generic Function Tests ==========

    #[test]
    fn test_generic_over_engine() {
        fn fit_and_rank<E: SearchEngine>(x: &Dataset, y: &Labels) -> Result<usize> {
            let mut engine = E::construct(scorer(), &Options::new())?;
            engine.fit(x, y, &Options::new())?;
            Ok(engine.leaderboard()?.len())
        }

        let (x, y) = data();
        assert_eq!(fit_and_rank::<MajorityEngine>(&x, &y).unwrap(), 1);
    }
}
