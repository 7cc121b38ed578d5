//! AutoML façade
//!
//! Owns one search engine configured for a fixed metric, and tracks whether
//! it has been fitted together with the holdout score from the latest fit.

use std::fmt;

use automl_api::MetricName;
use automl_spi::{
    AutoMLError, Dataset, EnsembleDescription, Labels, Leaderboard, Options, Predictions, Result,
    SearchEngine, Splitter,
};
use tracing::{debug, info};

use crate::engine::CandidateSearch;
use crate::registry::{self, MetricEntry};
use crate::split::TrainTestSplit;

/// Lifecycle of an [`AutoML`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitState {
    #[default]
    Unfitted,
    Fitted,
}

/// Metric-driven model search with holdout scoring.
///
/// Construction resolves the metric and builds the engine; `fit` splits off
/// a holdout, runs the engine on the rest and scores the result on the
/// holdout. Read operations fail with [`AutoMLError::NotFitted`] until a fit
/// has succeeded.
///
/// # Example
///
/// ```rust,no_run
/// use automl_core::AutoML;
/// use automl_spi::{Dataset, Labels, Options};
///
/// let x = Dataset::from(vec![[0.0, 0.1], [0.2, 0.0], [5.0, 5.1], [5.2, 4.9]]);
/// let y = Labels::from(vec![0, 0, 1, 1]);
///
/// let mut automl: AutoML = AutoML::new("accuracy", &Options::new()).unwrap();
/// automl.fit(&x, &y).unwrap();
/// println!("holdout accuracy: {:?}", automl.score());
/// ```
#[derive(Debug)]
pub struct AutoML<E: SearchEngine = CandidateSearch, S: Splitter = TrainTestSplit> {
    metric: &'static MetricEntry,
    engine: E,
    splitter: S,
    state: FitState,
    score: Option<f64>,
}

impl<E: SearchEngine, S: Splitter + Default> AutoML<E, S> {
    /// Build an instance optimizing `metric`, forwarding `engine_options` to
    /// the engine untouched.
    pub fn new(metric: &str, engine_options: &Options) -> Result<Self> {
        Self::with_splitter(metric, engine_options, S::default())
    }
}

impl<E: SearchEngine, S: Splitter> AutoML<E, S> {
    /// Like [`AutoML::new`] with an explicit splitter.
    pub fn with_splitter(metric: &str, engine_options: &Options, splitter: S) -> Result<Self> {
        let metric: MetricName = metric.parse()?;
        let entry = registry::resolve(metric);
        let engine = E::construct(entry.engine_scorer(), engine_options)?;
        debug!(%metric, "constructed automl");

        Ok(Self {
            metric: entry,
            engine,
            splitter,
            state: FitState::Unfitted,
            score: None,
        })
    }

    pub fn metric(&self) -> MetricName {
        self.metric.name()
    }

    pub fn state(&self) -> FitState {
        self.state
    }

    pub fn is_fitted(&self) -> bool {
        self.state == FitState::Fitted
    }

    /// Holdout score from the most recent successful fit.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// [`AutoML::fit_with`] with empty split and fit options.
    pub fn fit(&mut self, x: &Dataset, y: &Labels) -> Result<()> {
        self.fit_with(x, y, &Options::new(), &Options::new())
    }

    /// Split `(x, y)`, run the engine on the training part and score the
    /// holdout part.
    ///
    /// Splitter and engine errors are returned unchanged. A holdout the
    /// metric cannot score fails with [`AutoMLError::InvalidData`]. On any
    /// error the state and score stay as they were.
    pub fn fit_with(
        &mut self,
        x: &Dataset,
        y: &Labels,
        split_options: &Options,
        fit_options: &Options,
    ) -> Result<()> {
        let (x_train, x_test, y_train, y_test) =
            self.splitter.split(x, y, split_options)?.into_parts();
        debug!(
            n_train = x_train.n_rows(),
            n_test = x_test.n_rows(),
            "split training data"
        );

        self.engine.fit(&x_train, &y_train, fit_options)?;
        let predictions = self.engine.predict(&x_test)?;
        let score = self.evaluate(&y_test, &predictions)?;

        self.state = FitState::Fitted;
        self.score = Some(score);
        info!(metric = %self.metric(), score, "fit complete");
        Ok(())
    }

    fn ensure_fitted(&self) -> Result<()> {
        match self.state {
            FitState::Fitted => Ok(()),
            FitState::Unfitted => Err(AutoMLError::NotFitted),
        }
    }

    pub fn predict(&self, x: &Dataset) -> Result<Predictions> {
        self.ensure_fitted()?;
        self.engine.predict(x)
    }

    /// Score the engine's predictions for `x` against `y` with the
    /// evaluation form of the metric. Does not touch the stored score.
    ///
    /// Fails with [`AutoMLError::InvalidData`] when `y` and the predictions
    /// differ in length or the metric is undefined on them.
    pub fn test(&self, x: &Dataset, y: &Labels) -> Result<f64> {
        let predictions = self.predict(x)?;
        self.evaluate(y, &predictions)
    }

    fn evaluate(&self, y: &Labels, predictions: &Predictions) -> Result<f64> {
        if y.len() != predictions.len() {
            return Err(AutoMLError::InvalidData(format!(
                "{} labels for {} predictions",
                y.len(),
                predictions.len()
            )));
        }

        let score = self.metric.evaluate(y.as_slice(), predictions.as_slice());
        if !score.is_finite() {
            return Err(AutoMLError::InvalidData(format!(
                "{} is undefined on {} holdout rows (got {})",
                self.metric(),
                y.len(),
                score
            )));
        }
        Ok(score)
    }

    pub fn leaderboard(&self) -> Result<Leaderboard> {
        self.ensure_fitted()?;
        self.engine.leaderboard()
    }

    pub fn ensemble(&self) -> Result<EnsembleDescription> {
        self.ensure_fitted()?;
        self.engine.ensemble()
    }
}

impl<E: SearchEngine, S: Splitter> fmt::Display for AutoML<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AutoML(metric={}, fitted={}, score=",
            self.metric(),
            self.is_fitted()
        )?;
        match self.score {
            Some(score) => write!(f, "{})", score),
            None => write!(f, "None)"),
        }
    }
}
