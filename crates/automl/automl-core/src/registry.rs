//! Metric registry
//!
//! Maps every [`MetricName`] to both of its scorer forms: the
//! [`EngineScorer`] handed to the search engine and the evaluation function
//! used to re-score predictions. Entries are immutable statics; resolution is
//! an exhaustive match, so no name can exist in one form and not the other.

use automl_api::MetricName;
use automl_spi::{EngineScorer, MetricFn};

use crate::metrics;

/// Both scorer forms for one metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricEntry {
    name: MetricName,
    engine: EngineScorer,
    evaluate: MetricFn,
}

impl MetricEntry {
    const fn new(name: MetricName, engine: EngineScorer, evaluate: MetricFn) -> Self {
        Self {
            name,
            engine,
            evaluate,
        }
    }

    pub fn name(&self) -> MetricName {
        self.name
    }

    /// Scorer configured into the search engine.
    pub fn engine_scorer(&self) -> EngineScorer {
        self.engine
    }

    /// Raw metric value of `y_pred` against `y_true`.
    pub fn evaluate(&self, y_true: &[f64], y_pred: &[f64]) -> f64 {
        (self.evaluate)(y_true, y_pred)
    }
}

static ACCURACY: MetricEntry = MetricEntry::new(
    MetricName::Accuracy,
    EngineScorer::new("accuracy", 1.0, 0.0, true, metrics::accuracy),
    metrics::accuracy,
);

static F1: MetricEntry = MetricEntry::new(
    MetricName::F1,
    EngineScorer::new("f1", 1.0, 0.0, true, metrics::f1),
    metrics::f1,
);

static PRECISION: MetricEntry = MetricEntry::new(
    MetricName::Precision,
    EngineScorer::new("precision", 1.0, 0.0, true, metrics::precision),
    metrics::precision,
);

static RECALL: MetricEntry = MetricEntry::new(
    MetricName::Recall,
    EngineScorer::new("recall", 1.0, 0.0, true, metrics::recall),
    metrics::recall,
);

static ROC_AUC: MetricEntry = MetricEntry::new(
    MetricName::RocAuc,
    EngineScorer::new("roc_auc", 1.0, 0.0, true, metrics::roc_auc),
    metrics::roc_auc,
);

static LOG_LOSS: MetricEntry = MetricEntry::new(
    MetricName::LogLoss,
    EngineScorer::new("log_loss", 0.0, f64::INFINITY, false, metrics::log_loss),
    metrics::log_loss,
);

static R2: MetricEntry = MetricEntry::new(
    MetricName::R2,
    EngineScorer::new("r2", 1.0, f64::NEG_INFINITY, true, metrics::r2),
    metrics::r2,
);

static MAE: MetricEntry = MetricEntry::new(
    MetricName::Mae,
    EngineScorer::new("mae", 0.0, f64::INFINITY, false, metrics::mae),
    metrics::mae,
);

static MSE: MetricEntry = MetricEntry::new(
    MetricName::Mse,
    EngineScorer::new("mse", 0.0, f64::INFINITY, false, metrics::mse),
    metrics::mse,
);

static MEDAE: MetricEntry = MetricEntry::new(
    MetricName::Medae,
    EngineScorer::new("medae", 0.0, f64::INFINITY, false, metrics::medae),
    metrics::medae,
);

/// Entry for a known metric.
pub fn resolve(metric: MetricName) -> &'static MetricEntry {
    match metric {
        MetricName::Accuracy => &ACCURACY,
        MetricName::F1 => &F1,
        MetricName::Precision => &PRECISION,
        MetricName::Recall => &RECALL,
        MetricName::RocAuc => &ROC_AUC,
        MetricName::LogLoss => &LOG_LOSS,
        MetricName::R2 => &R2,
        MetricName::Mae => &MAE,
        MetricName::Mse => &MSE,
        MetricName::Medae => &MEDAE,
    }
}

/// Entry for a metric name; `None` when the name is not registered.
pub fn lookup(name: &str) -> Option<&'static MetricEntry> {
    MetricName::parse(name).map(resolve)
}

/// Registered names, in registry order.
pub fn names() -> impl Iterator<Item = &'static str> {
    MetricName::names()
}

/// Every registry entry, in registry order.
pub fn entries() -> impl Iterator<Item = &'static MetricEntry> {
    MetricName::ALL.into_iter().map(resolve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves_to_matching_scorers() {
        for entry in entries() {
            assert_eq!(entry.engine_scorer().name(), entry.name().as_str());
            assert_eq!(lookup(entry.name().as_str()).unwrap().name(), entry.name());
        }
        assert_eq!(entries().count(), 10);
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        assert!(lookup("nonexistent").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("ACCURACY").is_none());
    }

    #[test]
    fn test_names_in_registry_order() {
        let names: Vec<&str> = names().collect();
        assert_eq!(
            names,
            vec![
                "accuracy", "f1", "precision", "recall", "roc_auc", "log_loss", "r2", "mae",
                "mse", "medae"
            ]
        );
    }

    #[test]
    fn test_engine_scorer_directions() {
        assert!(resolve(MetricName::Accuracy).engine_scorer().greater_is_better());
        assert!(resolve(MetricName::R2).engine_scorer().greater_is_better());
        assert!(!resolve(MetricName::LogLoss).engine_scorer().greater_is_better());
        assert!(!resolve(MetricName::Mse).engine_scorer().greater_is_better());
    }

    #[test]
    fn test_both_forms_agree_on_raw_value() {
        let y_true = [1.0, 0.0, 1.0, 1.0, 0.0];
        let y_pred = [1.0, 0.0, 0.0, 1.0, 1.0];
        for entry in entries() {
            let raw = entry.engine_scorer().raw(&y_true, &y_pred);
            let evaluated = entry.evaluate(&y_true, &y_pred);
            assert!(
                (raw - evaluated).abs() < 1e-12,
                "{} disagrees: {} vs {}",
                entry.name(),
                raw,
                evaluated
            );
        }
    }

    #[test]
    fn test_engine_cost_is_zero_for_perfect_predictions() {
        let y = [0.0, 1.0, 1.0, 0.0];
        for entry in entries() {
            let cost = entry.engine_scorer().cost(&y, &y);
            assert!(cost.abs() < 1e-9, "{} cost {}", entry.name(), cost);
        }
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| lookup("f1").map(|e| e.name())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(MetricName::F1));
        }
    }
}
