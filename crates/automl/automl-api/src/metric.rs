//! Canonical metric names.

use std::fmt;
use std::str::FromStr;

use automl_spi::AutoMLError;
use serde::{Deserialize, Serialize};

/// Closed set of metric names the facade accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    Accuracy,
    F1,
    Precision,
    Recall,
    RocAuc,
    LogLoss,
    R2,
    Mae,
    Mse,
    Medae,
}

impl MetricName {
    /// Every supported metric, in registry order.
    pub const ALL: [MetricName; 10] = [
        MetricName::Accuracy,
        MetricName::F1,
        MetricName::Precision,
        MetricName::Recall,
        MetricName::RocAuc,
        MetricName::LogLoss,
        MetricName::R2,
        MetricName::Mae,
        MetricName::Mse,
        MetricName::Medae,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Accuracy => "accuracy",
            MetricName::F1 => "f1",
            MetricName::Precision => "precision",
            MetricName::Recall => "recall",
            MetricName::RocAuc => "roc_auc",
            MetricName::LogLoss => "log_loss",
            MetricName::R2 => "r2",
            MetricName::Mae => "mae",
            MetricName::Mse => "mse",
            MetricName::Medae => "medae",
        }
    }

    /// Canonical names of every supported metric.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(MetricName::as_str)
    }

    /// Exact, case-sensitive lookup.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == name)
    }

    /// Whether the metric scores class labels rather than continuous values.
    pub fn is_classification(&self) -> bool {
        !matches!(
            self,
            MetricName::R2 | MetricName::Mae | MetricName::Mse | MetricName::Medae
        )
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = AutoMLError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AutoMLError::unsupported_metric(s, Self::names()))
    }
}
