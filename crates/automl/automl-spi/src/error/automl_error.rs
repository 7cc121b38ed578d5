//! AutoML error types.

use thiserror::Error;

/// Message carried by [`AutoMLError::NotFitted`].
pub const NOT_FITTED_MESSAGE: &str =
    "Trying to use not fitted model. Please, fit the model by .fit(...) method";

/// Errors that can occur during AutoML operations.
///
/// `NotFitted` and `UnsupportedMetric` are raised by the facade itself. Every
/// other variant originates in a collaborator (search engine or splitter) and
/// reaches the caller exactly as the collaborator produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AutoMLError {
    /// A read-style operation was invoked before a successful fit.
    #[error("{}", NOT_FITTED_MESSAGE)]
    NotFitted,

    /// The metric name is not a key of the metric registry.
    #[error("{message}")]
    UnsupportedMetric { metric: String, message: String },

    /// Insufficient data points for the operation.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Malformed input data (shape mismatch, ragged rows).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Model fitting failed.
    #[error("Model fitting failed: {0}")]
    FitError(String),

    /// No valid models could be fitted.
    #[error("No models could be fitted to the data: {0}")]
    NoValidModels(String),

    /// The search budget ran out before any candidate finished.
    #[error("Search time budget of {budget_secs}s exhausted before any candidate finished")]
    TimeBudgetExhausted { budget_secs: f64 },

    /// Prediction error.
    #[error("Prediction failed: {0}")]
    PredictionError(String),
}

impl AutoMLError {
    /// Build an `UnsupportedMetric` error listing the accepted names.
    pub fn unsupported_metric<I, S>(metric: impl Into<String>, supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let metric = metric.into();
        let options: Vec<String> = supported
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let message = format!(
            "Passed metric '{}' is not supported. Options are: {}",
            metric,
            options.join(", ")
        );
        Self::UnsupportedMetric { metric, message }
    }

    /// Whether the error was raised by the facade rather than a collaborator.
    pub fn is_facade_error(&self) -> bool {
        matches!(self, Self::NotFitted | Self::UnsupportedMetric { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_fitted_message() {
        let error = AutoMLError::NotFitted;
        assert_eq!(error.to_string(), NOT_FITTED_MESSAGE);
        assert!(error.to_string().contains(".fit(...)"));
    }

    #[test]
    fn test_unsupported_metric_lists_options() {
        let error = AutoMLError::unsupported_metric("nonexistent", ["accuracy", "f1", "mae"]);
        assert_eq!(
            error.to_string(),
            "Passed metric 'nonexistent' is not supported. Options are: accuracy, f1, mae"
        );
        match error {
            AutoMLError::UnsupportedMetric { metric, .. } => assert_eq!(metric, "nonexistent"),
            _ => panic!("Expected UnsupportedMetric variant"),
        }
    }

    #[test]
    fn test_unsupported_metric_custom_message() {
        let error = AutoMLError::UnsupportedMetric {
            metric: "auc".to_string(),
            message: "use roc_auc instead".to_string(),
        };
        assert_eq!(error.to_string(), "use roc_auc instead");
    }

    #[test]
    fn test_insufficient_data_error() {
        let error = AutoMLError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 2 points, got 1"
        );
    }

    #[test]
    fn test_invalid_parameter_error() {
        let error = AutoMLError::InvalidParameter {
            name: "test_size".to_string(),
            reason: "must be in (0, 1)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'test_size': must be in (0, 1)"
        );
    }

    #[test]
    fn test_time_budget_error() {
        let error = AutoMLError::TimeBudgetExhausted { budget_secs: 0.5 };
        assert!(error.to_string().contains("0.5s"));
    }

    #[test]
    fn test_facade_error_classification() {
        assert!(AutoMLError::NotFitted.is_facade_error());
        assert!(AutoMLError::unsupported_metric("x", ["accuracy"]).is_facade_error());
        assert!(!AutoMLError::FitError("boom".to_string()).is_facade_error());
        assert!(!AutoMLError::InvalidData("ragged".to_string()).is_facade_error());
    }

    #[test]
    fn test_error_implements_std_error() {
        fn assert_std_error<E: std::error::Error>() {}
        assert_std_error::<AutoMLError>();
    }

    #[test]
    fn test_all_variants_can_be_constructed() {
        let errors: Vec<AutoMLError> = vec![
            AutoMLError::NotFitted,
            AutoMLError::unsupported_metric("x", ["accuracy"]),
            AutoMLError::InsufficientData {
                required: 10,
                actual: 5,
            },
            AutoMLError::InvalidParameter {
                name: "test".to_string(),
                reason: "test".to_string(),
            },
            AutoMLError::InvalidData("test".to_string()),
            AutoMLError::FitError("test".to_string()),
            AutoMLError::NoValidModels("test".to_string()),
            AutoMLError::TimeBudgetExhausted { budget_secs: 1.0 },
            AutoMLError::PredictionError("test".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
