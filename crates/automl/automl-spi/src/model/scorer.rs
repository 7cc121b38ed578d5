//! Metric object consumed by search engines.

/// Raw metric function: `(y_true, y_pred) -> value`.
pub type MetricFn = fn(&[f64], &[f64]) -> f64;

/// Metric shaped for consumption by a search engine.
///
/// Engines only ever compare candidates, so besides the raw value the scorer
/// exposes a sign-adjusted [`score`](Self::score) (higher is always better)
/// and a [`cost`](Self::cost) (distance from the optimum, lower is better).
#[derive(Debug, Clone, Copy)]
pub struct EngineScorer {
    name: &'static str,
    optimum: f64,
    worst_possible_result: f64,
    greater_is_better: bool,
    metric: MetricFn,
}

impl EngineScorer {
    pub const fn new(
        name: &'static str,
        optimum: f64,
        worst_possible_result: f64,
        greater_is_better: bool,
        metric: MetricFn,
    ) -> Self {
        Self {
            name,
            optimum,
            worst_possible_result,
            greater_is_better,
            metric,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn optimum(&self) -> f64 {
        self.optimum
    }

    pub fn worst_possible_result(&self) -> f64 {
        self.worst_possible_result
    }

    pub fn greater_is_better(&self) -> bool {
        self.greater_is_better
    }

    pub fn sign(&self) -> f64 {
        if self.greater_is_better {
            1.0
        } else {
            -1.0
        }
    }

    /// Unadjusted metric value.
    pub fn raw(&self, y_true: &[f64], y_pred: &[f64]) -> f64 {
        (self.metric)(y_true, y_pred)
    }

    /// Sign-adjusted value; higher is better for every metric.
    pub fn score(&self, y_true: &[f64], y_pred: &[f64]) -> f64 {
        self.sign() * self.raw(y_true, y_pred)
    }

    /// Distance from the optimum; zero is perfect.
    pub fn cost(&self, y_true: &[f64], y_pred: &[f64]) -> f64 {
        self.cost_of(self.raw(y_true, y_pred))
    }

    /// Cost of an already computed raw value.
    pub fn cost_of(&self, raw: f64) -> f64 {
        if self.greater_is_better {
            self.optimum - raw
        } else {
            raw - self.optimum
        }
    }
}
