//! Evaluation metrics
//!
//! Plain `(y_true, y_pred) -> f64` functions used to re-score predictions
//! against ground truth. Mismatched lengths or empty inputs yield `NaN`.
//!
//! Label metrics and mean errors delegate to `aprender::metrics`, which
//! works on dense `usize` class indices and `f32` vectors. Labels are mapped
//! onto indices here; aprender has no ROC AUC, log loss or median error, so
//! those stay local.

use aprender::metrics::classification::{self, Average};
use aprender::primitives::Vector;

/// Labels counted as the positive class in binary metrics.
const POSITIVE_LABEL: f64 = 1.0;

/// Probabilities are clipped to `[EPS, 1 - EPS]` before taking logs.
const LOG_LOSS_EPS: f64 = 1e-15;

fn invalid(y_true: &[f64], y_pred: &[f64]) -> bool {
    y_true.len() != y_pred.len() || y_true.is_empty()
}

fn is_binary(y_true: &[f64], y_pred: &[f64]) -> bool {
    y_true
        .iter()
        .chain(y_pred.iter())
        .all(|&v| v == 0.0 || v == 1.0)
}

/// Map both label vectors onto `0..k` over their sorted union.
fn encode(y_true: &[f64], y_pred: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut classes: Vec<f64> = y_true.iter().chain(y_pred.iter()).copied().collect();
    classes.sort_by(f64::total_cmp);
    classes.dedup();

    let index = |v: &f64| {
        classes
            .binary_search_by(|c| c.total_cmp(v))
            .unwrap_or_default()
    };
    (
        y_true.iter().map(index).collect(),
        y_pred.iter().map(index).collect(),
    )
}

fn vector(values: &[f64]) -> Vector<f32> {
    let values: Vec<f32> = values.iter().map(|&v| v as f32).collect();
    Vector::from_slice(&values)
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// `(tp, fp, fn)` for label 1, read off aprender's confusion matrix.
fn positive_counts(y_true: &[f64], y_pred: &[f64]) -> (usize, usize, usize) {
    let as_index = |v: &f64| usize::from(*v == POSITIVE_LABEL);
    let y_true: Vec<usize> = y_true.iter().map(as_index).collect();
    let y_pred: Vec<usize> = y_pred.iter().map(as_index).collect();

    // rows are true labels, columns predictions; 1x1 when label 1 is absent
    let cm = classification::confusion_matrix(&y_pred, &y_true);
    if cm.n_rows() < 2 {
        return (0, 0, 0);
    }
    (cm.get(1, 1), cm.get(0, 1), cm.get(1, 0))
}

/// Binary score for label 1, or aprender's macro average when any label
/// falls outside `{0, 1}`.
fn binary_or_macro(
    y_true: &[f64],
    y_pred: &[f64],
    binary: impl Fn(usize, usize, usize) -> f64,
    macro_average: fn(&[usize], &[usize], Average) -> f32,
) -> f64 {
    if invalid(y_true, y_pred) {
        return f64::NAN;
    }

    if is_binary(y_true, y_pred) {
        let (tp, fp, fn_) = positive_counts(y_true, y_pred);
        return binary(tp, fp, fn_);
    }

    let (y_true, y_pred) = encode(y_true, y_pred);
    f64::from(macro_average(&y_pred, &y_true, Average::Macro))
}

/// Fraction of exactly matching labels.
///
/// # Example
///
/// ```rust
/// use automl_core::metrics::accuracy;
///
/// let acc = accuracy(&[0.0, 1.0, 1.0, 0.0], &[0.0, 1.0, 0.0, 0.0]);
/// assert!((acc - 0.75).abs() < 1e-6);
/// ```
pub fn accuracy(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if invalid(y_true, y_pred) {
        return f64::NAN;
    }

    let (y_true, y_pred) = encode(y_true, y_pred);
    f64::from(classification::accuracy(&y_pred, &y_true))
}

/// precision = TP / (TP + FP)
pub fn precision(y_true: &[f64], y_pred: &[f64]) -> f64 {
    binary_or_macro(
        y_true,
        y_pred,
        |tp, fp, _| ratio(tp, tp + fp),
        classification::precision,
    )
}

/// recall = TP / (TP + FN)
pub fn recall(y_true: &[f64], y_pred: &[f64]) -> f64 {
    binary_or_macro(
        y_true,
        y_pred,
        |tp, _, fn_| ratio(tp, tp + fn_),
        classification::recall,
    )
}

/// Harmonic mean of precision and recall: 2TP / (2TP + FP + FN).
pub fn f1(y_true: &[f64], y_pred: &[f64]) -> f64 {
    binary_or_macro(
        y_true,
        y_pred,
        |tp, fp, fn_| ratio(2 * tp, 2 * tp + fp + fn_),
        classification::f1_score,
    )
}

/// Area under the ROC curve, treating `y_pred` as ranking scores for label 1.
///
/// Computed with the rank-sum statistic; tied scores share their average
/// rank. `NaN` unless `y_true` contains both classes.
pub fn roc_auc(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if invalid(y_true, y_pred) {
        return f64::NAN;
    }

    let n_pos = y_true.iter().filter(|&&t| t == POSITIVE_LABEL).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return f64::NAN;
    }

    let mut order: Vec<usize> = (0..y_pred.len()).collect();
    order.sort_by(|&a, &b| y_pred[a].total_cmp(&y_pred[b]));

    let mut ranks = vec![0.0; y_pred.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && y_pred[order[end + 1]] == y_pred[order[start]] {
            end += 1;
        }
        // 1-based average rank of the tie group
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &i in &order[start..=end] {
            ranks[i] = rank;
        }
        start = end + 1;
    }

    let pos_rank_sum: f64 = y_true
        .iter()
        .zip(ranks.iter())
        .filter(|(&t, _)| t == POSITIVE_LABEL)
        .map(|(_, &r)| r)
        .sum();

    let n_pos = n_pos as f64;
    (pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg as f64)
}

/// Cross-entropy loss.
///
/// With binary targets and predictions in `[0, 1]`, predictions are read as
/// the probability of label 1. Otherwise predictions are hard labels and
/// each row contributes `-ln(1 - EPS)` when correct and `-ln(EPS)` when not.
pub fn log_loss(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if invalid(y_true, y_pred) {
        return f64::NAN;
    }

    let binary_targets = y_true.iter().all(|&t| t == 0.0 || t == 1.0);
    let probabilities = y_pred.iter().all(|&p| (0.0..=1.0).contains(&p));

    let total: f64 = if binary_targets && probabilities {
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| {
                let p = p.clamp(LOG_LOSS_EPS, 1.0 - LOG_LOSS_EPS);
                -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
            })
            .sum()
    } else {
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| {
                let p = if t == p { 1.0 - LOG_LOSS_EPS } else { LOG_LOSS_EPS };
                -p.ln()
            })
            .sum()
    };

    total / y_true.len() as f64
}

/// Coefficient of determination.
///
/// 1.0 = perfect, 0.0 = same as predicting the mean, negative = worse.
/// For a constant target: 1.0 on a perfect fit, 0.0 otherwise.
pub fn r2(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if invalid(y_true, y_pred) {
        return f64::NAN;
    }

    // aprender scores every constant target as 0.0
    if y_true.iter().all(|&t| t == y_true[0]) {
        return if y_true == y_pred { 1.0 } else { 0.0 };
    }

    f64::from(aprender::metrics::r_squared(&vector(y_pred), &vector(y_true)))
}

/// Mean absolute error.
pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if invalid(y_true, y_pred) {
        return f64::NAN;
    }
    f64::from(aprender::metrics::mae(&vector(y_pred), &vector(y_true)))
}

/// Mean squared error.
pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if invalid(y_true, y_pred) {
        return f64::NAN;
    }
    f64::from(aprender::metrics::mse(&vector(y_pred), &vector(y_true)))
}

/// Median absolute error. Robust to outliers.
pub fn medae(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if invalid(y_true, y_pred) {
        return f64::NAN;
    }

    let mut errors: Vec<f64> = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .collect();
    errors.sort_by(f64::total_cmp);

    let mid = errors.len() / 2;
    if errors.len() % 2 == 0 {
        (errors[mid - 1] + errors[mid]) / 2.0
    } else {
        errors[mid]
    }
}
