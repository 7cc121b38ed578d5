//! Ensemble selection and prediction combining

use automl_api::Task;
use automl_spi::EngineScorer;

/// Combine member predictions with `weights`.
///
/// Classification takes a weighted vote (ties go to the smaller label);
/// regression takes the weighted mean. Members with zero weight are skipped.
pub fn combine(predictions: &[&[f64]], weights: &[f64], task: Task) -> Vec<f64> {
    if predictions.is_empty() {
        return Vec::new();
    }
    let n_rows = predictions[0].len();
    let members: Vec<(&[f64], f64)> = predictions
        .iter()
        .zip(weights)
        .filter(|(_, &w)| w > 0.0)
        .map(|(p, &w)| (*p, w))
        .collect();

    match task {
        Task::Regression => {
            let total: f64 = members.iter().map(|(_, w)| w).sum();
            (0..n_rows)
                .map(|i| members.iter().map(|(p, w)| p[i] * w).sum::<f64>() / total)
                .collect()
        }
        Task::Classification => (0..n_rows)
            .map(|i| {
                let mut votes: Vec<(f64, f64)> = Vec::new();
                for (p, w) in &members {
                    match votes.iter_mut().find(|(label, _)| *label == p[i]) {
                        Some((_, total)) => *total += w,
                        None => votes.push((p[i], *w)),
                    }
                }
                votes
                    .into_iter()
                    .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.total_cmp(&a.0)))
                    .map_or(f64::NAN, |(label, _)| label)
            })
            .collect(),
    }
}

/// Outcome of greedy ensemble selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// One weight per candidate; sums to 1.
    pub weights: Vec<f64>,
    /// Validation cost of the weighted ensemble.
    pub cost: f64,
}

/// Greedy forward selection with replacement.
///
/// Each of `rounds` rounds adds the candidate whose inclusion gives the lowest
/// ensemble cost on the validation targets; weights are selection counts over
/// rounds. With zero rounds the single lowest-cost candidate gets all weight.
pub fn greedy_selection(
    validation_predictions: &[Vec<f64>],
    y_valid: &[f64],
    scorer: &EngineScorer,
    task: Task,
    rounds: usize,
) -> Selection {
    let n = validation_predictions.len();
    let predictions: Vec<&[f64]> = validation_predictions.iter().map(Vec::as_slice).collect();
    let cost_of = |weights: &[f64]| {
        let cost = scorer.cost(y_valid, &combine(&predictions, weights, task));
        if cost.is_nan() {
            f64::INFINITY
        } else {
            cost
        }
    };

    if n == 0 {
        return Selection {
            weights: Vec::new(),
            cost: f64::INFINITY,
        };
    }

    let mut counts = vec![0usize; n];
    if rounds == 0 {
        let best = (0..n)
            .map(|i| {
                let mut weights = vec![0.0; n];
                weights[i] = 1.0;
                (i, cost_of(&weights))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map_or(0, |(i, _)| i);
        counts[best] = 1;
    }

    for _ in 0..rounds {
        let best = (0..n)
            .map(|i| {
                let weights: Vec<f64> = counts
                    .iter()
                    .enumerate()
                    .map(|(j, &c)| (c + usize::from(i == j)) as f64)
                    .collect();
                (i, cost_of(&weights))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map_or(0, |(i, _)| i);
        counts[best] += 1;
    }

    let total: usize = counts.iter().sum();
    let weights: Vec<f64> = counts.iter().map(|&c| c as f64 / total as f64).collect();
    let cost = cost_of(&weights);
    Selection { weights, cost }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accuracy(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
        hits as f64 / y_true.len() as f64
    }

    fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        y_true
            .iter()
            .zip(y_pred)
            .map(|(t, p)| (t - p).powi(2))
            .sum::<f64>()
            / y_true.len() as f64
    }

    const ACCURACY: EngineScorer = EngineScorer::new("accuracy", 1.0, 0.0, true, accuracy);
    const MSE: EngineScorer = EngineScorer::new("mse", 0.0, f64::INFINITY, false, mse);

    #[test]
    fn test_weighted_vote() {
        let a = [0.0, 1.0, 2.0];
        let b = [1.0, 1.0, 0.0];
        let c = [1.0, 0.0, 0.0];
        let combined = combine(&[&a, &b, &c], &[0.4, 0.35, 0.25], Task::Classification);
        assert_eq!(combined, vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_vote_tie_goes_to_smaller_label() {
        let a = [3.0];
        let b = [1.0];
        assert_eq!(
            combine(&[&a, &b], &[0.5, 0.5], Task::Classification),
            vec![1.0]
        );
    }

    #[test]
    fn test_weighted_mean() {
        let a = [1.0, 2.0];
        let b = [3.0, 6.0];
        let combined = combine(&[&a, &b], &[0.75, 0.25], Task::Regression);
        assert_eq!(combined, vec![1.5, 3.0]);
    }

    #[test]
    fn test_zero_weights_are_ignored() {
        let a = [1.0];
        let b = [f64::NAN];
        assert_eq!(combine(&[&a, &b], &[1.0, 0.0], Task::Regression), vec![1.0]);
    }

    #[test]
    fn test_empty() {
        assert!(combine(&[], &[], Task::Regression).is_empty());
        let selection = greedy_selection(&[], &[1.0], &MSE, Task::Regression, 5);
        assert!(selection.weights.is_empty());
    }

    #[test]
    fn test_selection_prefers_perfect_candidate() {
        let y = [2.0, 1.0, 1.0, 2.0];
        let candidates = vec![vec![1.0; 4], y.to_vec(), vec![1.0, 2.0, 2.0, 1.0]];
        let selection = greedy_selection(&candidates, &y, &ACCURACY, Task::Classification, 10);
        assert_eq!(selection.weights, vec![0.0, 1.0, 0.0]);
        assert_eq!(selection.cost, 0.0);
    }

    #[test]
    fn test_selection_blends_regressors() {
        // Each candidate is off by one in opposite directions; the blend is exact.
        let y = [2.0, 4.0, 6.0];
        let candidates = vec![vec![1.0, 3.0, 5.0], vec![3.0, 5.0, 7.0]];
        let selection = greedy_selection(&candidates, &y, &MSE, Task::Regression, 4);
        assert_eq!(selection.weights, vec![0.5, 0.5]);
        assert!(selection.cost.abs() < 1e-12);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let candidates = vec![
            vec![1.5, 2.0, 2.5, 4.0],
            vec![0.0, 2.0, 3.5, 5.0],
            vec![1.0, 1.0, 3.0, 3.0],
        ];
        let selection = greedy_selection(&candidates, &y, &MSE, Task::Regression, 7);
        let total: f64 = selection.weights.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_rounds_picks_single_best() {
        let y = [1.0, 2.0];
        let candidates = vec![vec![0.0, 0.0], vec![1.0, 2.5]];
        let selection = greedy_selection(&candidates, &y, &MSE, Task::Regression, 0);
        assert_eq!(selection.weights, vec![0.0, 1.0]);
    }
}
