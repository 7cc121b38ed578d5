//! Label / prediction sequence type.

use serde::{Deserialize, Serialize};

/// Sequence of targets, row-aligned with a [`Dataset`](crate::Dataset).
///
/// Class labels are stored as their numeric value; predictions returned by
/// engines use the same type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(Vec<f64>);

/// Predictions are labels produced by an engine.
pub type Predictions = Labels;

impl Labels {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Gather the given positions, in order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self(indices.iter().map(|&i| self.0[i]).collect())
    }

    /// Sorted distinct values. NaN entries are dropped.
    pub fn unique(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.0.iter().copied().filter(|v| !v.is_nan()).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }
}

impl From<Vec<f64>> for Labels {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for Labels {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl From<Vec<usize>> for Labels {
    fn from(values: Vec<usize>) -> Self {
        Self(values.into_iter().map(|v| v as f64).collect())
    }
}

impl From<Vec<i32>> for Labels {
    fn from(values: Vec<i32>) -> Self {
        Self(values.into_iter().map(f64::from).collect())
    }
}

impl From<Vec<i64>> for Labels {
    fn from(values: Vec<i64>) -> Self {
        Self(values.into_iter().map(|v| v as f64).collect())
    }
}

impl From<Vec<bool>> for Labels {
    fn from(values: Vec<bool>) -> Self {
        Self(values.into_iter().map(|v| if v { 1.0 } else { 0.0 }).collect())
    }
}

impl FromIterator<f64> for Labels {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_agree() {
        let a = Labels::from(vec![0usize, 1, 1]);
        let b = Labels::from(vec![0i32, 1, 1]);
        let c = Labels::from(vec![false, true, true]);
        let d = Labels::from(vec![0.0, 1.0, 1.0]);
        assert_eq!(a, d);
        assert_eq!(b, d);
        assert_eq!(c, d);
    }

    #[test]
    fn test_unique_sorted() {
        let y = Labels::from(vec![2.0, 0.0, 1.0, 2.0, f64::NAN, 0.0]);
        assert_eq!(y.unique(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_select() {
        let y = Labels::from(vec![10.0, 20.0, 30.0]);
        assert_eq!(y.select(&[2, 0]).as_slice(), &[30.0, 10.0]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let y = Labels::from(vec![1.0, 0.0]);
        assert_eq!(serde_json::to_string(&y).unwrap(), "[1.0,0.0]");
    }
}
