//! Feature table type.

use serde::{Deserialize, Serialize};

use crate::error::AutoMLError;
use crate::Result;

/// Row-major table of `f64` features.
///
/// Every row has the same width. Rows are addressed by position; the table
/// carries no column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    n_rows: usize,
    n_cols: usize,
    values: Vec<f64>,
}

impl Dataset {
    /// Build from a list of rows. Fails on ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(n_rows * n_cols);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(AutoMLError::InvalidData(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
            values.extend(row);
        }

        Ok(Self {
            n_rows,
            n_cols,
            values,
        })
    }

    /// Build from a flat row-major buffer with `n_cols` columns.
    pub fn from_flat(n_cols: usize, values: Vec<f64>) -> Result<Self> {
        if n_cols == 0 {
            if values.is_empty() {
                return Ok(Self::default());
            }
            return Err(AutoMLError::InvalidData(
                "zero columns with a non-empty buffer".to_string(),
            ));
        }
        if values.len() % n_cols != 0 {
            return Err(AutoMLError::InvalidData(format!(
                "buffer of {} values is not a multiple of {} columns",
                values.len(),
                n_cols
            )));
        }
        Ok(Self {
            n_rows: values.len() / n_cols,
            n_cols,
            values,
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of feature columns.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Borrow row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.n_rows, "row index {} out of bounds", i);
        &self.values[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows).map(move |i| self.row(i))
    }

    /// Gather the given rows, in the given order, into a new table.
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut values = Vec::with_capacity(indices.len() * self.n_cols);
        for &i in indices {
            values.extend_from_slice(self.row(i));
        }
        Self {
            n_rows: indices.len(),
            n_cols: self.n_cols,
            values,
        }
    }

    /// Flat row-major view of all values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<Vec<f64>>> for Dataset {
    type Error = AutoMLError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl<const N: usize> From<Vec<[f64; N]>> for Dataset {
    fn from(rows: Vec<[f64; N]>) -> Self {
        let n_rows = rows.len();
        let values = rows.into_iter().flatten().collect();
        Self {
            n_rows,
            n_cols: N,
            values,
        }
    }
}

impl<const N: usize> From<&[[f64; N]]> for Dataset {
    fn from(rows: &[[f64; N]]) -> Self {
        Self::from(rows.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let x = Dataset::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(x.n_rows(), 3);
        assert_eq!(x.n_cols(), 2);
        assert_eq!(x.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Dataset::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(AutoMLError::InvalidData(_))));
    }

    #[test]
    fn test_from_flat() {
        let x = Dataset::from_flat(3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(x.n_rows(), 2);
        assert_eq!(x.row(1), &[4.0, 5.0, 6.0]);

        assert!(Dataset::from_flat(4, vec![1.0, 2.0, 3.0]).is_err());
        assert!(Dataset::from_flat(0, vec![1.0]).is_err());
        assert!(Dataset::from_flat(0, vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_array_rows_are_equivalent() {
        let from_arrays = Dataset::from(vec![[1.0, 2.0], [3.0, 4.0]]);
        let from_vecs = Dataset::try_from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(from_arrays, from_vecs);
    }

    #[test]
    fn test_select_preserves_order() {
        let x = Dataset::from(vec![[0.0], [1.0], [2.0], [3.0]]);
        let picked = x.select(&[3, 0, 2]);
        let firsts: Vec<f64> = picked.rows().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![3.0, 0.0, 2.0]);
    }

    #[test]
    fn test_empty_dataset() {
        let x = Dataset::from_rows(vec![]).unwrap();
        assert!(x.is_empty());
        assert_eq!(x.rows().count(), 0);
    }
}
