//! Train / holdout partition.

use super::{Dataset, Labels};

/// Result of splitting a dataset: disjoint training and holdout subsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub x_train: Dataset,
    pub x_test: Dataset,
    pub y_train: Labels,
    pub y_test: Labels,
}

impl Split {
    /// `(x_train, x_test, y_train, y_test)`
    pub fn into_parts(self) -> (Dataset, Dataset, Labels, Labels) {
        (self.x_train, self.x_test, self.y_train, self.y_test)
    }
}
