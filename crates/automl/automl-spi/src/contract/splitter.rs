//! Train / holdout splitter trait for AutoML.

use crate::error::AutoMLError;
use crate::model::{Dataset, Labels, Options, Split};

/// Result type for splitter operations.
pub type Result<T> = std::result::Result<T, AutoMLError>;

/// Partitions row-aligned features and labels into training and holdout
/// subsets. Options (fraction, shuffling, seed) are interpreted by the
/// implementor only.
pub trait Splitter {
    fn split(&self, x: &Dataset, y: &Labels, options: &Options) -> Result<Split>;
}

impl<S: Splitter + ?Sized> Splitter for &S {
    fn split(&self, x: &Dataset, y: &Labels, options: &Options) -> Result<Split> {
        (**self).split(x, y, options)
    }
}

impl<S: Splitter + ?Sized> Splitter for Box<S> {
    fn split(&self, x: &Dataset, y: &Labels, options: &Options) -> Result<Split> {
        (**self).split(x, y, options)
    }
}
