//! Error module containing AutoML error types.
//!
//! This module defines the single error type shared by the facade and its
//! collaborators.

mod automl_error;

pub use automl_error::{AutoMLError, NOT_FITTED_MESSAGE};
