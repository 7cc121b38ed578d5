//! Model module containing AutoML data structures.
//!
//! This module defines the data exchanged between the facade and its
//! collaborators:
//! - [`Dataset`] / [`Labels`] - row-aligned features and targets
//! - [`Options`] - opaque configuration dictionaries
//! - [`EngineScorer`] - metric object handed to search engines
//! - [`Leaderboard`] / [`EnsembleDescription`] - search results
//! - [`Split`] - train / holdout partition

mod dataset;
mod ensemble_description;
mod labels;
mod leaderboard;
mod options;
mod scorer;
mod split;

pub use dataset::Dataset;
pub use ensemble_description::{EnsembleDescription, EnsembleMember};
pub use labels::{Labels, Predictions};
pub use leaderboard::{CandidateStatus, Leaderboard, LeaderboardEntry};
pub use options::Options;
pub use scorer::{EngineScorer, MetricFn};
pub use split::Split;
