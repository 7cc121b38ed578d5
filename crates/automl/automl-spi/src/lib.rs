//! AutoML Service Provider Interface
//!
//! Defines the contracts behind the AutoML facade:
//! - Search engine and splitter traits
//! - Data model shared with collaborators
//! - The error type every layer returns

pub mod contract;
pub mod error;
pub mod model;

pub use contract::{SearchEngine, Splitter};
pub use error::{AutoMLError, NOT_FITTED_MESSAGE};
pub use model::{
    CandidateStatus, Dataset, EngineScorer, EnsembleDescription, EnsembleMember, Labels,
    Leaderboard, LeaderboardEntry, MetricFn, Options, Predictions, Split,
};

/// Result type for AutoML operations.
pub type Result<T> = std::result::Result<T, AutoMLError>;
