//! AutoML Facade
//!
//! High-level API for automatic machine learning. Re-exports all public types
//! from the automl stack for convenient usage.
//!
//! # Example
//!
//! ```no_run
//! use automl_facade::prelude::*;
//!
//! let x = Dataset::from(vec![[0.0, 0.1], [0.2, 0.0], [5.0, 5.1], [5.2, 4.9]]);
//! let y = Labels::from(vec![0, 0, 1, 1]);
//!
//! let options = EngineConfig::new().time_left_for_this_task(30).build();
//! let mut automl: AutoML = AutoML::new("accuracy", &options)?;
//! automl.fit(&x, &y)?;
//! println!("{}", automl);
//! println!("{}", automl.leaderboard()?);
//! # Ok::<(), AutoMLError>(())
//! ```

// Re-export everything from core (which includes API and SPI)
pub use automl_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Traits
    pub use automl_spi::{SearchEngine, Splitter};

    // Configuration
    pub use automl_api::{EngineConfig, FitConfig, MetricName, SplitConfig, Task};

    // Data and error types
    pub use automl_spi::{
        AutoMLError, Dataset, EnsembleDescription, Labels, Leaderboard, Options, Predictions,
        Result,
    };

    // Implementations
    pub use automl_core::{AutoML, CandidateSearch, FitState, TrainTestSplit};
}
