//! Contract module containing AutoML traits.
//!
//! This module defines the collaborators the facade drives:
//! - [`SearchEngine`] - Architecture search and ensemble construction
//! - [`Splitter`] - Train / holdout partitioning

mod search_engine;
mod splitter;

pub use search_engine::SearchEngine;
pub use splitter::Splitter;
