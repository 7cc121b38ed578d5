//! Ranked table of candidates evaluated during search.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    Success,
    Timeout,
    Crashed,
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateStatus::Success => write!(f, "Success"),
            CandidateStatus::Timeout => write!(f, "Timeout"),
            CandidateStatus::Crashed => write!(f, "Crashed"),
        }
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position, best first.
    pub rank: usize,
    /// Engine-assigned candidate id.
    pub model_id: usize,
    /// Human-readable candidate description.
    pub model: String,
    /// Weight in the final ensemble (0 when not selected).
    pub ensemble_weight: f64,
    /// Validation cost (lower is better); `None` unless the run succeeded.
    pub cost: Option<f64>,
    /// Wall time spent on the candidate.
    pub duration_secs: f64,
    pub status: CandidateStatus,
}

/// Candidates ranked by validation cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Name of the metric the costs were computed with.
    pub metric: String,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(metric: impl Into<String>, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            metric: metric.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeaderboardEntry> {
        self.entries.iter()
    }

    /// Top-ranked entry.
    pub fn best(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    /// Entries that were selected into the ensemble.
    pub fn ensemble_members(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries.iter().filter(|e| e.ensemble_weight > 0.0)
    }
}

impl fmt::Display for Leaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4}  {:>8}  {:<44}  {:>8}  {:>10}  {:>9}  {}",
            "rank", "model_id", "model", "weight", "cost", "duration", "status"
        )?;
        for entry in &self.entries {
            let cost = entry
                .cost
                .map_or_else(|| "-".to_string(), |c| format!("{:.6}", c));
            writeln!(
                f,
                "{:>4}  {:>8}  {:<44}  {:>8.4}  {:>10}  {:>8.3}s  {}",
                entry.rank,
                entry.model_id,
                entry.model,
                entry.ensemble_weight,
                cost,
                entry.duration_secs,
                entry.status
            )?;
        }
        Ok(())
    }
}
