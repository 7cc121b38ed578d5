//! Description of the ensemble an engine selected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One ensemble member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleMember {
    pub model_id: usize,
    /// Leaderboard rank of the member.
    pub rank: usize,
    pub model: String,
    pub weight: f64,
    /// Validation cost of the member on its own.
    pub cost: f64,
}

/// Full description of a fitted ensemble.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnsembleDescription {
    /// Task the ensemble was built for (e.g. `classification`).
    pub task: String,
    pub metric: String,
    /// Optional dataset name passed as a fit option.
    pub dataset_name: Option<String>,
    /// Validation cost of the weighted ensemble.
    pub ensemble_cost: f64,
    pub members: Vec<EnsembleMember>,
}

impl EnsembleDescription {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member weights (1 for a non-empty ensemble).
    pub fn total_weight(&self) -> f64 {
        self.members.iter().map(|m| m.weight).sum()
    }
}

impl fmt::Display for EnsembleDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ensemble({} members, task={}, metric={}, cost={:.6})",
            self.members.len(),
            self.task,
            self.metric,
            self.ensemble_cost
        )?;
        for member in &self.members {
            writeln!(
                f,
                "  [{:>3}] weight={:.4} rank={} cost={:.6} {}",
                member.model_id, member.weight, member.rank, member.cost, member.model
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_weight() {
        let description = EnsembleDescription {
            task: "classification".to_string(),
            metric: "accuracy".to_string(),
            dataset_name: None,
            ensemble_cost: 0.05,
            members: vec![
                EnsembleMember {
                    model_id: 3,
                    rank: 1,
                    model: "knn".to_string(),
                    weight: 0.75,
                    cost: 0.06,
                },
                EnsembleMember {
                    model_id: 7,
                    rank: 2,
                    model: "centroid".to_string(),
                    weight: 0.25,
                    cost: 0.08,
                },
            ],
        };

        assert_eq!(description.len(), 2);
        assert!((description.total_weight() - 1.0).abs() < 1e-12);
        assert!(description.to_string().contains("2 members"));
    }

    #[test]
    fn test_json_shape() {
        let description = EnsembleDescription {
            task: "regression".to_string(),
            metric: "mae".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&description).unwrap();
        assert_eq!(json["task"], "regression");
        assert!(json["members"].as_array().unwrap().is_empty());
    }
}
