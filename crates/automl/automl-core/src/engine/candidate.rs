//! Candidate pipelines: a preprocessing step followed by a model family.

use std::fmt;

use aprender::classification::{GaussianNB, KNearestNeighbors};
use aprender::error::AprenderError;
use aprender::preprocessing::StandardScaler;
use aprender::primitives::Matrix;
use aprender::traits::Transformer;
use automl_api::Task;
use automl_spi::{AutoMLError, Dataset, Labels, Result};

/// Added to every per-class feature variance.
const VAR_SMOOTHING: f32 = 1e-9;

/// Distance floor for inverse-distance weighting.
const DISTANCE_EPS: f64 = 1e-12;

const NEIGHBOR_COUNTS: [usize; 6] = [1, 3, 5, 7, 9, 15];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preprocessing {
    None,
    Standardize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Most frequent class, or the mean target for regression.
    Baseline,
    NearestCentroid,
    KNearestNeighbors { k: usize, weighted: bool },
    GaussianNaiveBayes,
}

/// One point of the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateConfig {
    pub preprocessing: Preprocessing,
    pub family: ModelFamily,
}

impl fmt::Display for CandidateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            ModelFamily::Baseline => write!(f, "baseline")?,
            ModelFamily::NearestCentroid => write!(f, "nearest_centroid")?,
            ModelFamily::KNearestNeighbors { k, weighted } => write!(
                f,
                "k_nearest_neighbors(k={}, weights={})",
                k,
                if weighted { "distance" } else { "uniform" }
            )?,
            ModelFamily::GaussianNaiveBayes => write!(f, "gaussian_nb")?,
        }
        if self.preprocessing == Preprocessing::Standardize {
            write!(f, " + standardize")?;
        }
        Ok(())
    }
}

/// Every candidate for `task`, baseline first.
pub fn search_space(task: Task) -> Vec<CandidateConfig> {
    let mut space = vec![CandidateConfig {
        preprocessing: Preprocessing::None,
        family: ModelFamily::Baseline,
    }];

    let mut families = Vec::new();
    if task == Task::Classification {
        families.push(ModelFamily::NearestCentroid);
        families.push(ModelFamily::GaussianNaiveBayes);
    }
    for k in NEIGHBOR_COUNTS {
        for weighted in [false, true] {
            families.push(ModelFamily::KNearestNeighbors { k, weighted });
        }
    }

    for family in families {
        for preprocessing in [Preprocessing::None, Preprocessing::Standardize] {
            space.push(CandidateConfig {
                preprocessing,
                family,
            });
        }
    }

    space
}

/// Row-major `f32` copy of `x`, the layout aprender models consume.
fn to_matrix(x: &Dataset) -> Result<Matrix<f32>> {
    let values: Vec<f32> = x
        .rows()
        .flat_map(|row| row.iter().map(|&v| v as f32))
        .collect();
    Matrix::from_vec(x.n_rows(), x.n_cols(), values)
        .map_err(|e| AutoMLError::InvalidData(e.to_string()))
}

/// Sorted distinct labels and each target's index into them.
fn encode_labels(y: &Labels) -> (Vec<f64>, Vec<usize>) {
    let classes = y.unique();
    let indices = y
        .iter()
        .map(|v| {
            classes
                .binary_search_by(|c| c.total_cmp(v))
                .unwrap_or_default()
        })
        .collect();
    (classes, indices)
}

fn decode_labels(classes: &[f64], indices: Vec<usize>) -> Result<Vec<f64>> {
    indices
        .into_iter()
        .map(|i| {
            classes.get(i).copied().ok_or_else(|| {
                AutoMLError::PredictionError(format!("model returned unknown class index {i}"))
            })
        })
        .collect()
}

fn fit_error(e: AprenderError) -> AutoMLError {
    AutoMLError::FitError(e.to_string())
}

fn prediction_error(e: AprenderError) -> AutoMLError {
    AutoMLError::PredictionError(e.to_string())
}

#[derive(Debug, Clone)]
enum FittedModel {
    Constant(f64),
    Centroids {
        labels: Vec<f64>,
        centroids: Vec<Vec<f32>>,
    },
    Classifier {
        model: KNearestNeighbors,
        classes: Vec<f64>,
    },
    /// aprender's kNN only classifies, so regression averages neighbors here.
    Regressor {
        x: Matrix<f32>,
        y: Vec<f64>,
        k: usize,
        weighted: bool,
    },
    NaiveBayes {
        model: GaussianNB,
        classes: Vec<f64>,
    },
}

/// A candidate fitted on training data.
#[derive(Debug, Clone)]
pub struct FittedCandidate {
    scaler: Option<StandardScaler>,
    model: FittedModel,
}

impl CandidateConfig {
    pub fn fit(&self, x: &Dataset, y: &Labels, task: Task) -> Result<FittedCandidate> {
        if x.is_empty() {
            return Err(AutoMLError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let mut matrix = to_matrix(x)?;
        let scaler = match self.preprocessing {
            Preprocessing::None => None,
            Preprocessing::Standardize => {
                let mut scaler = StandardScaler::new();
                matrix = scaler.fit_transform(&matrix).map_err(fit_error)?;
                Some(scaler)
            }
        };

        let model = match (self.family, task) {
            (ModelFamily::Baseline, Task::Classification) => {
                FittedModel::Constant(most_frequent(y.as_slice()))
            }
            (ModelFamily::Baseline, Task::Regression) => {
                FittedModel::Constant(y.iter().sum::<f64>() / y.len() as f64)
            }
            (ModelFamily::NearestCentroid, _) => fit_centroids(&matrix, y),
            (ModelFamily::KNearestNeighbors { k, weighted }, Task::Classification) => {
                let (classes, targets) = encode_labels(y);
                let mut model =
                    KNearestNeighbors::new(k.clamp(1, x.n_rows())).with_weights(weighted);
                model.fit(&matrix, &targets).map_err(fit_error)?;
                FittedModel::Classifier { model, classes }
            }
            (ModelFamily::KNearestNeighbors { k, weighted }, Task::Regression) => {
                FittedModel::Regressor {
                    x: matrix,
                    y: y.as_slice().to_vec(),
                    k: k.clamp(1, x.n_rows()),
                    weighted,
                }
            }
            (ModelFamily::GaussianNaiveBayes, _) => {
                let (classes, targets) = encode_labels(y);
                let mut model = GaussianNB::new().with_var_smoothing(VAR_SMOOTHING);
                model.fit(&matrix, &targets).map_err(fit_error)?;
                FittedModel::NaiveBayes { model, classes }
            }
        };

        Ok(FittedCandidate { scaler, model })
    }
}

impl FittedCandidate {
    pub fn predict(&self, x: &Dataset) -> Result<Vec<f64>> {
        if x.is_empty() {
            return Ok(Vec::new());
        }

        let mut matrix = to_matrix(x)?;
        if let Some(scaler) = &self.scaler {
            matrix = scaler.transform(&matrix).map_err(prediction_error)?;
        }

        match &self.model {
            FittedModel::Constant(value) => Ok(vec![*value; x.n_rows()]),
            FittedModel::Centroids { labels, centroids } => Ok((0..matrix.n_rows())
                .map(|i| {
                    let nearest = centroids
                        .iter()
                        .map(|c| squared_distance(&matrix, i, c))
                        .enumerate()
                        .min_by(|a, b| a.1.total_cmp(&b.1))
                        .map_or(0, |(c, _)| c);
                    labels[nearest]
                })
                .collect()),
            FittedModel::Classifier { model, classes } => {
                let indices = model.predict(&matrix).map_err(prediction_error)?;
                decode_labels(classes, indices)
            }
            FittedModel::Regressor {
                x: train,
                y,
                k,
                weighted,
            } => Ok((0..matrix.n_rows())
                .map(|i| {
                    let row = matrix.row(i);
                    average_neighbors(train, y, row.as_slice(), *k, *weighted)
                })
                .collect()),
            FittedModel::NaiveBayes { model, classes } => {
                let indices = model.predict(&matrix).map_err(prediction_error)?;
                decode_labels(classes, indices)
            }
        }
    }
}

fn squared_distance(x: &Matrix<f32>, row: usize, point: &[f32]) -> f32 {
    point
        .iter()
        .enumerate()
        .map(|(j, p)| (x.get(row, j) - p).powi(2))
        .sum()
}

/// Most frequent value; ties go to the smallest value.
fn most_frequent(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut best = (f64::NAN, 0usize);
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        if j - i > best.1 {
            best = (sorted[i], j - i);
        }
        i = j.max(i + 1);
    }
    best.0
}

fn fit_centroids(x: &Matrix<f32>, y: &Labels) -> FittedModel {
    let (labels, targets) = encode_labels(y);
    let mut sums = vec![vec![0.0f32; x.n_cols()]; labels.len()];
    let mut counts = vec![0usize; labels.len()];
    for (i, &class) in targets.iter().enumerate() {
        counts[class] += 1;
        for (j, sum) in sums[class].iter_mut().enumerate() {
            *sum += x.get(i, j);
        }
    }
    let centroids = sums
        .into_iter()
        .zip(counts)
        .map(|(sum, count)| sum.into_iter().map(|s| s / count.max(1) as f32).collect())
        .collect();
    FittedModel::Centroids { labels, centroids }
}

fn average_neighbors(train: &Matrix<f32>, y: &[f64], row: &[f32], k: usize, weighted: bool) -> f64 {
    let mut distances: Vec<(f32, usize)> = (0..train.n_rows())
        .map(|i| (squared_distance(train, i, row), i))
        .collect();
    let k = k.clamp(1, distances.len());
    if k < distances.len() {
        distances.select_nth_unstable_by(k - 1, |a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    }

    let (sum, total) = distances[..k]
        .iter()
        .fold((0.0, 0.0), |(sum, total), &(d2, i)| {
            let weight = if weighted {
                1.0 / f64::from(d2).sqrt().max(DISTANCE_EPS)
            } else {
                1.0
            };
            (sum + weight * y[i], total + weight)
        });
    sum / total
}
