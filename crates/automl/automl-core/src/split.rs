//! Train / holdout splitting

use automl_api::{split_keys, DEFAULT_TEST_SIZE};
use automl_spi::{AutoMLError, Dataset, Labels, Options, Result, Split, Splitter};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Random train / test splitter.
///
/// Options:
/// - `test_size`: float fraction in (0, 1) or integer row count (default 0.25)
/// - `train_size`: fraction or count; defaults to the complement of the test set
/// - `shuffle`: permute rows before splitting (default true)
/// - `random_state`: seed for the permutation
/// - `stratify`: keep class proportions in both partitions (default false)
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainTestSplit;

impl TrainTestSplit {
    pub fn new() -> Self {
        Self
    }
}

/// A partition size. Integer JSON values count rows, floats are fractions,
/// so `1.0` is an invalid fraction rather than one row.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Size {
    Fraction(f64),
    Rows(u64),
}

impl Size {
    fn from_options(options: &Options, key: &str) -> Result<Option<Self>> {
        match options.get(key).and_then(|v| v.as_u64()) {
            Some(rows) => Ok(Some(Size::Rows(rows))),
            None => Ok(options.get_f64(key)?.map(Size::Fraction)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SplitSettings {
    test_size: Option<Size>,
    train_size: Option<Size>,
    shuffle: bool,
    random_state: Option<u64>,
    stratify: bool,
}

impl SplitSettings {
    fn from_options(options: &Options) -> Result<Self> {
        let settings = Self {
            test_size: Size::from_options(options, split_keys::TEST_SIZE)?,
            train_size: Size::from_options(options, split_keys::TRAIN_SIZE)?,
            shuffle: options.get_bool(split_keys::SHUFFLE)?.unwrap_or(true),
            random_state: options.get_u64(split_keys::RANDOM_STATE)?,
            stratify: options.get_bool(split_keys::STRATIFY)?.unwrap_or(false),
        };

        if settings.stratify && !settings.shuffle {
            return Err(AutoMLError::InvalidParameter {
                name: split_keys::STRATIFY.to_string(),
                reason: "stratified splitting requires shuffle=true".to_string(),
            });
        }

        Ok(settings)
    }

    /// `(n_train, n_test)` for `n_samples` rows.
    fn sizes(&self, n_samples: usize) -> Result<(usize, usize)> {
        let n_test = self
            .test_size
            .map(|size| resolve_size(split_keys::TEST_SIZE, size, n_samples, true))
            .transpose()?;
        let n_train = self
            .train_size
            .map(|size| resolve_size(split_keys::TRAIN_SIZE, size, n_samples, false))
            .transpose()?;

        let (n_train, n_test) = match (n_train, n_test) {
            (None, None) => {
                let default = Size::Fraction(DEFAULT_TEST_SIZE);
                let n_test = resolve_size(split_keys::TEST_SIZE, default, n_samples, true)?;
                (n_samples.saturating_sub(n_test), n_test)
            }
            (None, Some(n_test)) => (n_samples.saturating_sub(n_test), n_test),
            (Some(n_train), None) => (n_train, n_samples.saturating_sub(n_train)),
            (Some(n_train), Some(n_test)) => (n_train, n_test),
        };

        if n_train + n_test > n_samples {
            return Err(AutoMLError::InvalidParameter {
                name: split_keys::TRAIN_SIZE.to_string(),
                reason: format!(
                    "train ({}) + test ({}) exceeds the {} available rows",
                    n_train, n_test, n_samples
                ),
            });
        }

        if n_train == 0 || n_test == 0 {
            return Err(AutoMLError::InsufficientData {
                required: 2,
                actual: n_samples,
            });
        }

        Ok((n_train, n_test))
    }
}

/// Fractions round up for the test side and down for the train side.
fn resolve_size(name: &str, size: Size, n_samples: usize, round_up: bool) -> Result<usize> {
    let invalid = |reason: String| AutoMLError::InvalidParameter {
        name: name.to_string(),
        reason,
    };

    match size {
        Size::Fraction(fraction) if fraction > 0.0 && fraction < 1.0 => {
            let exact = fraction * n_samples as f64;
            let rows = if round_up { exact.ceil() } else { exact.floor() };
            Ok(rows as usize)
        }
        Size::Fraction(fraction) => Err(invalid(format!(
            "must be a fraction in (0, 1) or an integer row count, got {}",
            fraction
        ))),
        Size::Rows(0) => Err(invalid("row count must be at least 1".to_string())),
        Size::Rows(rows) => match usize::try_from(rows) {
            Ok(rows) if rows <= n_samples => Ok(rows),
            _ => Err(invalid(format!(
                "{} rows requested but only {} available",
                rows, n_samples
            ))),
        },
    }
}

/// Largest-remainder apportionment of `total` across groups in proportion to
/// `weights`, never giving a group more than its cap.
fn apportion(total: usize, weights: &[usize], caps: &[usize]) -> Vec<usize> {
    let weight_sum: usize = weights.iter().sum();
    if weight_sum == 0 {
        return vec![0; weights.len()];
    }

    let quotas: Vec<f64> = weights
        .iter()
        .map(|&w| total as f64 * w as f64 / weight_sum as f64)
        .collect();
    let mut counts: Vec<usize> = quotas
        .iter()
        .zip(caps.iter())
        .map(|(&q, &cap)| (q.floor() as usize).min(cap))
        .collect();

    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = quotas[a] - quotas[a].floor();
        let fb = quotas[b] - quotas[b].floor();
        fb.total_cmp(&fa)
    });

    let mut remaining = total.saturating_sub(counts.iter().sum());
    while remaining > 0 {
        let mut progressed = false;
        for &i in &order {
            if remaining == 0 {
                break;
            }
            if counts[i] < caps[i] {
                counts[i] += 1;
                remaining -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    counts
}

fn stratified_indices<R: Rng>(
    y: &Labels,
    n_train: usize,
    n_test: usize,
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let classes = y.unique();
    let mut groups: Vec<Vec<usize>> = classes
        .iter()
        .map(|&class| {
            y.iter()
                .enumerate()
                .filter(|(_, &v)| v == class)
                .map(|(i, _)| i)
                .collect()
        })
        .collect();
    for group in &mut groups {
        group.shuffle(rng);
    }

    let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
    let test_counts = apportion(n_test, &sizes, &sizes);
    let spare: Vec<usize> = sizes
        .iter()
        .zip(test_counts.iter())
        .map(|(s, t)| s - t)
        .collect();
    let train_counts = apportion(n_train, &sizes, &spare);

    let mut test = Vec::with_capacity(n_test);
    let mut train = Vec::with_capacity(n_train);
    for ((group, &t), &r) in groups.iter().zip(test_counts.iter()).zip(train_counts.iter()) {
        test.extend_from_slice(&group[..t]);
        train.extend_from_slice(&group[t..t + r]);
    }
    test.shuffle(rng);
    train.shuffle(rng);

    (train, test)
}

fn shuffled_indices<R: Rng>(
    y: &Labels,
    (n_train, n_test): (usize, usize),
    stratify: bool,
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    if stratify {
        return stratified_indices(y, n_train, n_test, rng);
    }
    let mut permutation: Vec<usize> = (0..y.len()).collect();
    permutation.shuffle(rng);
    let test = permutation[..n_test].to_vec();
    let train = permutation[n_test..n_test + n_train].to_vec();
    (train, test)
}

impl Splitter for TrainTestSplit {
    fn split(&self, x: &Dataset, y: &Labels, options: &Options) -> Result<Split> {
        let n_samples = x.n_rows();
        if n_samples != y.len() {
            return Err(AutoMLError::InvalidData(format!(
                "x has {} rows but y has {} labels",
                n_samples,
                y.len()
            )));
        }

        for key in options.unknown_keys(&split_keys::ALL) {
            debug!(key, "ignoring unrecognized split option");
        }

        let settings = SplitSettings::from_options(options)?;
        let (n_train, n_test) = settings.sizes(n_samples)?;

        let (train, test) = match (settings.shuffle, settings.random_state) {
            (false, _) => {
                let train: Vec<usize> = (0..n_train).collect();
                let test: Vec<usize> = (n_train..n_train + n_test).collect();
                (train, test)
            }
            (true, Some(seed)) => shuffled_indices(
                y,
                (n_train, n_test),
                settings.stratify,
                &mut StdRng::seed_from_u64(seed),
            ),
            (true, None) => shuffled_indices(
                y,
                (n_train, n_test),
                settings.stratify,
                &mut rand::thread_rng(),
            ),
        };

        debug!(
            n_samples,
            n_train = train.len(),
            n_test = test.len(),
            shuffle = settings.shuffle,
            stratify = settings.stratify,
            "split dataset"
        );

        Ok(Split {
            x_train: x.select(&train),
            x_test: x.select(&test),
            y_train: y.select(&train),
            y_test: y.select(&test),
        })
    }
}
