//! Showcase: search, score and inspect an ensemble on a synthetic dataset
//!
//! Run with: cargo run --example showcase -p automl
//! Set RUST_LOG=automl_core=debug to watch individual candidates.

use automl::prelude::*;
use tracing_subscriber::EnvFilter;

fn dataset(n: usize) -> (Dataset, Labels) {
    let mut rows = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64;
        let a = (t * 0.37).sin() * 3.0;
        let b = (t * 0.91).cos() * 3.0;
        rows.push([a, b]);
        labels.push(a * b > 0.0);
    }
    (Dataset::from(rows), Labels::from(labels))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("automl_core=info")),
        )
        .init();

    println!("=== automl showcase ===\n");

    let (x, y) = dataset(500);
    println!("1. Data: {} rows x {} columns\n", x.n_rows(), x.n_cols());

    let options = EngineConfig::new()
        .time_left_for_this_task(120)
        .per_run_time_limit(30)
        .ensemble_size(25)
        .seed(7)
        .build();
    let mut automl: AutoML = AutoML::new("accuracy", &options)?;
    println!("2. Constructed: {}\n", automl);

    if let Err(e) = automl.predict(&x) {
        println!("3. Predict before fit: {}\n", e);
    }

    let split = SplitConfig::new().test_size(0.2).random_state(0).build();
    let fit = FitConfig::new().dataset_name("quadrants").build();
    automl.fit_with(&x, &y, &split, &fit)?;
    println!("4. Fitted: {}\n", automl);

    println!("5. Leaderboard\n{}", automl.leaderboard()?);
    println!("6. Ensemble\n{}", automl.ensemble()?);

    let predictions = automl.predict(&x)?;
    let ones = predictions.iter().filter(|&&p| p == 1.0).count();
    println!("7. Predicted {} of {} rows as class 1", ones, predictions.len());

    if let Err(e) = AutoML::<CandidateSearch>::new("balanced_accuracy", &Options::new()) {
        println!("\n8. Unknown metric: {}", e);
    }

    Ok(())
}
