//! # Batch Inference
//!
//! Scores a synthetic cohort sequentially and on the rayon thread pool and
//! reports the risk distribution.
//!
//! Run with:
//! ```bash
//! cargo run --example batch_inference --features parallel --release
//! ```

use std::collections::BTreeMap;
use std::time::Instant;

use mamdani_rs::clinical::{HEALTH, heart_disease_model, risk_classifier};
use mamdani_rs::{FuzzyError, InferenceConfig, InputSnapshot, RiskLevel};

const COHORT_SIZE: u32 = 20_000;

/// Deterministic pseudo-random cohort spread over every universe.
fn cohort() -> Vec<InputSnapshot> {
    (0..COHORT_SIZE)
        .map(|i| {
            let spread = |period: u32| {
                f64::from(i.wrapping_mul(2_654_435_761) % period) / f64::from(period)
            };
            InputSnapshot::new()
                .with("age", 18.0 + 70.0 * spread(97))
                .with("ecg", 2.0 * spread(89))
                .with("blood_pressure", 100.0 + 100.0 * spread(83))
                .with("blood_sugar", 70.0 + 90.0 * spread(79))
                .with("cholesterol", 120.0 + 230.0 * spread(73))
                .with("maximum_heart_rate", 70.0 + 140.0 * spread(71))
                .with("old_peak", 6.0 * spread(67))
                .with("sex", f64::from(i % 2))
                .with("chest_pain", f64::from(1 + i % 4))
                .with("exercise", f64::from((i / 3) % 2))
        })
        .collect()
}

fn main() -> Result<(), FuzzyError> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("⚡ Batch Heart Disease Scoring");
    println!("==============================\n");

    let model = heart_disease_model()?;
    let classifier = risk_classifier()?;
    let config = InferenceConfig::default();
    let snapshots = cohort();

    let start = Instant::now();
    let sequential = model.infer_batch(&snapshots, &config);
    println!("  Sequential: {} patients in {:.2?}", sequential.len(), start.elapsed());

    let start = Instant::now();
    let parallel = model.infer_batch_par(&snapshots, &config);
    println!("  Parallel:   {} patients in {:.2?}", parallel.len(), start.elapsed());

    assert_eq!(sequential, parallel, "parallel results must match sequential");

    let mut distribution: BTreeMap<RiskLevel, usize> = BTreeMap::new();
    let mut undefined = 0;
    for result in parallel {
        match result?.crisp(HEALTH) {
            Ok(health) => {
                if let Some(level) = classifier.classify(health) {
                    *distribution.entry(level).or_default() += 1;
                }
            }
            Err(FuzzyError::UndefinedDefuzzification { .. }) => undefined += 1,
            Err(err) => return Err(err),
        }
    }

    println!("\n📊 Risk distribution:");
    for level in RiskLevel::ALL {
        let count = distribution.get(&level).copied().unwrap_or(0);
        println!("   {level:<15} {count:>6}");
    }
    if undefined > 0 {
        println!("   {:<15} {undefined:>6}", "undefined");
    }

    Ok(())
}
