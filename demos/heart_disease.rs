//! # Heart Disease Risk Assessment
//!
//! Runs the clinical rule base on one patient, shows which rules fired and
//! maps the crisp `health` score to a risk level.
//!
//! Run with:
//! ```bash
//! cargo run --example heart_disease
//! ```

use mamdani_rs::clinical::{HEALTH, heart_disease_model, risk_classifier};
use mamdani_rs::{FuzzyError, InferenceConfig, InputSnapshot, OutOfDomainPolicy};
use tracing::Level;

fn main() -> Result<(), FuzzyError> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    println!("🏥 Heart Disease Risk Assessment");
    println!("================================\n");

    let model = heart_disease_model()?;
    let classifier = risk_classifier()?;
    println!(
        "Model: {} inputs, {} rules\n",
        model.required_inputs().len(),
        model.rule_count()
    );

    let patient = InputSnapshot::new()
        .with("age", 75.0)
        .with("ecg", 1.0)
        .with("blood_pressure", 120.0)
        .with("blood_sugar", 100.0)
        .with("cholesterol", 120.0)
        .with("maximum_heart_rate", 200.0)
        .with("old_peak", 5.0)
        .with("chest_pain", 4.0)
        .with("exercise", 1.0)
        .with("sex", 1.0);

    println!("📊 Patient Measurements:");
    for name in model.antecedent_names() {
        if let Some(value) = patient.get(name) {
            println!("   {name:<20} {value:>7.2}");
        }
    }

    let result = model.infer(&patient)?;

    println!("\n🔬 Rules That Fired:");
    for activation in result.activations() {
        if let Some(strength) = activation.strength.filter(|&s| s > 0.0) {
            println!("   {:<8} strength {strength:.2}", activation.label);
        }
    }

    let health = result.crisp(HEALTH)?;
    println!("\n❤️  Health score: {health:.3}");
    match classifier.classify(health) {
        Some(level) => println!("   Risk level: {level}"),
        None => println!("   Risk level: outside the classification table"),
    }

    println!("\n⚠️  Out-of-range reading (maximum heart rate 650 bpm):");
    let noisy = patient.clone().with("maximum_heart_rate", 650.0);

    let clamped = model.infer(&noisy)?;
    for adjustment in clamped.adjustments() {
        println!(
            "   clamped {} from {} to {}",
            adjustment.variable, adjustment.given, adjustment.used
        );
    }
    println!("   health with clamping: {:.3}", clamped.crisp(HEALTH)?);

    let strict = InferenceConfig::default().with_out_of_domain(OutOfDomainPolicy::Reject);
    match model.infer_with(&noisy, &strict)?.crisp(HEALTH) {
        Ok(value) => println!("   health when rejecting: {value:.3}"),
        Err(err) => println!("   health when rejecting: {err}"),
    }

    Ok(())
}
