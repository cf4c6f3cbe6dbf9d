//! # Building a Model From Scratch
//!
//! A two-input, two-output controller that shows compound antecedents,
//! rules with several targets, rule weights, alternative defuzzification and
//! the step-by-step `Simulation` API.
//!
//! Run with:
//! ```bash
//! cargo run --example custom_model
//! ```

use mamdani_rs::expression::{is, not};
use mamdani_rs::{
    Defuzzification, FuzzyError, MembershipFunction, ModelBuilder, Outcome, RuleDefinition,
    Universe, Variable,
};

fn main() -> Result<(), FuzzyError> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("🌡️  Greenhouse Climate Controller");
    println!("=================================\n");

    let model = ModelBuilder::new()
        .variable(
            Variable::antecedent("temperature", Universe::new(0.0, 45.0, 0.5)?)
                .with_term("cold", MembershipFunction::trapezoidal(0.0, 0.0, 12.0, 20.0)?)
                .with_term("comfortable", MembershipFunction::triangular(15.0, 22.0, 29.0)?)
                .with_term("hot", MembershipFunction::trapezoidal(25.0, 32.0, 45.0, 45.0)?),
        )
        .variable(
            Variable::antecedent("humidity", Universe::new(0.0, 100.0, 1.0)?)
                .with_term("dry", MembershipFunction::trapezoidal(0.0, 0.0, 30.0, 50.0)?)
                .with_term("humid", MembershipFunction::trapezoidal(50.0, 70.0, 100.0, 100.0)?),
        )
        .variable(
            Variable::consequent("vent", Universe::new(0.0, 100.0, 1.0)?)
                .with_term("closed", MembershipFunction::triangular(0.0, 0.0, 40.0)?)
                .with_term("half", MembershipFunction::triangular(20.0, 50.0, 80.0)?)
                .with_term("open", MembershipFunction::triangular(60.0, 100.0, 100.0)?),
        )
        .variable(
            Variable::consequent_with(
                "mister",
                Universe::new(0.0, 10.0, 0.1)?,
                Defuzzification::MeanOfMaximum,
            )
                .with_term("off", MembershipFunction::trapezoidal(0.0, 0.0, 1.0, 3.0)?)
                .with_term("on", MembershipFunction::trapezoidal(5.0, 8.0, 10.0, 10.0)?),
        )
        .rule(
            RuleDefinition::new("heat wave", is("temperature", "hot").and(is("humidity", "dry")))
                .then("vent", "open")
                .then("mister", "on"),
        )
        .rule(
            RuleDefinition::new("muggy", is("temperature", "hot").and(is("humidity", "humid")))
                .then("vent", "open"),
        )
        .rule(RuleDefinition::new("mild", is("temperature", "comfortable")).then("vent", "half"))
        .rule(
            RuleDefinition::new("keep warm", is("temperature", "cold"))
                .then("vent", "closed")
                .then("mister", "off"),
        )
        .rule(
            RuleDefinition::new(
                "dry air",
                is("humidity", "dry").and(not(is("temperature", "cold"))),
            )
                .then("mister", "on")
                .with_weight(0.6),
        )
        .build()?;

    println!("📜 Rules:");
    for rule in model.rules() {
        println!("   {rule}");
    }

    println!("\n🔁 Simulation:");
    let mut simulation = model.simulation();
    for (temperature, humidity) in [(8.0, 60.0), (22.0, 40.0), (34.0, 20.0), (34.0, 85.0)] {
        simulation.set_input("temperature", temperature)?;
        simulation.set_input("humidity", humidity)?;
        let result = simulation.compute()?;

        print!("   {temperature:>4.1} °C, {humidity:>3.0}% RH ->");
        for output in result.outputs() {
            match &output.outcome {
                Outcome::Crisp(value) => print!("  {} {value:>6.2}", output.name),
                Outcome::Undefined => print!("  {} (no rule fired)", output.name),
                Outcome::OutOfDomain { variable, .. } => {
                    print!("  {} (bad {variable})", output.name);
                }
            }
        }
        println!();
    }

    Ok(())
}
