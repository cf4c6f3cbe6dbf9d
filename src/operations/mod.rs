pub mod defuzzification;
pub mod implication;
pub mod logical;

pub use defuzzification::Defuzzification;
pub use logical::FuzzyLogic;
