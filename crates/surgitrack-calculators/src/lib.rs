//! surgitrack-calculators
//!
//! Perioperative risk calculators. Pure computation — no storage.
//! Defines each calculator's parameter schema and its scoring formula.

pub mod calculators;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod input;
pub mod parameters;
pub mod result;

use catalog::{CalculationType, RiskCalculator};
use error::CalculatorError;
use input::CalculatorInput;
use parameters::ParameterBag;

/// Trait implemented by each supported risk calculator.
pub trait Calculator: Send + Sync {
    fn calculation_type(&self) -> CalculationType;

    /// Stable identifier (e.g., "rcri", "surgical_apgar").
    fn id(&self) -> &'static str {
        self.calculation_type().as_str()
    }

    /// Name, descriptive text and parameter schema.
    fn definition(&self) -> &RiskCalculator;

    /// Build the typed input from a name-keyed bag.
    fn parse_parameters(&self, params: &ParameterBag) -> Result<CalculatorInput, CalculatorError>;
}

/// Return all registered calculators.
pub fn all_calculators() -> Vec<Box<dyn Calculator>> {
    vec![
        Box::new(calculators::rcri::Rcri),
        Box::new(calculators::surgical_apgar::SurgicalApgar),
        Box::new(calculators::asa::Asa),
        Box::new(calculators::possum::Possum),
        Box::new(calculators::caprini::Caprini),
    ]
}

/// Look up a calculator by ID.
pub fn get_calculator(id: &str) -> Option<Box<dyn Calculator>> {
    let calculation_type = id.parse::<CalculationType>().ok()?;
    calculator_for(calculation_type)
}

/// Look up the calculator implementing `calculation_type`, if any.
pub fn calculator_for(calculation_type: CalculationType) -> Option<Box<dyn Calculator>> {
    all_calculators()
        .into_iter()
        .find(|c| c.calculation_type() == calculation_type)
}
