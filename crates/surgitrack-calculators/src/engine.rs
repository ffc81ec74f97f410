//! Scoring entry points.
//!
//! [`score`] works on typed inputs and cannot fail. [`calculate`] is the
//! name-keyed boundary: it checks the parameter bag against the calculator's
//! declared schema and rejects anything that does not fit instead of
//! substituting defaults.

use crate::calculators::{asa, caprini, possum, rcri, surgical_apgar};
use crate::catalog::RiskCalculator;
use crate::error::CalculatorError;
use crate::input::CalculatorInput;
use crate::parameters::ParameterBag;
use crate::result::CalculationResult;

pub fn score(input: &CalculatorInput) -> CalculationResult {
    match input {
        CalculatorInput::Rcri(input) => rcri::score(input),
        CalculatorInput::SurgicalApgar(input) => surgical_apgar::score(input),
        CalculatorInput::Asa(input) => asa::score(input),
        CalculatorInput::Possum(input) => possum::score(input),
        CalculatorInput::Caprini(input) => caprini::score(input),
    }
}

/// Score a name-keyed parameter bag for `calculator`.
///
/// Calculators without a formula (MELD, Child-Pugh) produce
/// [`CalculationResult::unsupported`].
pub fn calculate(
    calculator: &RiskCalculator,
    params: &ParameterBag,
) -> Result<CalculationResult, CalculatorError> {
    let Some(implementation) = crate::calculator_for(calculator.calculation_type) else {
        tracing::debug!(
            calculator = %calculator.calculation_type,
            "no scoring formula registered"
        );
        return Ok(CalculationResult::unsupported(calculator.calculation_type));
    };

    let errors = calculator.validate(params);
    if !errors.is_empty() {
        tracing::debug!(
            calculator = %calculator.calculation_type,
            problems = errors.len(),
            "rejected parameter bag"
        );
        return Err(CalculatorError::InvalidParameters {
            calculator: calculator.name.clone(),
            errors,
        });
    }

    let input = implementation.parse_parameters(params)?;
    let result = score(&input);
    tracing::debug!(
        calculator = %calculator.calculation_type,
        score = result.score,
        risk = result.risk_percentage,
        "calculation complete"
    );
    Ok(result)
}
