use serde::{Deserialize, Serialize};
use surgitrack_core::models::StoredCalculation;
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::{CalculationType, RiskCalculator};

/// Output of a single calculation.
///
/// `score` is in the calculator's own points. `risk_percentage` is 0–100 and
/// means mortality, complication or VTE risk depending on the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculationResult {
    pub score: f64,
    pub risk_percentage: f64,
    pub interpretation: String,
}

impl CalculationResult {
    pub fn new(score: f64, risk_percentage: f64, interpretation: impl Into<String>) -> Self {
        Self {
            score,
            risk_percentage,
            interpretation: interpretation.into(),
        }
    }

    /// Zeroed result for a calculator with no scoring formula.
    pub fn unsupported(calculation_type: CalculationType) -> Self {
        Self::new(
            0.0,
            0.0,
            format!("Calculation for '{calculation_type}' is not yet implemented."),
        )
    }

    /// Copy this result into a history record for `patient_id`.
    pub fn to_record(&self, patient_id: Uuid, calculator: &RiskCalculator) -> StoredCalculation {
        StoredCalculation::new(
            patient_id,
            &calculator.name,
            self.score,
            self.risk_percentage,
            &self.interpretation,
        )
        .with_calculation_type(calculator.calculation_type.as_str())
    }
}
