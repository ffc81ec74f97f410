use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A historical risk calculation attached to a patient.
///
/// Holds a copy of the calculator output at the time it was run. Records are
/// never edited; they are only removed by explicit deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoredCalculation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub calculator_name: String,
    /// Snake-case calculator id (e.g. "rcri"), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_type: Option<String>,
    pub score: f64,
    pub risk_percentage: f64,
    pub interpretation: String,
    pub created_at: jiff::Timestamp,
}

impl StoredCalculation {
    pub fn new(
        patient_id: Uuid,
        calculator_name: impl Into<String>,
        score: f64,
        risk_percentage: f64,
        interpretation: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            calculator_name: calculator_name.into(),
            calculation_type: None,
            score,
            risk_percentage,
            interpretation: interpretation.into(),
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn with_calculation_type(mut self, calculation_type: impl Into<String>) -> Self {
        self.calculation_type = Some(calculation_type.into());
        self
    }
}
