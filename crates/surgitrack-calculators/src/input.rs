use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculators::asa::AsaInput;
use crate::calculators::caprini::CapriniInput;
use crate::calculators::possum::PossumInput;
use crate::calculators::rcri::RcriInput;
use crate::calculators::surgical_apgar::SurgicalApgarInput;
use crate::catalog::CalculationType;

/// Typed input for one calculation, tagged by calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "calculator", rename_all = "snake_case")]
#[ts(export)]
pub enum CalculatorInput {
    Rcri(RcriInput),
    SurgicalApgar(SurgicalApgarInput),
    Asa(AsaInput),
    Possum(PossumInput),
    Caprini(CapriniInput),
}

impl CalculatorInput {
    pub fn calculation_type(&self) -> CalculationType {
        match self {
            Self::Rcri(_) => CalculationType::Rcri,
            Self::SurgicalApgar(_) => CalculationType::SurgicalApgar,
            Self::Asa(_) => CalculationType::Asa,
            Self::Possum(_) => CalculationType::Possum,
            Self::Caprini(_) => CalculationType::Caprini,
        }
    }
}
