use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{CalculationType, CalculatorParameter, RiskCalculator};
use crate::error::CalculatorError;
use crate::input::CalculatorInput;
use crate::parameters::ParameterBag;
use crate::result::CalculationResult;
use crate::Calculator;

pub const ASA_CLASS: &str = "ASA Class";
pub const EMERGENCY: &str = "Emergency Surgery";

const EMERGENCY_MULTIPLIER: f64 = 1.8;

/// ASA Physical Status Classification.
pub struct Asa;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AsaClass {
    I,
    II,
    III,
    IV,
    V,
    /// Declared brain-dead organ donor.
    VI,
}

impl AsaClass {
    pub const ALL: [AsaClass; 6] = [
        AsaClass::I,
        AsaClass::II,
        AsaClass::III,
        AsaClass::IV,
        AsaClass::V,
        AsaClass::VI,
    ];

    pub fn numeral(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
            Self::VI => "VI",
        }
    }

    pub fn label(&self) -> String {
        format!("ASA {}", self.numeral())
    }

    pub fn number(&self) -> u32 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
            Self::V => 5,
            Self::VI => 6,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::I => "A normal healthy patient",
            Self::II => "A patient with mild systemic disease",
            Self::III => "A patient with severe systemic disease",
            Self::IV => "A patient with severe systemic disease that is a constant threat to life",
            Self::V => "A moribund patient who is not expected to survive without the operation",
            Self::VI => "A declared brain-dead patient whose organs are being removed for donor purposes",
        }
    }

    /// Baseline perioperative mortality, percent.
    pub fn base_risk(&self) -> f64 {
        match self {
            Self::I => 0.1,
            Self::II => 0.7,
            Self::III => 3.0,
            Self::IV => 18.0,
            Self::V => 93.0,
            Self::VI => 0.0,
        }
    }
}

impl FromStr for AsaClass {
    type Err = CalculatorError;

    /// Accepts "ASA III", "III" or "3". Whole-token match only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let token = match trimmed.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("ASA ") => trimmed[4..].trim(),
            _ => trimmed,
        };
        Self::ALL
            .into_iter()
            .find(|c| c.numeral().eq_ignore_ascii_case(token) || c.number().to_string() == token)
            .ok_or_else(|| CalculatorError::UnrecognizedOption {
                parameter: ASA_CLASS.to_string(),
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AsaInput {
    pub class: AsaClass,
    pub emergency: bool,
}

pub fn score(input: &AsaInput) -> CalculationResult {
    let class = input.class;
    let mut risk = class.base_risk();
    let mut interpretation = if class == AsaClass::VI {
        format!(
            "ASA Class VI: {}. Perioperative mortality risk does not apply.",
            class.description()
        )
    } else {
        format!(
            "ASA Class {}: {}. Estimated perioperative mortality {:.1}%.",
            class.numeral(),
            class.description(),
            risk
        )
    };

    if input.emergency {
        risk = (risk * EMERGENCY_MULTIPLIER).min(100.0);
        interpretation.push_str(" Emergency surgery further increases risk.");
    }

    CalculationResult::new(f64::from(class.number()), risk, interpretation)
}

impl Calculator for Asa {
    fn calculation_type(&self) -> CalculationType {
        CalculationType::Asa
    }

    fn definition(&self) -> &RiskCalculator {
        static DEFINITION: std::sync::LazyLock<RiskCalculator> = std::sync::LazyLock::new(|| {
            let labels: Vec<String> = AsaClass::ALL.iter().map(AsaClass::label).collect();
            let options: Vec<&str> = labels.iter().map(String::as_str).collect();

            RiskCalculator {
                name: "ASA Physical Status".to_string(),
                short_description: "Preoperative physical status classification".to_string(),
                long_description: "The American Society of Anesthesiologists classification \
                    grades a patient's preoperative fitness from I (healthy) to V (moribund); \
                    class VI denotes a brain-dead organ donor. Emergency operations carry \
                    additional risk."
                    .to_string(),
                parameters: vec![
                    CalculatorParameter::selection(
                        ASA_CLASS,
                        "Physical status class assigned by the anesthesiologist",
                        &options,
                    ),
                    CalculatorParameter::boolean(EMERGENCY, "Operation performed as an emergency"),
                ],
                calculation_type: CalculationType::Asa,
            }
        });
        &DEFINITION
    }

    fn parse_parameters(&self, params: &ParameterBag) -> Result<CalculatorInput, CalculatorError> {
        Ok(CalculatorInput::Asa(AsaInput {
            class: params.selection(ASA_CLASS)?.parse()?,
            emergency: params.boolean(EMERGENCY)?,
        }))
    }
}
