use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{CalculationType, CalculatorParameter, RiskCalculator};
use crate::error::CalculatorError;
use crate::input::CalculatorInput;
use crate::parameters::ParameterBag;
use crate::result::CalculationResult;
use crate::Calculator;

pub const AGE: &str = "Age";
pub const SURGERY_TYPE: &str = "Type of Surgery";

/// Boolean risk factors: (parameter name, description, points).
const BOOLEAN_FACTORS: [(&str, &str, u32); 13] = [
    ("BMI > 25", "Body mass index above 25 kg/m²", 1),
    ("Swollen Legs", "Current swelling of the legs", 1),
    ("Varicose Veins", "Visible varicose veins", 1),
    ("Sepsis (< 1 month)", "Sepsis within the last month", 1),
    ("Pregnant or Postpartum", "Currently pregnant or within one month postpartum", 1),
    ("Malignancy", "Present or previous malignancy", 2),
    ("Confined to Bed (> 72 hours)", "Bed rest expected beyond 72 hours", 2),
    ("Central Venous Access", "Central venous catheter in place", 2),
    ("History of VTE", "Previous deep vein thrombosis or pulmonary embolism", 3),
    ("Family History of VTE", "First-degree relative with thrombosis", 3),
    ("Thrombophilia", "Factor V Leiden, prothrombin mutation, lupus anticoagulant or other thrombophilia", 3),
    ("Hip, Pelvis or Leg Fracture", "Fracture within the last month", 5),
    ("Stroke (< 1 month)", "Stroke within the last month", 5),
];

/// Caprini score for venous thromboembolism risk.
pub struct Caprini;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AgeBand {
    UpTo40,
    From41To60,
    From61To74,
    From75,
}

impl AgeBand {
    pub const ALL: [AgeBand; 4] = [
        AgeBand::UpTo40,
        AgeBand::From41To60,
        AgeBand::From61To74,
        AgeBand::From75,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpTo40 => "40 or younger",
            Self::From41To60 => "41-60",
            Self::From61To74 => "61-74",
            Self::From75 => "75 or older",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Self::UpTo40 => 0,
            Self::From41To60 => 1,
            Self::From61To74 => 2,
            Self::From75 => 3,
        }
    }

    pub fn from_years(age: u32) -> Self {
        match age {
            0..=40 => Self::UpTo40,
            41..=60 => Self::From41To60,
            61..=74 => Self::From61To74,
            _ => Self::From75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SurgeryType {
    None,
    Minor,
    /// Major open surgery longer than 45 minutes.
    Major,
    /// Laparoscopic surgery longer than 45 minutes.
    Laparoscopic,
    /// Elective major lower-extremity arthroplasty.
    Arthroplasty,
}

impl SurgeryType {
    pub const ALL: [SurgeryType; 5] = [
        SurgeryType::None,
        SurgeryType::Minor,
        SurgeryType::Major,
        SurgeryType::Laparoscopic,
        SurgeryType::Arthroplasty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Minor => "Minor surgery",
            Self::Major => "Major surgery (> 45 min)",
            Self::Laparoscopic => "Laparoscopic surgery (> 45 min)",
            Self::Arthroplasty => "Elective lower extremity arthroplasty",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Minor => 1,
            Self::Major | Self::Laparoscopic => 2,
            Self::Arthroplasty => 5,
        }
    }
}

/// The clinical selections behind a Caprini points array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CapriniFactors {
    pub age: AgeBand,
    pub surgery: SurgeryType,
    /// Names of boolean risk factors present, as declared by the calculator.
    pub present: Vec<String>,
}

impl CapriniFactors {
    /// Per-factor points: age, surgery, then each boolean factor in
    /// declaration order (0 when absent).
    pub fn points(&self) -> Vec<u32> {
        let mut points = vec![self.age.points(), self.surgery.points()];
        points.extend(BOOLEAN_FACTORS.iter().map(|(name, _, weight)| {
            if self.present.iter().any(|p| p == name) {
                *weight
            } else {
                0
            }
        }));
        points
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CapriniInput {
    pub points: Vec<u32>,
}

impl From<&CapriniFactors> for CapriniInput {
    fn from(factors: &CapriniFactors) -> Self {
        Self {
            points: factors.points(),
        }
    }
}

/// VTE risk tier by total points.
fn risk_tier(total: u32) -> (f64, &'static str) {
    match total {
        0 => (0.5, "Very low"),
        1..=2 => (1.5, "Low"),
        3..=4 => (3.0, "Moderate"),
        5..=6 => (6.0, "High"),
        7..=8 => (10.0, "Very high"),
        _ => (18.0, "Highest"),
    }
}

pub fn score(input: &CapriniInput) -> CalculationResult {
    let total = input
        .points
        .iter()
        .fold(0u32, |total, points| total.saturating_add(*points));
    let (risk, tier) = risk_tier(total);
    CalculationResult::new(
        f64::from(total),
        risk,
        format!(
            "Caprini Score {total}: {tier} risk of venous thromboembolism \
             (approximately {risk:.1}% without prophylaxis)."
        ),
    )
}

impl Calculator for Caprini {
    fn calculation_type(&self) -> CalculationType {
        CalculationType::Caprini
    }

    fn definition(&self) -> &RiskCalculator {
        static DEFINITION: std::sync::LazyLock<RiskCalculator> = std::sync::LazyLock::new(|| {
            let ages: Vec<&str> = AgeBand::ALL.iter().map(AgeBand::label).collect();
            let surgeries: Vec<&str> = SurgeryType::ALL.iter().map(SurgeryType::label).collect();

            let mut parameters = vec![
                CalculatorParameter::selection(AGE, "Patient age in years", &ages),
                CalculatorParameter::selection(SURGERY_TYPE, "Planned or current operation", &surgeries),
            ];
            parameters.extend(
                BOOLEAN_FACTORS
                    .iter()
                    .map(|(name, description, _)| CalculatorParameter::boolean(name, description)),
            );

            RiskCalculator {
                name: "Caprini VTE Risk".to_string(),
                short_description: "Venous thromboembolism risk for surgical patients".to_string(),
                long_description: "The Caprini risk assessment model sums weighted points for \
                    patient and procedure risk factors to stratify the risk of deep vein \
                    thrombosis and pulmonary embolism and guide prophylaxis."
                    .to_string(),
                parameters,
                calculation_type: CalculationType::Caprini,
            }
        });
        &DEFINITION
    }

    fn parse_parameters(&self, params: &ParameterBag) -> Result<CalculatorInput, CalculatorError> {
        let age_label = params.selection(AGE)?;
        let age = AgeBand::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(age_label.trim()))
            .ok_or_else(|| CalculatorError::UnrecognizedOption {
                parameter: AGE.to_string(),
                value: age_label.to_string(),
            })?;

        let surgery_label = params.selection(SURGERY_TYPE)?;
        let surgery = SurgeryType::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(surgery_label.trim()))
            .ok_or_else(|| CalculatorError::UnrecognizedOption {
                parameter: SURGERY_TYPE.to_string(),
                value: surgery_label.to_string(),
            })?;

        let mut present = Vec::new();
        for (name, _, _) in BOOLEAN_FACTORS {
            if params.boolean(name)? {
                present.push(name.to_string());
            }
        }

        let factors = CapriniFactors {
            age,
            surgery,
            present,
        };
        Ok(CalculatorInput::Caprini(CapriniInput::from(&factors)))
    }
}
