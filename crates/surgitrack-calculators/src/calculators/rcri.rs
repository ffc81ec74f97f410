use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{CalculationType, CalculatorParameter, RiskCalculator};
use crate::error::CalculatorError;
use crate::input::CalculatorInput;
use crate::parameters::ParameterBag;
use crate::result::CalculationResult;
use crate::Calculator;

pub const ISCHEMIC_HEART_DISEASE: &str = "History of Ischemic Heart Disease";
pub const CONGESTIVE_HEART_FAILURE: &str = "History of Congestive Heart Failure";
pub const CEREBROVASCULAR_DISEASE: &str = "History of Cerebrovascular Disease";
pub const INSULIN_DIABETES: &str = "Diabetes Requiring Insulin";
pub const ELEVATED_CREATININE: &str = "Creatinine > 2.0 mg/dL";
pub const HIGH_RISK_SURGERY: &str = "High-Risk Surgery";

/// RCRI: Revised Cardiac Risk Index (Lee et al., 1999).
/// Six yes/no factors, one point each. Total 0–6.
pub struct Rcri;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RcriInput {
    pub ischemic_heart_disease: bool,
    pub congestive_heart_failure: bool,
    pub cerebrovascular_disease: bool,
    pub insulin_dependent_diabetes: bool,
    /// Preoperative creatinine above 2.0 mg/dL.
    pub elevated_creatinine: bool,
    /// Intraperitoneal, intrathoracic or suprainguinal vascular surgery.
    pub high_risk_surgery: bool,
}

impl RcriInput {
    pub fn factor_count(&self) -> u32 {
        [
            self.ischemic_heart_disease,
            self.congestive_heart_failure,
            self.cerebrovascular_disease,
            self.insulin_dependent_diabetes,
            self.elevated_creatinine,
            self.high_risk_surgery,
        ]
        .into_iter()
        .filter(|present| *present)
        .count() as u32
    }
}

/// Risk of major cardiac complications by factor count.
fn risk_tier(count: u32) -> (f64, &'static str) {
    match count {
        0 => (0.5, "Very low"),
        1 => (1.3, "Low"),
        2 => (5.5, "Moderate"),
        _ => (10.0, "High"),
    }
}

pub fn score(input: &RcriInput) -> CalculationResult {
    let count = input.factor_count();
    let (risk, tier) = risk_tier(count);
    CalculationResult::new(
        f64::from(count),
        risk,
        format!("RCRI Score {count}: {tier} risk of major cardiac complications ({risk:.1}%)."),
    )
}

impl Calculator for Rcri {
    fn calculation_type(&self) -> CalculationType {
        CalculationType::Rcri
    }

    fn definition(&self) -> &RiskCalculator {
        static DEFINITION: std::sync::LazyLock<RiskCalculator> = std::sync::LazyLock::new(|| {
            RiskCalculator {
                name: "Revised Cardiac Risk Index".to_string(),
                short_description: "Estimates risk of perioperative cardiac complications"
                    .to_string(),
                long_description: "The RCRI estimates the risk of major cardiac complications \
                    (myocardial infarction, pulmonary edema, ventricular fibrillation, cardiac \
                    arrest, complete heart block) after noncardiac surgery. Each of six \
                    independent predictors contributes one point."
                    .to_string(),
                parameters: vec![
                    CalculatorParameter::boolean(
                        ISCHEMIC_HEART_DISEASE,
                        "Prior MI, positive stress test, angina, nitrate therapy or pathological Q waves",
                    ),
                    CalculatorParameter::boolean(
                        CONGESTIVE_HEART_FAILURE,
                        "Pulmonary edema, paroxysmal nocturnal dyspnea, S3 gallop or bilateral rales",
                    ),
                    CalculatorParameter::boolean(
                        CEREBROVASCULAR_DISEASE,
                        "Prior transient ischemic attack or stroke",
                    ),
                    CalculatorParameter::boolean(
                        INSULIN_DIABETES,
                        "Preoperative treatment with insulin",
                    ),
                    CalculatorParameter::boolean(
                        ELEVATED_CREATININE,
                        "Preoperative serum creatinine above 2.0 mg/dL (177 µmol/L)",
                    ),
                    CalculatorParameter::boolean(
                        HIGH_RISK_SURGERY,
                        "Intraperitoneal, intrathoracic or suprainguinal vascular procedure",
                    ),
                ],
                calculation_type: CalculationType::Rcri,
            }
        });
        &DEFINITION
    }

    fn parse_parameters(&self, params: &ParameterBag) -> Result<CalculatorInput, CalculatorError> {
        Ok(CalculatorInput::Rcri(RcriInput {
            ischemic_heart_disease: params.boolean(ISCHEMIC_HEART_DISEASE)?,
            congestive_heart_failure: params.boolean(CONGESTIVE_HEART_FAILURE)?,
            cerebrovascular_disease: params.boolean(CEREBROVASCULAR_DISEASE)?,
            insulin_dependent_diabetes: params.boolean(INSULIN_DIABETES)?,
            elevated_creatinine: params.boolean(ELEVATED_CREATININE)?,
            high_risk_surgery: params.boolean(HIGH_RISK_SURGERY)?,
        }))
    }
}
