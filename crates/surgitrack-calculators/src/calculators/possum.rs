use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{CalculationType, CalculatorParameter, RiskCalculator, ScoreRange};
use crate::error::CalculatorError;
use crate::input::CalculatorInput;
use crate::parameters::ParameterBag;
use crate::result::CalculationResult;
use crate::Calculator;

pub const PHYSIOLOGICAL_SCORE: &str = "Physiological Score";
pub const OPERATIVE_SCORE: &str = "Operative Severity Score";

pub const PHYSIOLOGICAL_RANGE: ScoreRange = ScoreRange {
    min: 12.0,
    max: 88.0,
    step: Some(1.0),
};

pub const OPERATIVE_RANGE: ScoreRange = ScoreRange {
    min: 6.0,
    max: 48.0,
    step: Some(1.0),
};

/// POSSUM: Physiological and Operative Severity Score for the enUmeration
/// of Mortality and morbidity (Copeland et al., 1991).
pub struct Possum;

/// Both scores are checked against their ranges on construction and on
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(try_from = "UncheckedPossumInput")]
#[ts(export)]
pub struct PossumInput {
    /// Sum of the 12 physiological factors, 12–88.
    physiological_score: u32,
    /// Sum of the 6 operative factors, 6–48.
    operative_score: u32,
}

#[derive(Deserialize)]
struct UncheckedPossumInput {
    physiological_score: u32,
    operative_score: u32,
}

impl TryFrom<UncheckedPossumInput> for PossumInput {
    type Error = CalculatorError;

    fn try_from(raw: UncheckedPossumInput) -> Result<Self, Self::Error> {
        Self::new(raw.physiological_score, raw.operative_score)
    }
}

impl PossumInput {
    pub fn new(physiological_score: u32, operative_score: u32) -> Result<Self, CalculatorError> {
        check_range(PHYSIOLOGICAL_SCORE, physiological_score, PHYSIOLOGICAL_RANGE)?;
        check_range(OPERATIVE_SCORE, operative_score, OPERATIVE_RANGE)?;
        Ok(Self {
            physiological_score,
            operative_score,
        })
    }

    /// Assessment sums always fall inside both ranges.
    pub fn from_assessments(
        physiological: &PhysiologicalAssessment,
        operative: &OperativeAssessment,
    ) -> Self {
        Self {
            physiological_score: physiological.score(),
            operative_score: operative.score(),
        }
    }

    pub fn physiological_score(&self) -> u32 {
        self.physiological_score
    }

    pub fn operative_score(&self) -> u32 {
        self.operative_score
    }

    /// Linear predictor for morbidity.
    pub fn morbidity_logit(&self) -> f64 {
        -5.91 + 0.16 * f64::from(self.physiological_score) + 0.19 * f64::from(self.operative_score)
    }

    pub fn morbidity_percentage(&self) -> f64 {
        logistic_percentage(self.morbidity_logit())
    }

    pub fn mortality_percentage(&self) -> f64 {
        logistic_percentage(
            -7.04
                + 0.13 * f64::from(self.physiological_score)
                + 0.16 * f64::from(self.operative_score),
        )
    }
}

fn check_range(name: &str, value: u32, range: ScoreRange) -> Result<(), CalculatorError> {
    let value = f64::from(value);
    if range.contains(value) {
        Ok(())
    } else {
        Err(CalculatorError::OutOfRange {
            parameter: name.to_string(),
            value,
            min: range.min,
            max: range.max,
        })
    }
}

fn logistic_percentage(logit: f64) -> f64 {
    100.0 * logit.exp() / (1.0 + logit.exp())
}

pub fn score(input: &PossumInput) -> CalculationResult {
    let risk = input.morbidity_percentage();
    CalculationResult::new(
        f64::from(input.physiological_score + input.operative_score),
        risk,
        format!(
            "POSSUM: physiological score {}, operative severity score {}. \
             Predicted morbidity risk {:.1}% (predicted mortality {:.1}%).",
            input.physiological_score,
            input.operative_score,
            risk,
            input.mortality_percentage()
        ),
    )
}

// Physiological factors. Each factor scores 1, 2, 4 or 8.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CardiacSigns {
    NoFailure,
    /// Diuretic, digoxin, antianginal or antihypertensive therapy.
    TreatedDisease,
    /// Peripheral oedema, warfarin therapy or borderline cardiomegaly.
    OedemaOrWarfarin,
    /// Raised jugular venous pressure or cardiomegaly.
    RaisedJvp,
}

impl CardiacSigns {
    pub fn points(&self) -> u32 {
        match self {
            Self::NoFailure => 1,
            Self::TreatedDisease => 2,
            Self::OedemaOrWarfarin => 4,
            Self::RaisedJvp => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RespiratoryHistory {
    NoDyspnoea,
    /// Dyspnoea on exertion or mild COAD.
    ExertionalDyspnoea,
    /// Limiting dyspnoea (one flight) or moderate COAD.
    LimitingDyspnoea,
    /// Dyspnoea at rest, or fibrosis/consolidation on chest film.
    DyspnoeaAtRest,
}

impl RespiratoryHistory {
    pub fn points(&self) -> u32 {
        match self {
            Self::NoDyspnoea => 1,
            Self::ExertionalDyspnoea => 2,
            Self::LimitingDyspnoea => 4,
            Self::DyspnoeaAtRest => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EcgFindings {
    Normal,
    /// Atrial fibrillation, rate 60–90.
    ControlledAtrialFibrillation,
    /// Any other abnormal rhythm, more than 5 ectopics/min, Q waves or ST/T changes.
    OtherAbnormal,
}

impl EcgFindings {
    pub fn points(&self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::ControlledAtrialFibrillation => 4,
            Self::OtherAbnormal => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PhysiologicalAssessment {
    pub age_years: u32,
    pub cardiac: CardiacSigns,
    pub respiratory: RespiratoryHistory,
    /// mmHg.
    pub systolic_bp: f64,
    /// Beats per minute.
    pub pulse: f64,
    pub glasgow_coma_scale: u32,
    /// g/dL.
    pub haemoglobin: f64,
    /// ×10⁹/L.
    pub white_cell_count: f64,
    /// mmol/L.
    pub urea: f64,
    /// mmol/L.
    pub sodium: f64,
    /// mmol/L.
    pub potassium: f64,
    pub ecg: EcgFindings,
}

impl PhysiologicalAssessment {
    /// Points for each of the 12 factors, in declaration order.
    pub fn factor_points(&self) -> [u32; 12] {
        [
            age_points(self.age_years),
            self.cardiac.points(),
            self.respiratory.points(),
            systolic_bp_points(self.systolic_bp),
            pulse_points(self.pulse),
            gcs_points(self.glasgow_coma_scale),
            haemoglobin_points(self.haemoglobin),
            white_cell_points(self.white_cell_count),
            urea_points(self.urea),
            sodium_points(self.sodium),
            potassium_points(self.potassium),
            self.ecg.points(),
        ]
    }

    pub fn score(&self) -> u32 {
        self.factor_points().iter().sum()
    }
}

fn age_points(age: u32) -> u32 {
    match age {
        0..=60 => 1,
        61..=70 => 2,
        _ => 4,
    }
}

fn systolic_bp_points(bp: f64) -> u32 {
    match bp {
        v if v < 90.0 => 8,
        v if v < 100.0 => 4,
        v if v < 110.0 => 2,
        v if v <= 130.0 => 1,
        v if v <= 170.0 => 2,
        _ => 4,
    }
}

fn pulse_points(rate: f64) -> u32 {
    match rate {
        v if v < 40.0 => 8,
        v if v < 50.0 => 2,
        v if v <= 80.0 => 1,
        v if v <= 100.0 => 2,
        v if v <= 120.0 => 4,
        _ => 8,
    }
}

fn gcs_points(gcs: u32) -> u32 {
    match gcs {
        15.. => 1,
        12..=14 => 2,
        9..=11 => 4,
        _ => 8,
    }
}

fn haemoglobin_points(hb: f64) -> u32 {
    match hb {
        v if v < 10.0 => 8,
        v if v < 11.5 => 4,
        v if v < 13.0 => 2,
        v if v <= 16.0 => 1,
        v if v <= 17.0 => 2,
        v if v <= 18.0 => 4,
        _ => 8,
    }
}

fn white_cell_points(wcc: f64) -> u32 {
    match wcc {
        v if v <= 3.0 => 4,
        v if v < 4.0 => 2,
        v if v <= 10.0 => 1,
        v if v <= 20.0 => 2,
        _ => 4,
    }
}

fn urea_points(urea: f64) -> u32 {
    match urea {
        v if v <= 7.5 => 1,
        v if v <= 10.0 => 2,
        v if v <= 15.0 => 4,
        _ => 8,
    }
}

fn sodium_points(sodium: f64) -> u32 {
    match sodium {
        v if v >= 136.0 => 1,
        v if v >= 131.0 => 2,
        v if v >= 126.0 => 4,
        _ => 8,
    }
}

fn potassium_points(k: f64) -> u32 {
    match k {
        v if v <= 2.8 => 8,
        v if v <= 3.1 => 4,
        v if v < 3.5 => 2,
        v if v <= 5.0 => 1,
        v if v <= 5.3 => 2,
        v if v < 6.0 => 4,
        _ => 8,
    }
}

// Operative factors.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OperativeSeverity {
    Minor,
    Moderate,
    Major,
    MajorPlus,
}

impl OperativeSeverity {
    pub fn points(&self) -> u32 {
        match self {
            Self::Minor => 1,
            Self::Moderate => 2,
            Self::Major => 4,
            Self::MajorPlus => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PeritonealSoiling {
    None,
    /// Minor, serous fluid.
    Serous,
    LocalPus,
    /// Free bowel content, pus or blood.
    FreeContamination,
}

impl PeritonealSoiling {
    pub fn points(&self) -> u32 {
        match self {
            Self::None => 1,
            Self::Serous => 2,
            Self::LocalPus => 4,
            Self::FreeContamination => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Malignancy {
    None,
    PrimaryOnly,
    NodalMetastases,
    DistantMetastases,
}

impl Malignancy {
    pub fn points(&self) -> u32 {
        match self {
            Self::None => 1,
            Self::PrimaryOnly => 2,
            Self::NodalMetastases => 4,
            Self::DistantMetastases => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SurgeryMode {
    Elective,
    /// Emergency where resuscitation is possible; operation within 24 hours.
    Urgent,
    /// Immediate operation, within 2 hours.
    Emergency,
}

impl SurgeryMode {
    pub fn points(&self) -> u32 {
        match self {
            Self::Elective => 1,
            Self::Urgent => 4,
            Self::Emergency => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OperativeAssessment {
    pub severity: OperativeSeverity,
    pub procedure_count: u32,
    /// Total blood loss, mL.
    pub blood_loss_ml: f64,
    pub peritoneal_soiling: PeritonealSoiling,
    pub malignancy: Malignancy,
    pub mode: SurgeryMode,
}

impl OperativeAssessment {
    /// Points for each of the 6 factors, in declaration order.
    pub fn factor_points(&self) -> [u32; 6] {
        [
            self.severity.points(),
            procedure_count_points(self.procedure_count),
            operative_blood_loss_points(self.blood_loss_ml),
            self.peritoneal_soiling.points(),
            self.malignancy.points(),
            self.mode.points(),
        ]
    }

    pub fn score(&self) -> u32 {
        self.factor_points().iter().sum()
    }
}

fn procedure_count_points(count: u32) -> u32 {
    match count {
        0 | 1 => 1,
        2 => 4,
        _ => 8,
    }
}

fn operative_blood_loss_points(ml: f64) -> u32 {
    match ml {
        v if v <= 100.0 => 1,
        v if v <= 500.0 => 2,
        v if v < 1000.0 => 4,
        _ => 8,
    }
}

impl Calculator for Possum {
    fn calculation_type(&self) -> CalculationType {
        CalculationType::Possum
    }

    fn definition(&self) -> &RiskCalculator {
        static DEFINITION: std::sync::LazyLock<RiskCalculator> = std::sync::LazyLock::new(|| {
            RiskCalculator {
                name: "POSSUM".to_string(),
                short_description: "Predicts postoperative morbidity from physiology and operation"
                    .to_string(),
                long_description: "POSSUM combines a 12-factor physiological score (12-88) and \
                    a 6-factor operative severity score (6-48), each factor graded 1, 2, 4 or 8, \
                    in a logistic model of postoperative morbidity."
                    .to_string(),
                parameters: vec![
                    CalculatorParameter::number(
                        PHYSIOLOGICAL_SCORE,
                        "Sum of age, cardiac, respiratory, blood pressure, pulse, GCS, \
                         haemoglobin, white cell count, urea, sodium, potassium and ECG points",
                        PHYSIOLOGICAL_RANGE,
                    ),
                    CalculatorParameter::number(
                        OPERATIVE_SCORE,
                        "Sum of operative severity, procedure count, blood loss, peritoneal \
                         soiling, malignancy and mode of surgery points",
                        OPERATIVE_RANGE,
                    ),
                ],
                calculation_type: CalculationType::Possum,
            }
        });
        &DEFINITION
    }

    fn parse_parameters(&self, params: &ParameterBag) -> Result<CalculatorInput, CalculatorError> {
        let input = PossumInput::new(
            whole_score(params, PHYSIOLOGICAL_SCORE, PHYSIOLOGICAL_RANGE)?,
            whole_score(params, OPERATIVE_SCORE, OPERATIVE_RANGE)?,
        )?;
        Ok(CalculatorInput::Possum(input))
    }
}

fn whole_score(params: &ParameterBag, name: &str, range: ScoreRange) -> Result<u32, CalculatorError> {
    let value = params.number(name)?;
    if !range.contains(value) {
        return Err(CalculatorError::OutOfRange {
            parameter: name.to_string(),
            value,
            min: range.min,
            max: range.max,
        });
    }
    Ok(value.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> PhysiologicalAssessment {
        PhysiologicalAssessment {
            age_years: 45,
            cardiac: CardiacSigns::NoFailure,
            respiratory: RespiratoryHistory::NoDyspnoea,
            systolic_bp: 120.0,
            pulse: 72.0,
            glasgow_coma_scale: 15,
            haemoglobin: 14.0,
            white_cell_count: 7.0,
            urea: 5.0,
            sodium: 140.0,
            potassium: 4.2,
            ecg: EcgFindings::Normal,
        }
    }

    fn worst() -> PhysiologicalAssessment {
        PhysiologicalAssessment {
            age_years: 85,
            cardiac: CardiacSigns::RaisedJvp,
            respiratory: RespiratoryHistory::DyspnoeaAtRest,
            systolic_bp: 80.0,
            pulse: 130.0,
            glasgow_coma_scale: 6,
            haemoglobin: 8.0,
            white_cell_count: 25.0,
            urea: 20.0,
            sodium: 120.0,
            potassium: 6.5,
            ecg: EcgFindings::OtherAbnormal,
        }
    }

    #[test]
    fn physiological_score_spans_twelve_to_eighty_eight() {
        assert_eq!(healthy().factor_points(), [1; 12]);
        assert_eq!(healthy().score(), 12);
        assert_eq!(worst().score(), 88);
    }

    #[test]
    fn operative_score_spans_six_to_forty_eight() {
        let minor = OperativeAssessment {
            severity: OperativeSeverity::Minor,
            procedure_count: 1,
            blood_loss_ml: 50.0,
            peritoneal_soiling: PeritonealSoiling::None,
            malignancy: Malignancy::None,
            mode: SurgeryMode::Elective,
        };
        assert_eq!(minor.score(), 6);

        let major = OperativeAssessment {
            severity: OperativeSeverity::MajorPlus,
            procedure_count: 3,
            blood_loss_ml: 1500.0,
            peritoneal_soiling: PeritonealSoiling::FreeContamination,
            malignancy: Malignancy::DistantMetastases,
            mode: SurgeryMode::Emergency,
        };
        assert_eq!(major.score(), 48);
    }

    #[test]
    fn two_sided_bands_score_both_extremes() {
        assert_eq!(systolic_bp_points(105.0), 2);
        assert_eq!(systolic_bp_points(150.0), 2);
        assert_eq!(systolic_bp_points(95.0), 4);
        assert_eq!(systolic_bp_points(180.0), 4);

        assert_eq!(pulse_points(45.0), 2);
        assert_eq!(pulse_points(90.0), 2);
        assert_eq!(pulse_points(39.0), 8);

        assert_eq!(haemoglobin_points(12.0), 2);
        assert_eq!(haemoglobin_points(16.5), 2);
        assert_eq!(haemoglobin_points(18.5), 8);

        assert_eq!(potassium_points(3.3), 2);
        assert_eq!(potassium_points(5.2), 2);
        assert_eq!(potassium_points(5.9), 4);
        assert_eq!(potassium_points(6.0), 8);
    }

    #[test]
    fn assessments_feed_the_model() {
        let operative = OperativeAssessment {
            severity: OperativeSeverity::Major,
            procedure_count: 1,
            blood_loss_ml: 300.0,
            peritoneal_soiling: PeritonealSoiling::None,
            malignancy: Malignancy::PrimaryOnly,
            mode: SurgeryMode::Elective,
        };
        let input = PossumInput::from_assessments(&healthy(), &operative);
        assert_eq!(input.physiological_score, 12);
        assert_eq!(input.operative_score, 4 + 1 + 2 + 1 + 2 + 1);
    }
}
