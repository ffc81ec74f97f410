use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{CalculationType, CalculatorParameter, RiskCalculator};
use crate::error::CalculatorError;
use crate::input::CalculatorInput;
use crate::parameters::ParameterBag;
use crate::result::CalculationResult;
use crate::Calculator;

pub const BLOOD_LOSS: &str = "Estimated Blood Loss";
pub const LOWEST_MAP: &str = "Lowest Mean Arterial Pressure";
pub const LOWEST_HEART_RATE: &str = "Lowest Heart Rate";

/// Surgical Apgar Score (Gawande et al., 2007).
/// Blood loss 0–3, lowest MAP 0–3, lowest heart rate 0–4. Total 0–10,
/// higher is better.
pub struct SurgicalApgar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BloodLoss {
    Over1000,
    From601To1000,
    From101To600,
    UpTo100,
}

impl BloodLoss {
    pub const ALL: [BloodLoss; 4] = [
        BloodLoss::Over1000,
        BloodLoss::From601To1000,
        BloodLoss::From101To600,
        BloodLoss::UpTo100,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Over1000 => ">1000 mL",
            Self::From601To1000 => "601-1000 mL",
            Self::From101To600 => "101-600 mL",
            Self::UpTo100 => "<=100 mL",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Self::Over1000 => 0,
            Self::From601To1000 => 1,
            Self::From101To600 => 2,
            Self::UpTo100 => 3,
        }
    }

    pub fn from_millilitres(ml: f64) -> Self {
        match ml {
            v if v <= 100.0 => Self::UpTo100,
            v if v <= 600.0 => Self::From101To600,
            v if v <= 1000.0 => Self::From601To1000,
            _ => Self::Over1000,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        find_label(&Self::ALL, label, Self::label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LowestMap {
    Below40,
    From40To54,
    From55To69,
    AtLeast70,
}

impl LowestMap {
    pub const ALL: [LowestMap; 4] = [
        LowestMap::Below40,
        LowestMap::From40To54,
        LowestMap::From55To69,
        LowestMap::AtLeast70,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Below40 => "<40 mmHg",
            Self::From40To54 => "40-54 mmHg",
            Self::From55To69 => "55-69 mmHg",
            Self::AtLeast70 => ">=70 mmHg",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Self::Below40 => 0,
            Self::From40To54 => 1,
            Self::From55To69 => 2,
            Self::AtLeast70 => 3,
        }
    }

    pub fn from_mmhg(map: f64) -> Self {
        match map {
            v if v < 40.0 => Self::Below40,
            v if v < 55.0 => Self::From40To54,
            v if v < 70.0 => Self::From55To69,
            _ => Self::AtLeast70,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        find_label(&Self::ALL, label, Self::label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LowestHeartRate {
    Above85,
    From76To85,
    From66To75,
    From56To65,
    AtMost55,
}

impl LowestHeartRate {
    pub const ALL: [LowestHeartRate; 5] = [
        LowestHeartRate::Above85,
        LowestHeartRate::From76To85,
        LowestHeartRate::From66To75,
        LowestHeartRate::From56To65,
        LowestHeartRate::AtMost55,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Above85 => ">85 bpm",
            Self::From76To85 => "76-85 bpm",
            Self::From66To75 => "66-75 bpm",
            Self::From56To65 => "56-65 bpm",
            Self::AtMost55 => "<=55 bpm",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Self::Above85 => 0,
            Self::From76To85 => 1,
            Self::From66To75 => 2,
            Self::From56To65 => 3,
            Self::AtMost55 => 4,
        }
    }

    pub fn from_bpm(rate: f64) -> Self {
        match rate {
            v if v <= 55.0 => Self::AtMost55,
            v if v <= 65.0 => Self::From56To65,
            v if v <= 75.0 => Self::From66To75,
            v if v <= 85.0 => Self::From76To85,
            _ => Self::Above85,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        find_label(&Self::ALL, label, Self::label)
    }
}

fn find_label<T: Copy>(all: &[T], label: &str, to_label: fn(&T) -> &'static str) -> Option<T> {
    let label = label.trim();
    all.iter()
        .copied()
        .find(|band| to_label(band).eq_ignore_ascii_case(label))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SurgicalApgarInput {
    pub blood_loss: BloodLoss,
    pub lowest_map: LowestMap,
    pub lowest_heart_rate: LowestHeartRate,
}

impl SurgicalApgarInput {
    pub fn total(&self) -> u32 {
        self.blood_loss.points() + self.lowest_map.points() + self.lowest_heart_rate.points()
    }
}

/// Approximate 30-day mortality by score band.
fn risk_tier(total: u32) -> (f64, &'static str) {
    match total {
        0..=2 => (19.0, "Very high"),
        3..=4 => (14.0, "High"),
        5..=6 => (4.0, "Moderate"),
        7..=8 => (1.0, "Low"),
        _ => (0.3, "Very low"),
    }
}

pub fn score(input: &SurgicalApgarInput) -> CalculationResult {
    let total = input.total();
    let (risk, tier) = risk_tier(total);
    CalculationResult::new(
        f64::from(total),
        risk,
        format!(
            "Surgical Apgar Score {total}: {tier} risk of major postoperative complications \
             (approximately {risk:.1}% mortality)."
        ),
    )
}

impl Calculator for SurgicalApgar {
    fn calculation_type(&self) -> CalculationType {
        CalculationType::SurgicalApgar
    }

    fn definition(&self) -> &RiskCalculator {
        static DEFINITION: std::sync::LazyLock<RiskCalculator> = std::sync::LazyLock::new(|| {
            let blood_loss: Vec<&str> = BloodLoss::ALL.iter().map(BloodLoss::label).collect();
            let map: Vec<&str> = LowestMap::ALL.iter().map(LowestMap::label).collect();
            let heart_rate: Vec<&str> = LowestHeartRate::ALL
                .iter()
                .map(LowestHeartRate::label)
                .collect();

            RiskCalculator {
                name: "Surgical Apgar Score".to_string(),
                short_description: "Intraoperative estimate of postoperative outcome".to_string(),
                long_description: "A 10-point score computed at the end of surgery from \
                    estimated blood loss, lowest mean arterial pressure and lowest heart rate. \
                    Lower scores identify patients at higher risk of major complications and \
                    death within 30 days."
                    .to_string(),
                parameters: vec![
                    CalculatorParameter::selection(
                        BLOOD_LOSS,
                        "Total estimated intraoperative blood loss",
                        &blood_loss,
                    ),
                    CalculatorParameter::selection(
                        LOWEST_MAP,
                        "Lowest mean arterial pressure during the operation",
                        &map,
                    ),
                    CalculatorParameter::selection(
                        LOWEST_HEART_RATE,
                        "Lowest heart rate during the operation",
                        &heart_rate,
                    ),
                ],
                calculation_type: CalculationType::SurgicalApgar,
            }
        });
        &DEFINITION
    }

    fn parse_parameters(&self, params: &ParameterBag) -> Result<CalculatorInput, CalculatorError> {
        Ok(CalculatorInput::SurgicalApgar(SurgicalApgarInput {
            blood_loss: band(params, BLOOD_LOSS, BloodLoss::from_label)?,
            lowest_map: band(params, LOWEST_MAP, LowestMap::from_label)?,
            lowest_heart_rate: band(params, LOWEST_HEART_RATE, LowestHeartRate::from_label)?,
        }))
    }
}

fn band<T>(
    params: &ParameterBag,
    name: &str,
    from_label: fn(&str) -> Option<T>,
) -> Result<T, CalculatorError> {
    let value = params.selection(name)?;
    from_label(value).ok_or_else(|| CalculatorError::UnrecognizedOption {
        parameter: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurements_fall_into_band_edges() {
        assert_eq!(BloodLoss::from_millilitres(100.0), BloodLoss::UpTo100);
        assert_eq!(BloodLoss::from_millilitres(101.0), BloodLoss::From101To600);
        assert_eq!(BloodLoss::from_millilitres(1000.0), BloodLoss::From601To1000);
        assert_eq!(BloodLoss::from_millilitres(1001.0), BloodLoss::Over1000);

        assert_eq!(LowestMap::from_mmhg(39.0), LowestMap::Below40);
        assert_eq!(LowestMap::from_mmhg(40.0), LowestMap::From40To54);
        assert_eq!(LowestMap::from_mmhg(69.0), LowestMap::From55To69);
        assert_eq!(LowestMap::from_mmhg(70.0), LowestMap::AtLeast70);

        assert_eq!(LowestHeartRate::from_bpm(55.0), LowestHeartRate::AtMost55);
        assert_eq!(LowestHeartRate::from_bpm(56.0), LowestHeartRate::From56To65);
        assert_eq!(LowestHeartRate::from_bpm(85.0), LowestHeartRate::From76To85);
        assert_eq!(LowestHeartRate::from_bpm(86.0), LowestHeartRate::Above85);
    }

    #[test]
    fn labels_round_trip_exactly() {
        for band in LowestHeartRate::ALL {
            assert_eq!(LowestHeartRate::from_label(band.label()), Some(band));
        }
        // No partial matches.
        assert_eq!(BloodLoss::from_label("100 mL"), None);
        assert_eq!(LowestMap::from_label("70"), None);
    }
}
