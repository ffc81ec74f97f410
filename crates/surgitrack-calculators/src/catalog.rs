use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CalculatorError, ParameterError, ParameterErrorKind};
use crate::parameters::{ParameterBag, ParameterValue};

/// Which scoring formula a calculator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CalculationType {
    /// Revised Cardiac Risk Index.
    Rcri,
    /// Surgical Apgar Score.
    SurgicalApgar,
    /// ASA Physical Status Classification.
    Asa,
    Possum,
    Caprini,
    /// Declared, no formula yet.
    Meld,
    /// Declared, no formula yet.
    ChildPugh,
}

impl CalculationType {
    pub const ALL: [CalculationType; 7] = [
        CalculationType::Rcri,
        CalculationType::SurgicalApgar,
        CalculationType::Asa,
        CalculationType::Possum,
        CalculationType::Caprini,
        CalculationType::Meld,
        CalculationType::ChildPugh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rcri => "rcri",
            Self::SurgicalApgar => "surgical_apgar",
            Self::Asa => "asa",
            Self::Possum => "possum",
            Self::Caprini => "caprini",
            Self::Meld => "meld",
            Self::ChildPugh => "child_pugh",
        }
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationType {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| CalculatorError::UnknownCalculator(s.to_string()))
    }
}

/// Defines the valid range for a numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

/// The kind of value a parameter accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum ParameterType {
    Boolean,
    /// One of a fixed, ordered list of option labels.
    Selection { options: Vec<String> },
    Number { range: Option<ScoreRange> },
}

impl ParameterType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Selection { .. } => "selection",
            Self::Number { .. } => "number",
        }
    }
}

/// A single named input to a calculator.
///
/// `name` doubles as the display label and the key in a [`ParameterBag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatorParameter {
    pub name: String,
    pub description: String,
    pub parameter_type: ParameterType,
}

impl CalculatorParameter {
    pub fn boolean(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameter_type: ParameterType::Boolean,
        }
    }

    pub fn selection(name: &str, description: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameter_type: ParameterType::Selection {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    pub fn number(name: &str, description: &str, range: ScoreRange) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameter_type: ParameterType::Number { range: Some(range) },
        }
    }

    /// Find the declared option matching `raw` exactly (ignoring case and
    /// surrounding whitespace). Never matches on substrings.
    pub fn match_option(&self, raw: &str) -> Option<&str> {
        let ParameterType::Selection { options } = &self.parameter_type else {
            return None;
        };
        let raw = raw.trim();
        options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(raw))
            .map(String::as_str)
    }

    /// Interpret user-entered text according to this parameter's type.
    pub fn parse_value(&self, raw: &str) -> Result<ParameterValue, ParameterError> {
        let trimmed = raw.trim();
        match &self.parameter_type {
            ParameterType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Ok(ParameterValue::Boolean(true)),
                "false" | "no" | "n" | "0" => Ok(ParameterValue::Boolean(false)),
                _ => Err(ParameterError::new(
                    &self.name,
                    ParameterErrorKind::TypeMismatch,
                    format!("{}: expected yes/no, got '{trimmed}'", self.name),
                )),
            },
            ParameterType::Number { .. } => trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ParameterValue::Number)
                .ok_or_else(|| {
                    ParameterError::new(
                        &self.name,
                        ParameterErrorKind::TypeMismatch,
                        format!("{}: expected a number, got '{trimmed}'", self.name),
                    )
                }),
            ParameterType::Selection { options } => self
                .match_option(trimmed)
                .map(|o| ParameterValue::Selection(o.to_string()))
                .ok_or_else(|| {
                    ParameterError::new(
                        &self.name,
                        ParameterErrorKind::InvalidOption,
                        format!(
                            "{}: '{trimmed}' is not one of [{}]",
                            self.name,
                            options.join(", ")
                        ),
                    )
                }),
        }
    }

    fn check(&self, calculator: &str, value: &ParameterValue) -> Option<ParameterError> {
        let mismatch = || {
            Some(ParameterError::new(
                &self.name,
                ParameterErrorKind::TypeMismatch,
                format!(
                    "{calculator}: {} expects a {} value, got {}",
                    self.name,
                    self.parameter_type.label(),
                    value.type_label()
                ),
            ))
        };
        match (&self.parameter_type, value) {
            (ParameterType::Boolean, ParameterValue::Boolean(_)) => None,
            (ParameterType::Number { range }, ParameterValue::Number(v)) => match range {
                Some(range) if !range.contains(*v) => Some(ParameterError::new(
                    &self.name,
                    ParameterErrorKind::OutOfRange,
                    format!(
                        "{calculator}: {} value {v} is outside range [{}, {}]",
                        self.name, range.min, range.max
                    ),
                )),
                _ if !v.is_finite() => mismatch(),
                _ => None,
            },
            (ParameterType::Selection { options }, ParameterValue::Selection(s)) => {
                if self.match_option(s).is_some() {
                    None
                } else {
                    Some(ParameterError::new(
                        &self.name,
                        ParameterErrorKind::InvalidOption,
                        format!(
                            "{calculator}: {} option '{s}' is not one of [{}]",
                            self.name,
                            options.join(", ")
                        ),
                    ))
                }
            }
            _ => mismatch(),
        }
    }
}

/// A calculator's identity, descriptive text and input schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskCalculator {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub parameters: Vec<CalculatorParameter>,
    pub calculation_type: CalculationType,
}

impl RiskCalculator {
    pub fn parameter(&self, name: &str) -> Option<&CalculatorParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Check a parameter bag against this calculator's declared schema.
    ///
    /// Returns every problem found; an empty vector means the bag can be
    /// scored.
    pub fn validate(&self, params: &ParameterBag) -> Vec<ParameterError> {
        let mut errors = Vec::new();

        for parameter in &self.parameters {
            match params.get(&parameter.name) {
                Some(value) => {
                    if let Some(err) = parameter.check(&self.name, value) {
                        errors.push(err);
                    }
                }
                None => errors.push(ParameterError::new(
                    &parameter.name,
                    ParameterErrorKind::Missing,
                    format!("{}: missing value for {}", self.name, parameter.name),
                )),
            }
        }

        for (key, _) in params.iter() {
            if self.parameter(key).is_none() {
                errors.push(ParameterError::new(
                    key,
                    ParameterErrorKind::Unknown,
                    format!("{}: unknown parameter '{key}'", self.name),
                ));
            }
        }

        errors
    }
}
