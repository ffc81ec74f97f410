use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("invalid parameters for {calculator}: {}", summarize(.errors))]
    InvalidParameters {
        calculator: String,
        errors: Vec<ParameterError>,
    },

    #[error("missing parameter: {0}")]
    MissingParameter(String),

    #[error("parameter '{parameter}' expects a {expected} value, got {found}")]
    WrongType {
        parameter: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("parameter '{parameter}': unrecognized option '{value}'")]
    UnrecognizedOption { parameter: String, value: String },

    #[error("parameter '{parameter}': value {value} is outside [{min}, {max}]")]
    OutOfRange {
        parameter: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

fn summarize(errors: &[ParameterError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ParameterErrorKind {
    Missing,
    Unknown,
    TypeMismatch,
    InvalidOption,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ParameterError {
    pub parameter: String,
    pub kind: ParameterErrorKind,
    pub message: String,
}

impl ParameterError {
    pub fn new(parameter: &str, kind: ParameterErrorKind, message: String) -> Self {
        Self {
            parameter: parameter.to_string(),
            kind,
            message,
        }
    }
}
