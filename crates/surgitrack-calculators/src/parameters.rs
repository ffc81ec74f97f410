use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CalculatorError;

/// A single value supplied for a named parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ParameterValue {
    Boolean(bool),
    Number(f64),
    Selection(String),
}

impl ParameterValue {
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Selection(_) => "selection",
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Selection(value.to_string())
    }
}

/// Parameter values keyed by parameter name.
///
/// Serializes as a plain JSON object, e.g.
/// `{"Emergency Surgery": true, "ASA Class": "ASA III"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag(BTreeMap<String, ParameterValue>);

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with_boolean(mut self, name: &str, value: bool) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_number(mut self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_selection(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn require(&self, name: &str) -> Result<&ParameterValue, CalculatorError> {
        self.0
            .get(name)
            .ok_or_else(|| CalculatorError::MissingParameter(name.to_string()))
    }

    fn wrong_type(name: &str, expected: &'static str, found: &ParameterValue) -> CalculatorError {
        CalculatorError::WrongType {
            parameter: name.to_string(),
            expected,
            found: found.type_label(),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, CalculatorError> {
        match self.require(name)? {
            ParameterValue::Boolean(b) => Ok(*b),
            other => Err(Self::wrong_type(name, "boolean", other)),
        }
    }

    pub fn number(&self, name: &str) -> Result<f64, CalculatorError> {
        match self.require(name)? {
            ParameterValue::Number(n) => Ok(*n),
            other => Err(Self::wrong_type(name, "number", other)),
        }
    }

    pub fn selection(&self, name: &str) -> Result<&str, CalculatorError> {
        match self.require(name)? {
            ParameterValue::Selection(s) => Ok(s),
            other => Err(Self::wrong_type(name, "selection", other)),
        }
    }
}

impl FromIterator<(String, ParameterValue)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (String, ParameterValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
