use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub medical_record_number: Option<String>,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Patient {
    /// A new patient record with a fresh id, stamped now.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CoreError::MissingField("name".to_string()));
        }
        let now = jiff::Timestamp::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            medical_record_number: None,
            date_of_birth: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_medical_record_number(mut self, mrn: impl Into<String>) -> Self {
        self.medical_record_number = Some(mrn.into());
        self
    }

    /// Accepts an ISO `YYYY-MM-DD` date.
    pub fn with_date_of_birth(mut self, dob: &str) -> Result<Self, CoreError> {
        self.date_of_birth = Some(dob.trim().parse::<jiff::civil::Date>()?);
        Ok(self)
    }
}
