//! Record key/path conventions.
//!
//! Pure string functions — no filesystem access. These define the canonical
//! layout of records under a SurgiTrack data directory.

use uuid::Uuid;

pub const PATIENTS_PREFIX: &str = "patients/";

pub fn patient(id: Uuid) -> String {
    format!("patients/{id}.json")
}

pub fn patient_calculations_prefix(patient_id: Uuid) -> String {
    format!("calculations/{patient_id}/")
}

pub fn calculation(patient_id: Uuid, id: Uuid) -> String {
    format!("calculations/{patient_id}/{id}.json")
}
