use surgitrack_core::error::CoreError;
use surgitrack_core::models::{Patient, StoredCalculation};
use surgitrack_core::record_keys;
use uuid::Uuid;

#[test]
fn new_patient_trims_name_and_stamps_times() {
    let patient = Patient::new("  Ada Lovelace ").unwrap();
    assert_eq!(patient.name, "Ada Lovelace");
    assert_eq!(patient.created_at, patient.updated_at);
    assert!(patient.medical_record_number.is_none());
}

#[test]
fn blank_patient_name_is_rejected() {
    let err = Patient::new("   ").unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref f) if f == "name"));
}

#[test]
fn date_of_birth_parses_iso_dates() {
    let patient = Patient::new("Grace Hopper")
        .unwrap()
        .with_date_of_birth("1906-12-09")
        .unwrap();
    assert_eq!(
        patient.date_of_birth,
        Some(jiff::civil::date(1906, 12, 9))
    );

    let err = Patient::new("Grace Hopper")
        .unwrap()
        .with_date_of_birth("09/12/1906")
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidDate(_)));
}

#[test]
fn stored_calculation_round_trips_through_json() {
    let patient_id = Uuid::new_v4();
    let record = StoredCalculation::new(
        patient_id,
        "Revised Cardiac Risk Index",
        2.0,
        5.5,
        "RCRI Score 2",
    )
    .with_calculation_type("rcri");

    let json = serde_json::to_string(&record).unwrap();
    let back: StoredCalculation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn calculation_type_is_optional_on_disk() {
    let json = format!(
        r#"{{"id":"{}","patient_id":"{}","calculator_name":"ASA","score":3.0,
            "risk_percentage":3.0,"interpretation":"x","created_at":"2025-01-01T00:00:00Z"}}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    let record: StoredCalculation = serde_json::from_str(&json).unwrap();
    assert!(record.calculation_type.is_none());
}

#[test]
fn calculation_keys_nest_under_patient_prefix() {
    let patient_id = Uuid::new_v4();
    let id = Uuid::new_v4();
    let key = record_keys::calculation(patient_id, id);
    assert!(key.starts_with(&record_keys::patient_calculations_prefix(patient_id)));
    assert!(key.ends_with(".json"));
    assert!(record_keys::patient(patient_id).starts_with(record_keys::PATIENTS_PREFIX));
}
