use surgitrack_core::models::{Patient, StoredCalculation};
use surgitrack_storage::error::StorageError;
use surgitrack_storage::history::PracticeStore;
use uuid::Uuid;

async fn store() -> (tempfile::TempDir, PracticeStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = PracticeStore::open(dir.path().join("data")).await.unwrap();
    (dir, store)
}

fn calculation(patient_id: Uuid, name: &str, seconds: i64) -> StoredCalculation {
    let mut record = StoredCalculation::new(patient_id, name, 1.0, 1.3, "RCRI Score 1");
    record.created_at = jiff::Timestamp::from_second(1_700_000_000 + seconds).unwrap();
    record
}

#[tokio::test]
async fn patients_round_trip_and_list_by_name() {
    let (_dir, store) = store().await;
    let zoe = Patient::new("Zoe").unwrap();
    let adam = Patient::new("Adam").unwrap().with_medical_record_number("MRN-1");
    store.create_patient(&zoe).await.unwrap();
    store.create_patient(&adam).await.unwrap();

    assert_eq!(store.get_patient(adam.id).await.unwrap(), adam);
    let names: Vec<_> = store
        .list_patients()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Adam", "Zoe"]);
}

#[tokio::test]
async fn calculations_list_newest_first() {
    let (_dir, store) = store().await;
    let patient = Patient::new("Ada").unwrap();
    store.create_patient(&patient).await.unwrap();

    let older = calculation(patient.id, "RCRI", 0);
    let newer = calculation(patient.id, "ASA", 60);
    store.record_calculation(patient.id, &older).await.unwrap();
    store.record_calculation(patient.id, &newer).await.unwrap();

    let history = store.list_calculations(patient.id).await.unwrap();
    assert_eq!(history, vec![newer, older]);
}

#[tokio::test]
async fn recording_requires_an_existing_matching_patient() {
    let (_dir, store) = store().await;
    let ghost = Uuid::new_v4();
    let err = store
        .record_calculation(ghost, &calculation(ghost, "RCRI", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));

    let patient = Patient::new("Ada").unwrap();
    store.create_patient(&patient).await.unwrap();
    let err = store
        .record_calculation(patient.id, &calculation(ghost, "RCRI", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::PatientMismatch { .. }));
}

#[tokio::test]
async fn deleting_a_calculation_removes_only_that_record() {
    let (_dir, store) = store().await;
    let patient = Patient::new("Ada").unwrap();
    store.create_patient(&patient).await.unwrap();
    let keep = calculation(patient.id, "RCRI", 0);
    let drop = calculation(patient.id, "ASA", 1);
    store.record_calculation(patient.id, &keep).await.unwrap();
    store.record_calculation(patient.id, &drop).await.unwrap();

    store.delete_calculation(patient.id, drop.id).await.unwrap();
    assert_eq!(store.list_calculations(patient.id).await.unwrap(), vec![keep]);

    let err = store
        .delete_calculation(patient.id, drop.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn deleting_a_patient_cascades_to_history() {
    let (_dir, store) = store().await;
    let patient = Patient::new("Ada").unwrap();
    let other = Patient::new("Grace").unwrap();
    store.create_patient(&patient).await.unwrap();
    store.create_patient(&other).await.unwrap();
    store
        .record_calculation(patient.id, &calculation(patient.id, "RCRI", 0))
        .await
        .unwrap();
    store
        .record_calculation(patient.id, &calculation(patient.id, "ASA", 1))
        .await
        .unwrap();
    store
        .record_calculation(other.id, &calculation(other.id, "ASA", 2))
        .await
        .unwrap();

    assert_eq!(store.delete_patient(patient.id).await.unwrap(), 2);
    assert!(store.list_calculations(patient.id).await.unwrap().is_empty());
    assert_eq!(store.list_calculations(other.id).await.unwrap().len(), 1);
    assert!(matches!(
        store.get_patient(patient.id).await.unwrap_err(),
        StorageError::NotFound { .. }
    ));
}

#[tokio::test]
async fn deleting_a_patient_clears_history_left_without_a_record() {
    let (_dir, store) = store().await;
    let patient = Patient::new("Ada").unwrap();
    store.create_patient(&patient).await.unwrap();
    store
        .record_calculation(patient.id, &calculation(patient.id, "RCRI", 0))
        .await
        .unwrap();
    surgitrack_storage::objects::delete_object(
        store.root(),
        &surgitrack_core::record_keys::patient(patient.id),
    )
    .await
    .unwrap();

    assert_eq!(store.delete_patient(patient.id).await.unwrap(), 1);
    assert!(store.list_calculations(patient.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_an_unknown_patient_is_not_found() {
    let (_dir, store) = store().await;
    assert!(matches!(
        store.delete_patient(Uuid::new_v4()).await.unwrap_err(),
        StorageError::NotFound { .. }
    ));
}
