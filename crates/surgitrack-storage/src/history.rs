use std::path::{Path, PathBuf};

use surgitrack_core::models::{Patient, StoredCalculation};
use surgitrack_core::record_keys;
use uuid::Uuid;

use crate::error::StorageError;
use crate::json::{load_json, save_json};
use crate::objects;

/// Patients and their calculation history, stored as JSON files under a
/// data directory.
#[derive(Debug, Clone)]
pub struct PracticeStore {
    root: PathBuf,
}

impl PracticeStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "practice store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn create_patient(&self, patient: &Patient) -> Result<(), StorageError> {
        save_json(&self.root, &record_keys::patient(patient.id), patient).await?;
        tracing::info!(patient_id = %patient.id, "patient saved");
        Ok(())
    }

    pub async fn get_patient(&self, id: Uuid) -> Result<Patient, StorageError> {
        load_json(&self.root, &record_keys::patient(id)).await
    }

    /// All patients, sorted by name.
    pub async fn list_patients(&self) -> Result<Vec<Patient>, StorageError> {
        let keys = objects::list_objects(&self.root, record_keys::PATIENTS_PREFIX).await?;
        let mut patients = Vec::with_capacity(keys.len());
        for key in &keys {
            patients.push(load_json::<Patient>(&self.root, key).await?);
        }
        patients.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));
        Ok(patients)
    }

    /// Delete a patient and every calculation recorded for them.
    ///
    /// Returns the number of calculations removed.
    pub async fn delete_patient(&self, id: Uuid) -> Result<usize, StorageError> {
        let removed = objects::delete_objects_by_prefix(
            &self.root,
            &record_keys::patient_calculations_prefix(id),
        )
        .await?;
        match objects::delete_object(&self.root, &record_keys::patient(id)).await {
            Ok(()) => {}
            // Orphaned history with no patient record still counts as a removal.
            Err(StorageError::NotFound { .. }) if removed > 0 => {
                tracing::warn!(
                    patient_id = %id,
                    calculations = removed,
                    "patient record was already missing"
                );
            }
            Err(e) => return Err(e),
        }
        tracing::info!(patient_id = %id, calculations = removed, "patient deleted");
        Ok(removed)
    }

    /// Persist a calculation for `patient_id`. The patient must exist.
    pub async fn record_calculation(
        &self,
        patient_id: Uuid,
        calculation: &StoredCalculation,
    ) -> Result<(), StorageError> {
        if calculation.patient_id != patient_id {
            return Err(StorageError::PatientMismatch {
                expected: patient_id,
                record: calculation.patient_id,
            });
        }
        self.get_patient(patient_id).await?;

        save_json(
            &self.root,
            &record_keys::calculation(patient_id, calculation.id),
            calculation,
        )
        .await?;
        tracing::info!(
            patient_id = %patient_id,
            calculation_id = %calculation.id,
            calculator = %calculation.calculator_name,
            "calculation recorded"
        );
        Ok(())
    }

    /// A patient's calculations, newest first.
    pub async fn list_calculations(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<StoredCalculation>, StorageError> {
        let prefix = record_keys::patient_calculations_prefix(patient_id);
        let keys = objects::list_objects(&self.root, &prefix).await?;
        let mut calculations = Vec::with_capacity(keys.len());
        for key in &keys {
            calculations.push(load_json::<StoredCalculation>(&self.root, key).await?);
        }
        calculations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(calculations)
    }

    pub async fn delete_calculation(
        &self,
        patient_id: Uuid,
        calculation_id: Uuid,
    ) -> Result<(), StorageError> {
        objects::delete_object(
            &self.root,
            &record_keys::calculation(patient_id, calculation_id),
        )
        .await?;
        tracing::info!(
            patient_id = %patient_id,
            calculation_id = %calculation_id,
            "calculation deleted"
        );
        Ok(())
    }
}
