//! In-memory patient registry.

use super::PatientRegistry;
use crate::error::{NursingError, NursingResult};
use crate::ids::PatientId;
use crate::patient::Patient;

/// Patients kept in registration order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPatientRegistry {
    patients: Vec<Patient>,
}

impl InMemoryPatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a patient.
    ///
    /// # Errors
    ///
    /// [`NursingError::DuplicateRecord`] if the id is already registered.
    pub fn register(&mut self, patient: Patient) -> NursingResult<()> {
        if self.patients.iter().any(|p| p.id == patient.id) {
            return Err(NursingError::DuplicateRecord(format!(
                "patient {}",
                patient.id
            )));
        }
        tracing::debug!(patient_id = %patient.id, "patient registered");
        self.patients.push(patient);
        Ok(())
    }

    /// One-based selection, as used by numbered menus.
    pub fn select(&self, number: usize) -> Option<&Patient> {
        number.checked_sub(1).and_then(|i| self.patients.get(i))
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

impl PatientRegistry for InMemoryPatientRegistry {
    fn lookup(&self, id: &PatientId) -> NursingResult<&Patient> {
        self.patients
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| NursingError::PatientNotFound(id.clone()))
    }

    fn patients(&self) -> Vec<&Patient> {
        self.patients.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn registry() -> InMemoryPatientRegistry {
        let mut registry = InMemoryPatientRegistry::new();
        registry
            .register(Patient::new("P001", "Joe Tyler", "Room 001").unwrap())
            .unwrap();
        registry
            .register(Patient::new("P002", "Sebastian Smith", "Room 002").unwrap())
            .unwrap();
        registry
    }

    #[test]
    fn lookup_finds_registered_patient() {
        let registry = registry();
        let patient = registry.lookup(&PatientId::new("P002").unwrap()).unwrap();
        assert_eq!(patient.name.as_str(), "Sebastian Smith");
    }

    #[test]
    fn lookup_unknown_patient_is_precondition_violation() {
        let registry = registry();
        let err = registry
            .lookup(&PatientId::new("P999").unwrap())
            .unwrap_err();
        assert!(matches!(err, NursingError::PatientNotFound(_)));
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    #[test]
    fn register_rejects_duplicate_ids() {
        let mut registry = registry();
        let err = registry
            .register(Patient::new("P001", "Someone Else", "Room 009").unwrap())
            .unwrap_err();
        assert!(matches!(err, NursingError::DuplicateRecord(_)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn select_is_one_based_and_ordered() {
        let registry = registry();
        assert_eq!(registry.select(1).unwrap().id.as_str(), "P001");
        assert_eq!(registry.select(2).unwrap().id.as_str(), "P002");
        assert!(registry.select(0).is_none());
        assert!(registry.select(3).is_none());
    }
}
