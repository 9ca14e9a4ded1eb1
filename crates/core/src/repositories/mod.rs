//! Ward repositories.
//!
//! Each repository owns one kind of ward state. The discharge workflow only sees them
//! through the narrow traits defined here, so it can be exercised against any backing store.

pub mod clinical_log;
pub mod medication;
pub mod patients;

use crate::error::NursingResult;
use crate::ids::PatientId;
use crate::patient::Patient;

pub use clinical_log::{ClinicalLogStore, ClinicalSummary};
pub use medication::MedicationLedger;
pub use patients::InMemoryPatientRegistry;

/// Looks up patients by identifier.
pub trait PatientRegistry {
    /// # Errors
    ///
    /// [`crate::NursingError::PatientNotFound`] when no patient has this id.
    fn lookup(&self, id: &PatientId) -> NursingResult<&Patient>;

    /// All patients, in registration order.
    fn patients(&self) -> Vec<&Patient>;
}

/// Answers the medication gate of a discharge.
pub trait DoseClearance {
    /// True iff no dose for the patient is still `Scheduled`.
    fn all_doses_cleared(&self, patient: &PatientId) -> bool;
}

/// Supplies the wound/pain summary lines of a discharge.
pub trait ClinicalSummarySource {
    /// Never fails; a patient without records gets the "not found" sentinels.
    fn summary_for(&self, patient: &PatientId) -> ClinicalSummary;
}
