//! Ward roster: the patients, formulary and dose schedule a session starts from.
//!
//! Rosters are YAML documents:
//!
//! ```yaml
//! patients:
//!   - { id: P001, name: Joe Tyler, room: Room 001 }
//! medications:
//!   - { id: "100", name: Paracetamol, dosage: 500mg, indication: Fever, stock: 2 }
//! schedules:
//!   - { id: S01, patient: P001, medication: "100", time: "9:00 AM" }
//! ```
//!
//! Unknown keys are rejected. Every schedule must point at a patient and a medication
//! declared in the same roster.

use crate::constants::BUILTIN_ROSTER;
use crate::discharge::DischargeWorkflow;
use crate::error::{NursingError, NursingResult};
use crate::events::EventDispatcher;
use crate::ids::{MedicationId, PatientId, ScheduleEntryId};
use crate::medication::{Medication, ScheduleEntry};
use crate::patient::Patient;
use crate::repositories::{
    ClinicalLogStore, InMemoryPatientRegistry, MedicationLedger, PatientRegistry,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use ward_types::NonEmptyText;

/// A dose schedule line as written in a roster.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterSchedule {
    pub id: ScheduleEntryId,
    pub patient: PatientId,
    pub medication: MedicationId,
    pub time: NonEmptyText,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WardRoster {
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub schedules: Vec<RosterSchedule>,
}

impl WardRoster {
    /// Parse a roster from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface the path to the failing field
    /// (e.g. `schedules[2].patient`).
    ///
    /// # Errors
    ///
    /// Returns [`NursingError::YamlDeserialization`] if:
    /// - the YAML does not match the roster schema,
    /// - any identifier or text field is blank,
    /// - any unknown keys are present.
    pub fn parse(yaml_text: &str) -> NursingResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        match serde_path_to_error::deserialize::<_, WardRoster>(deserializer) {
            Ok(roster) => Ok(roster),
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                Err(NursingError::YamlDeserialization(format!(
                    "roster schema mismatch at {path}: {source}"
                )))
            }
        }
    }

    /// Read and parse a roster file.
    pub fn load(path: &Path) -> NursingResult<Self> {
        let text = std::fs::read_to_string(path).map_err(NursingError::FileRead)?;
        let roster = Self::parse(&text)?;
        tracing::info!(
            path = %path.display(),
            patients = roster.patients.len(),
            schedules = roster.schedules.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    /// The roster used when no roster file is configured.
    pub fn builtin() -> NursingResult<Self> {
        Self::parse(BUILTIN_ROSTER)
    }

    /// Builds the ward's repositories from this roster.
    ///
    /// # Errors
    ///
    /// - [`NursingError::DuplicateRecord`] for a repeated patient, medication or schedule id,
    /// - [`NursingError::PatientNotFound`] or [`NursingError::MedicationNotFound`] for a
    ///   schedule that refers to something the roster does not declare.
    pub fn into_ward(self, dispatcher: Arc<EventDispatcher>) -> NursingResult<Ward> {
        let mut patients = InMemoryPatientRegistry::new();
        let mut ledger = MedicationLedger::new(dispatcher.clone());
        let mut logs = ClinicalLogStore::new(dispatcher);

        for patient in self.patients {
            logs.register_patient(&patient.id);
            patients.register(patient)?;
        }
        for medication in self.medications {
            ledger.add_medication(medication)?;
        }
        for schedule in self.schedules {
            patients.lookup(&schedule.patient)?;
            ledger.add_schedule(ScheduleEntry::new(
                schedule.id,
                schedule.patient,
                schedule.medication,
                schedule.time,
            ))?;
        }

        Ok(Ward {
            patients,
            ledger,
            logs,
        })
    }
}

/// The live state of one ward.
#[derive(Debug)]
pub struct Ward {
    pub patients: InMemoryPatientRegistry,
    pub ledger: MedicationLedger,
    pub logs: ClinicalLogStore,
}

impl Ward {
    /// A discharge workflow reading from this ward's repositories.
    pub fn discharge_workflow(&self) -> DischargeWorkflow<'_> {
        DischargeWorkflow::new(&self.patients, &self.ledger, &self.logs)
    }
}
