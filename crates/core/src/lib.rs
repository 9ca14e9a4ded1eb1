//! # Ward Core
//!
//! Core business logic for the ward nursing workflow.
//!
//! This crate contains the pure ward operations:
//! - vital-sign safety evaluation
//! - the medication ledger (dose administration, allergy holds, pharmacy restock)
//! - the append-only clinical log of pain and wound assessments
//! - the discharge workflow and its summary
//!
//! **No terminal concerns**: menus, prompts and process setup belong in `ward-cli`. The
//! discharge workflow reads its answers through [`InputSource`].

pub mod assessment;
pub mod config;
pub mod constants;
pub mod discharge;
pub mod error;
pub mod events;
pub mod ids;
pub mod input;
pub mod medication;
pub mod nurse;
pub mod patient;
pub mod repositories;
pub mod roster;
pub mod validation;
pub mod vitals;

pub use assessment::{
    derive_wound_status, PainAssessment, PainReport, WoundAssessment, WoundObservation,
    WoundStatus,
};
pub use config::{flag_from_env_value, roster_path_from_env_value, CoreConfig};
pub use discharge::{
    DischargeOutcome, DischargeStage, DischargeSummary, DischargeWorkflow, FollowUpAppointment,
    GateFailure,
};
pub use error::{ErrorKind, NursingError, NursingResult};
pub use events::{
    Delivery, DomainEvent, EventDispatcher, NotificationError, PharmacyNotifier,
    PhysicianNotifier, TracingNotifier,
};
pub use ids::{MedicationId, NurseId, PatientId, ScheduleEntryId};
pub use input::{InputSource, Prompt, ScriptedInput};
pub use medication::{
    DoseAction, DoseStatus, Medication, RestockRequest, RestockStatus, ScheduleEntry,
};
pub use nurse::{Nurse, NurseRegistration};
pub use patient::Patient;
pub use repositories::{
    ClinicalLogStore, ClinicalSummary, ClinicalSummarySource, DoseClearance,
    InMemoryPatientRegistry, MedicationLedger, PatientRegistry,
};
pub use roster::{RosterSchedule, Ward, WardRoster};
pub use vitals::{is_within_safe_range, VitalSign, VitalSigns};
