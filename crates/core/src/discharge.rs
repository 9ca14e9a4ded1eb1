//! Patient discharge workflow.
//!
//! A discharge passes three gates in a fixed order and only then collects the remaining
//! details:
//!
//! ```text
//! AwaitingMedClearance ─▶ AwaitingVitals ─▶ AwaitingDoctorApproval
//!        │                     │                    │
//!        ▼                     ▼                    ▼
//!     aborted               aborted              aborted
//!
//! AwaitingDoctorApproval ─▶ AwaitingFollowupDecision ─▶ AwaitingNotes ─▶ Complete
//! ```
//!
//! A failed gate ends the attempt with [`DischargeOutcome::Aborted`]: no summary of any kind
//! is produced, and no further prompts are asked. This is an ordinary outcome, not an error.
//! Errors are reserved for unknown patients and broken input.
//!
//! A [`DischargeSummary`] can only be built here, after all three gates passed.

use crate::constants::NO_FOLLOW_UP;
use crate::error::{NursingError, NursingResult};
use crate::ids::PatientId;
use crate::input::{ask_reading, ask_yes_no, InputSource, Prompt};
use crate::nurse::Nurse;
use crate::patient::Patient;
use crate::repositories::{ClinicalSummarySource, DoseClearance, PatientRegistry};
use crate::vitals::VitalSigns;
use chrono::{DateTime, Utc};
use serde::Serialize;
use ward_uuid::RecordId;

/// Where a discharge attempt currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DischargeStage {
    AwaitingMedClearance,
    AwaitingVitals,
    AwaitingDoctorApproval,
    AwaitingFollowupDecision,
    AwaitingNotes,
    Complete,
}

/// Why a discharge attempt stopped.
#[derive(Clone, Debug, PartialEq)]
pub enum GateFailure {
    /// At least one dose is still scheduled.
    MedicationsNotCleared,
    /// The readings taken were outside the safe ranges.
    VitalsUnsafe(VitalSigns),
    /// The doctor has not approved discharge.
    DoctorNotApproved,
}

impl std::fmt::Display for GateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateFailure::MedicationsNotCleared => f.write_str("medication doses not cleared"),
            GateFailure::VitalsUnsafe(vitals) => {
                write!(f, "vital signs outside safe range ({vitals})")
            }
            GateFailure::DoctorNotApproved => f.write_str("doctor has not approved discharge"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DischargeOutcome {
    Completed(Box<DischargeSummary>),
    Aborted(GateFailure),
}

impl DischargeOutcome {
    pub fn summary(&self) -> Option<&DischargeSummary> {
        match self {
            DischargeOutcome::Completed(summary) => Some(&**summary),
            DischargeOutcome::Aborted(_) => None,
        }
    }

    pub fn into_summary(self) -> Option<DischargeSummary> {
        match self {
            DischargeOutcome::Completed(summary) => Some(*summary),
            DischargeOutcome::Aborted(_) => None,
        }
    }
}

/// A follow-up appointment booked at discharge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FollowUpAppointment {
    pub clinic_or_purpose: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

impl std::fmt::Display for FollowUpAppointment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {} at {} ({})",
            self.clinic_or_purpose, self.date, self.time, self.status
        )
    }
}

/// Immutable record of a completed discharge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DischargeSummary {
    id: RecordId,
    created_at: DateTime<Utc>,
    patient: Patient,
    nurse: Nurse,
    medications_cleared: bool,
    vitals_safe: bool,
    doctor_approved: bool,
    vitals: VitalSigns,
    wound_info: String,
    pain_info: String,
    notes: String,
    follow_up: Option<FollowUpAppointment>,
}

impl DischargeSummary {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn nurse(&self) -> &Nurse {
        &self.nurse
    }

    pub fn medications_cleared(&self) -> bool {
        self.medications_cleared
    }

    pub fn vitals_safe(&self) -> bool {
        self.vitals_safe
    }

    pub fn doctor_approved(&self) -> bool {
        self.doctor_approved
    }

    pub fn vitals(&self) -> &VitalSigns {
        &self.vitals
    }

    pub fn wound_info(&self) -> &str {
        &self.wound_info
    }

    pub fn pain_info(&self) -> &str {
        &self.pain_info
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn follow_up(&self) -> Option<&FollowUpAppointment> {
        self.follow_up.as_ref()
    }

    /// YAML rendering for export.
    pub fn render_yaml(&self) -> NursingResult<String> {
        serde_yaml::to_string(self).map_err(NursingError::YamlSerialization)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}

impl std::fmt::Display for DischargeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DISCHARGE SUMMARY")?;
        writeln!(f, "Patient: {} (Room: {})", self.patient.name, self.patient.room)?;
        writeln!(f, "Nurse: {}", self.nurse.name)?;
        writeln!(f, "Medications cleared: {}", yes_no(self.medications_cleared))?;
        writeln!(f, "Vitals safe: {}", yes_no(self.vitals_safe))?;
        writeln!(f, "Doctor approved discharge: {}", yes_no(self.doctor_approved))?;
        writeln!(f, "Vital Signs: {}", self.vitals)?;
        writeln!(f, "Wound Information: {}", self.wound_info)?;
        writeln!(f, "Pain Information: {}", self.pain_info)?;
        match &self.follow_up {
            Some(follow_up) => writeln!(f, "Follow-up: {follow_up}")?,
            None => writeln!(f, "Follow-up: {NO_FOLLOW_UP}")?,
        }
        writeln!(f, "Discharge Notes:")?;
        writeln!(f, "{}", self.notes)
    }
}

/// Runs discharge attempts against the ward's repositories.
pub struct DischargeWorkflow<'a> {
    patients: &'a dyn PatientRegistry,
    doses: &'a dyn DoseClearance,
    clinical: &'a dyn ClinicalSummarySource,
    stage: DischargeStage,
}

impl<'a> DischargeWorkflow<'a> {
    pub fn new(
        patients: &'a dyn PatientRegistry,
        doses: &'a dyn DoseClearance,
        clinical: &'a dyn ClinicalSummarySource,
    ) -> Self {
        Self {
            patients,
            doses,
            clinical,
            stage: DischargeStage::AwaitingMedClearance,
        }
    }

    /// The stage the last attempt reached. An aborted attempt stays at the failing gate.
    pub fn stage(&self) -> DischargeStage {
        self.stage
    }

    /// Attempts to discharge `patient`.
    ///
    /// # Errors
    ///
    /// - [`crate::NursingError::PatientNotFound`] for an unknown patient (nothing is asked),
    /// - input errors: unparseable readings, or the source running out of answers.
    ///
    /// Failed gates are not errors; they return [`DischargeOutcome::Aborted`].
    pub fn process(
        &mut self,
        patient: &PatientId,
        nurse: &Nurse,
        input: &mut dyn InputSource,
    ) -> NursingResult<DischargeOutcome> {
        self.stage = DischargeStage::AwaitingMedClearance;
        let patient = self.patients.lookup(patient)?.clone();
        tracing::info!(patient_id = %patient.id, nurse_id = %nurse.id, "discharge started");

        let medications_cleared = self.doses.all_doses_cleared(&patient.id);
        if !medications_cleared {
            return Ok(self.abort(&patient, GateFailure::MedicationsNotCleared));
        }
        self.stage = DischargeStage::AwaitingVitals;

        let vitals = VitalSigns::new(
            ask_reading(input, Prompt::Temperature)?,
            ask_reading(input, Prompt::SystolicBloodPressure)?,
            ask_reading(input, Prompt::HeartRate)?,
            ask_reading(input, Prompt::OxygenSaturation)?,
        );
        let vitals_safe = vitals.is_within_safe_range();
        if !vitals_safe {
            tracing::debug!(out_of_range = ?vitals.out_of_range(), "vital signs unsafe");
            return Ok(self.abort(&patient, GateFailure::VitalsUnsafe(vitals)));
        }
        self.stage = DischargeStage::AwaitingDoctorApproval;

        let doctor_approved = ask_yes_no(input, Prompt::DoctorApproval)?;
        if !doctor_approved {
            return Ok(self.abort(&patient, GateFailure::DoctorNotApproved));
        }
        self.stage = DischargeStage::AwaitingFollowupDecision;

        let clinical = self.clinical.summary_for(&patient.id);

        let follow_up = if ask_yes_no(input, Prompt::FollowUpScheduled)? {
            Some(FollowUpAppointment {
                clinic_or_purpose: input.answer(Prompt::FollowUpClinic)?.trim().to_string(),
                date: input.answer(Prompt::FollowUpDate)?.trim().to_string(),
                time: input.answer(Prompt::FollowUpTime)?.trim().to_string(),
                status: input.answer(Prompt::FollowUpStatus)?.trim().to_string(),
            })
        } else {
            None
        };
        self.stage = DischargeStage::AwaitingNotes;

        let notes = input.answer(Prompt::DischargeNotes)?.trim().to_string();

        let summary = DischargeSummary {
            id: RecordId::new(),
            created_at: Utc::now(),
            patient,
            nurse: nurse.clone(),
            medications_cleared,
            vitals_safe,
            doctor_approved,
            vitals,
            wound_info: clinical.wound,
            pain_info: clinical.pain,
            notes,
            follow_up,
        };
        self.stage = DischargeStage::Complete;
        tracing::info!(
            patient_id = %summary.patient.id,
            summary_id = %summary.id,
            "discharge completed"
        );

        Ok(DischargeOutcome::Completed(Box::new(summary)))
    }

    fn abort(&self, patient: &Patient, failure: GateFailure) -> DischargeOutcome {
        tracing::info!(
            patient_id = %patient.id,
            stage = ?self.stage,
            reason = %failure,
            "discharge aborted"
        );
        DischargeOutcome::Aborted(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{PainReport, WoundObservation};
    use crate::events::EventDispatcher;
    use crate::ids::{MedicationId, ScheduleEntryId};
    use crate::input::ScriptedInput;
    use crate::medication::{Medication, ScheduleEntry};
    use crate::repositories::{
        ClinicalLogStore, ClinicalSummary, InMemoryPatientRegistry, MedicationLedger,
    };
    use std::sync::Arc;
    use ward_types::NonEmptyText;

    struct FixedDoses(bool);

    static CLEARED: FixedDoses = FixedDoses(true);

    impl DoseClearance for FixedDoses {
        fn all_doses_cleared(&self, _patient: &PatientId) -> bool {
            self.0
        }
    }

    struct EmptyLogs;

    impl ClinicalSummarySource for EmptyLogs {
        fn summary_for(&self, _patient: &PatientId) -> ClinicalSummary {
            ClinicalSummary {
                wound: crate::constants::NO_WOUND_RECORDS.into(),
                pain: crate::constants::NO_PAIN_RECORDS.into(),
            }
        }
    }

    fn test_nurse() -> Nurse {
        Nurse::new("N100", "Alex Carter").unwrap()
    }

    fn pid() -> PatientId {
        PatientId::new("P001").unwrap()
    }

    fn registry() -> InMemoryPatientRegistry {
        let mut registry = InMemoryPatientRegistry::new();
        registry
            .register(Patient::new("P001", "Joe Tyler", "Room 001").unwrap())
            .unwrap();
        registry
    }

    struct Ward {
        patients: InMemoryPatientRegistry,
        ledger: MedicationLedger,
        logs: ClinicalLogStore,
    }

    fn ward_with_one_scheduled_dose() -> Ward {
        let dispatcher = Arc::new(EventDispatcher::logging());
        let mut ledger = MedicationLedger::new(dispatcher.clone());
        ledger
            .add_medication(Medication::new("100", "Paracetamol", "500mg", "Fever").unwrap())
            .unwrap();
        ledger
            .add_schedule(ScheduleEntry::new(
                ScheduleEntryId::new("S01").unwrap(),
                pid(),
                MedicationId::new("100").unwrap(),
                NonEmptyText::new("9:00 AM").unwrap(),
            ))
            .unwrap();
        let mut logs = ClinicalLogStore::new(dispatcher);
        logs.register_patient(&pid());

        Ward {
            patients: registry(),
            ledger,
            logs,
        }
    }

    fn happy_answers() -> Vec<&'static str> {
        vec!["98.6", "120", "72", "98", "yes", "no", "Rest at home"]
    }

    #[test]
    fn discharge_aborts_while_dose_scheduled_then_succeeds_after_administering() {
        let mut ward = ward_with_one_scheduled_dose();
        let nurse = test_nurse();

        {
            let mut workflow = DischargeWorkflow::new(&ward.patients, &ward.ledger, &ward.logs);
            let mut input = ScriptedInput::new(happy_answers());
            let outcome = workflow.process(&pid(), &nurse, &mut input).unwrap();

            assert_eq!(outcome, DischargeOutcome::Aborted(GateFailure::MedicationsNotCleared));
            assert_eq!(workflow.stage(), DischargeStage::AwaitingMedClearance);
            assert!(input.asked().is_empty(), "no prompts after a failed gate");
        }

        ward.ledger
            .administer(&ScheduleEntryId::new("S01").unwrap(), &nurse)
            .unwrap();

        let mut workflow = DischargeWorkflow::new(&ward.patients, &ward.ledger, &ward.logs);
        let mut input = ScriptedInput::new(happy_answers());
        let summary = workflow
            .process(&pid(), &nurse, &mut input)
            .unwrap()
            .into_summary()
            .expect("discharge should complete");

        assert!(summary.medications_cleared());
        assert!(summary.vitals_safe());
        assert!(summary.doctor_approved());
        assert_eq!(summary.vitals(), &VitalSigns::new(98.6, 120, 72, 98));
        assert_eq!(summary.notes(), "Rest at home");
        assert!(summary.follow_up().is_none());
        assert_eq!(workflow.stage(), DischargeStage::Complete);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn fever_aborts_regardless_of_other_gates() {
        let ward = ward_with_one_scheduled_dose();
        let patients = &ward.patients;
        let nurse = test_nurse();

        let mut workflow = DischargeWorkflow::new(patients, &CLEARED, &EmptyLogs);
        let mut input = ScriptedInput::new(["101.0", "120", "72", "98", "yes", "no", "notes"]);
        let outcome = workflow.process(&pid(), &nurse, &mut input).unwrap();

        match outcome {
            DischargeOutcome::Aborted(GateFailure::VitalsUnsafe(vitals)) => {
                assert_eq!(vitals.temperature_f(), 101.0);
            }
            other => panic!("expected vitals failure, got {other:?}"),
        }
        assert_eq!(workflow.stage(), DischargeStage::AwaitingVitals);
        assert_eq!(input.remaining(), 3, "doctor approval never asked");
    }

    #[test]
    fn doctor_refusal_aborts() {
        let patients = registry();
        let mut workflow = DischargeWorkflow::new(&patients, &CLEARED, &EmptyLogs);
        let mut input = ScriptedInput::new(["98.6", "120", "72", "98", "no"]);

        let outcome = workflow.process(&pid(), &test_nurse(), &mut input).unwrap();
        assert_eq!(outcome, DischargeOutcome::Aborted(GateFailure::DoctorNotApproved));
        assert_eq!(workflow.stage(), DischargeStage::AwaitingDoctorApproval);
        assert!(outcome.summary().is_none());
    }

    #[test]
    fn summary_only_when_every_gate_passes() {
        let patients = registry();
        let nurse = test_nurse();

        for meds in [false, true] {
            for vitals_ok in [false, true] {
                for doctor in [false, true] {
                    let temperature = if vitals_ok { "98.6" } else { "95.0" };
                    let approval = if doctor { "yes" } else { "no" };
                    let mut input = ScriptedInput::new([
                        temperature,
                        "120",
                        "72",
                        "98",
                        approval,
                        "no",
                        "notes",
                    ]);

                    let doses = FixedDoses(meds);
                    let mut workflow = DischargeWorkflow::new(&patients, &doses, &EmptyLogs);
                    let outcome = workflow.process(&pid(), &nurse, &mut input).unwrap();

                    match outcome.summary() {
                        Some(summary) => {
                            assert!(meds && vitals_ok && doctor);
                            assert!(
                                summary.medications_cleared()
                                    && summary.vitals_safe()
                                    && summary.doctor_approved()
                            );
                        }
                        None => assert!(!(meds && vitals_ok && doctor)),
                    }
                }
            }
        }
    }

    #[test]
    fn follow_up_and_clinical_summary_are_captured() {
        let mut ward = ward_with_one_scheduled_dose();
        let nurse = test_nurse();
        ward.ledger
            .hold_for_allergy(&ScheduleEntryId::new("S01").unwrap(), &nurse, "rash")
            .unwrap();
        ward.logs
            .record_pain(
                &pid(),
                PainReport {
                    level: 3,
                    location: "abdomen".into(),
                    pain_type: "dull".into(),
                    comments: String::new(),
                },
                &nurse.id,
            )
            .unwrap();
        ward.logs
            .record_wound(
                &pid(),
                WoundObservation {
                    appearance: "normal".into(),
                    size: "small".into(),
                    drainage: "none".into(),
                    dressing_changed: true,
                },
                &nurse.id,
            )
            .unwrap();

        let mut workflow = DischargeWorkflow::new(&ward.patients, &ward.ledger, &ward.logs);
        let mut input = ScriptedInput::new([
            "98.6",
            "120",
            "72",
            "98",
            "Yes",
            "yes",
            "Surgical clinic",
            "2026-11-02",
            "10:30",
            "booked",
            "Keep wound dry",
        ]);
        let summary = workflow
            .process(&pid(), &nurse, &mut input)
            .unwrap()
            .into_summary()
            .unwrap();

        assert_eq!(summary.wound_info(), "Wound assessments recorded: 1");
        assert_eq!(summary.pain_info(), "Pain assessments recorded: 1");
        assert_eq!(
            summary.follow_up().unwrap().to_string(),
            "Surgical clinic on 2026-11-02 at 10:30 (booked)"
        );

        let text = summary.to_string();
        assert!(text.starts_with("DISCHARGE SUMMARY\n"));
        assert!(text.contains("Patient: Joe Tyler (Room: Room 001)\n"));
        assert!(text.contains("Medications cleared: YES\n"));
        assert!(text.contains("Follow-up: Surgical clinic on 2026-11-02 at 10:30 (booked)\n"));
        assert!(text.ends_with("Discharge Notes:\nKeep wound dry\n"));
    }

    #[test]
    fn summary_without_follow_up_says_so() {
        let patients = registry();
        let mut workflow = DischargeWorkflow::new(&patients, &CLEARED, &EmptyLogs);
        let mut input = ScriptedInput::new(happy_answers());
        let summary = workflow
            .process(&pid(), &test_nurse(), &mut input)
            .unwrap()
            .into_summary()
            .unwrap();

        let text = summary.to_string();
        assert!(text.contains("Follow-up: No follow up scheduled.\n"));
        assert!(text.contains("Wound Information: No wound assessments found.\n"));
    }

    #[test]
    fn unknown_patient_is_an_error_not_an_abort() {
        let patients = registry();
        let mut workflow = DischargeWorkflow::new(&patients, &CLEARED, &EmptyLogs);
        let mut input = ScriptedInput::new(happy_answers());

        let err = workflow
            .process(&PatientId::new("P404").unwrap(), &test_nurse(), &mut input)
            .unwrap_err();
        assert!(matches!(err, NursingError::PatientNotFound(_)));
        assert!(input.asked().is_empty());
    }

    #[test]
    fn unparseable_reading_is_input_error() {
        let patients = registry();
        let mut workflow = DischargeWorkflow::new(&patients, &CLEARED, &EmptyLogs);
        let mut input = ScriptedInput::new(["98.6", "one-twenty"]);

        let err = workflow
            .process(&pid(), &test_nurse(), &mut input)
            .unwrap_err();
        assert!(matches!(err, NursingError::InvalidInput(_)));
    }

    #[test]
    fn running_out_of_answers_is_reported() {
        let patients = registry();
        let mut workflow = DischargeWorkflow::new(&patients, &CLEARED, &EmptyLogs);
        let mut input = ScriptedInput::new(["98.6", "120", "72", "98", "yes", "no"]);

        let err = workflow
            .process(&pid(), &test_nurse(), &mut input)
            .unwrap_err();
        assert!(matches!(err, NursingError::InputClosed(Prompt::DischargeNotes)));
        assert_eq!(workflow.stage(), DischargeStage::AwaitingNotes);
    }

    #[test]
    fn summary_renders_as_yaml() {
        let patients = registry();
        let mut workflow = DischargeWorkflow::new(&patients, &CLEARED, &EmptyLogs);
        let mut input = ScriptedInput::new(happy_answers());
        let summary = workflow
            .process(&pid(), &test_nurse(), &mut input)
            .unwrap()
            .into_summary()
            .unwrap();

        let yaml = summary.render_yaml().unwrap();
        assert!(yaml.contains("medications_cleared: true"));
        assert!(yaml.contains("notes: Rest at home"));
        assert!(yaml.contains("follow_up: null"));
    }
}
