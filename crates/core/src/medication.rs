//! Medication reference data and dose schedule entries.

use crate::error::NursingResult;
use crate::ids::{MedicationId, NurseId, PatientId, ScheduleEntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ward_types::NonEmptyText;
use ward_uuid::RecordId;

/// A medication in the ward formulary. Immutable reference data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Medication {
    pub id: MedicationId,
    pub name: NonEmptyText,
    /// Dosage strength, e.g. `500mg`.
    pub dosage: NonEmptyText,
    pub indication: NonEmptyText,
    /// Units on hand when the roster was loaded. Reference data only; the ledger does not
    /// count doses against it.
    #[serde(default)]
    pub stock: u32,
}

impl Medication {
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        dosage: impl AsRef<str>,
        indication: impl AsRef<str>,
    ) -> NursingResult<Self> {
        Ok(Self {
            id: MedicationId::new(id)?,
            name: NonEmptyText::new(name)?,
            dosage: NonEmptyText::new(dosage)?,
            indication: NonEmptyText::new(indication)?,
            stock: 0,
        })
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }
}

impl std::fmt::Display for Medication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.name, self.dosage, self.indication)
    }
}

/// Lifecycle of a scheduled dose.
///
/// `Scheduled` is the only non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoseStatus {
    Scheduled,
    Administered,
    HeldAllergy,
}

impl DoseStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DoseStatus::Scheduled)
    }
}

impl std::fmt::Display for DoseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DoseStatus::Scheduled => "SCHEDULED",
            DoseStatus::Administered => "ADMINISTERED",
            DoseStatus::HeldAllergy => "HELD_ALLERGY",
        };
        f.write_str(s)
    }
}

/// Who actioned a dose, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DoseAction {
    pub nurse: NurseId,
    pub at: DateTime<Utc>,
}

/// A single scheduled dose of a medication for a patient.
///
/// Status changes only through the medication ledger, exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    id: ScheduleEntryId,
    patient: PatientId,
    medication: MedicationId,
    time: NonEmptyText,
    status: DoseStatus,
    notes: Option<String>,
    action: Option<DoseAction>,
}

impl ScheduleEntry {
    /// A new entry in the `Scheduled` state.
    ///
    /// * `time` - time-of-day label, e.g. `9:00 AM`
    pub fn new(
        id: ScheduleEntryId,
        patient: PatientId,
        medication: MedicationId,
        time: NonEmptyText,
    ) -> Self {
        Self {
            id,
            patient,
            medication,
            time,
            status: DoseStatus::Scheduled,
            notes: None,
            action: None,
        }
    }

    pub fn id(&self) -> &ScheduleEntryId {
        &self.id
    }

    pub fn patient(&self) -> &PatientId {
        &self.patient
    }

    pub fn medication(&self) -> &MedicationId {
        &self.medication
    }

    pub fn time(&self) -> &str {
        self.time.as_str()
    }

    pub fn status(&self) -> DoseStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn action(&self) -> Option<&DoseAction> {
        self.action.as_ref()
    }

    /// Caller has already checked the entry is `Scheduled`.
    pub(crate) fn close(&mut self, status: DoseStatus, action: DoseAction, notes: Option<String>) {
        self.status = status;
        self.action = Some(action);
        self.notes = notes;
    }
}

impl std::fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | medication {} at {} | {}",
            self.id, self.medication, self.time, self.status
        )?;
        if let Some(notes) = &self.notes {
            write!(f, " | notes: {notes}")?;
        }
        Ok(())
    }
}

/// Delivery state of a pharmacy restock request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RestockStatus {
    /// The pharmacy acknowledged the request.
    Sent,
    /// The pharmacy could not be reached. Not retried automatically.
    Pending { note: String },
}

/// A request for the pharmacy to restock a medication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RestockRequest {
    pub id: RecordId,
    pub medication: MedicationId,
    pub quantity: u32,
    /// The medication's recorded stock when the request was made.
    pub stock_on_hand: u32,
    pub requested_at: DateTime<Utc>,
    pub status: RestockStatus,
}

impl RestockRequest {
    pub fn is_pending(&self) -> bool {
        matches!(self.status, RestockStatus::Pending { .. })
    }
}
