use crate::ids::{MedicationId, PatientId, ScheduleEntryId};
use crate::input::Prompt;
use crate::medication::DoseStatus;

#[derive(Debug, thiserror::Error)]
pub enum NursingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("pain level {0} is outside the 0-10 scale")]
    InvalidPainLevel(i64),
    #[error("restock quantity must be positive, got {0}")]
    InvalidRestockQuantity(i64),
    #[error("invalid text: {0}")]
    Text(#[from] ward_types::TypeError),
    #[error("invalid nurse registration")]
    InvalidNurseRegistration,

    #[error("patient not found: {0}")]
    PatientNotFound(PatientId),
    #[error("medication not found: {0}")]
    MedicationNotFound(MedicationId),
    #[error("schedule entry not found: {0}")]
    ScheduleEntryNotFound(ScheduleEntryId),
    #[error("schedule entry {entry} is {status}, only SCHEDULED doses can be actioned")]
    DoseNotScheduled {
        entry: ScheduleEntryId,
        status: DoseStatus,
    },
    #[error("duplicate record: {0}")]
    DuplicateRecord(String),

    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(String),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("no answer available for prompt: {0}")]
    InputClosed(Prompt),
    #[error("failed to read input: {0}")]
    InputRead(std::io::Error),
    #[error("failed to write output: {0}")]
    OutputWrite(std::io::Error),
}

/// Broad classes of [`NursingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected at the boundary; nothing changed.
    Validation,
    /// The operation's precondition did not hold; nothing changed.
    Precondition,
    /// Files, YAML or the interactive input source failed.
    Infrastructure,
}

impl NursingError {
    pub fn kind(&self) -> ErrorKind {
        use NursingError::*;
        match self {
            InvalidInput(_)
            | InvalidPainLevel(_)
            | InvalidRestockQuantity(_)
            | Text(_)
            | InvalidNurseRegistration => ErrorKind::Validation,
            PatientNotFound(_)
            | MedicationNotFound(_)
            | ScheduleEntryNotFound(_)
            | DoseNotScheduled { .. }
            | DuplicateRecord(_) => ErrorKind::Precondition,
            FileRead(_)
            | FileWrite(_)
            | YamlDeserialization(_)
            | YamlSerialization(_)
            | InputClosed(_)
            | InputRead(_)
            | OutputWrite(_) => ErrorKind::Infrastructure,
        }
    }
}

pub type NursingResult<T> = std::result::Result<T, NursingError>;
