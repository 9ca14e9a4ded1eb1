//! Patient reference data.

use crate::error::NursingResult;
use crate::ids::PatientId;
use serde::{Deserialize, Serialize};
use ward_types::NonEmptyText;

/// A patient on the ward. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Patient {
    pub id: PatientId,
    pub name: NonEmptyText,
    pub room: NonEmptyText,
}

impl Patient {
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        room: impl AsRef<str>,
    ) -> NursingResult<Self> {
        Ok(Self {
            id: PatientId::new(id)?,
            name: NonEmptyText::new(name)?,
            room: NonEmptyText::new(room)?,
        })
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Room: {})", self.name, self.room)
    }
}
