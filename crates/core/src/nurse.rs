//! Nurse identity.
//!
//! A [`Nurse`] is the actor behind every dose action, assessment and discharge in the ward.

use crate::error::{NursingError, NursingResult};
use crate::ids::NurseId;
use serde::Serialize;
use ward_types::NonEmptyText;

/// The nurse performing an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Nurse {
    /// Badge identifier.
    pub id: NurseId,

    /// Display name.
    pub name: NonEmptyText,

    /// Professional registration (e.g. NMC PIN), when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<NurseRegistration>,
}

impl Nurse {
    pub fn new(id: impl AsRef<str>, name: impl AsRef<str>) -> NursingResult<Self> {
        Ok(Self {
            id: NurseId::new(id)?,
            name: NonEmptyText::new(name)?,
            registration: None,
        })
    }

    pub fn with_registration(mut self, registration: NurseRegistration) -> Self {
        self.registration = Some(registration);
        self
    }
}

impl std::fmt::Display for Nurse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A declared professional registration for a nurse.
///
/// Rendered as `<authority> <number>`, e.g. `NMC 12A3456B`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct NurseRegistration {
    pub authority: NonEmptyText,
    pub number: NonEmptyText,
}

impl NurseRegistration {
    pub fn new(authority: impl Into<String>, number: impl Into<String>) -> NursingResult<Self> {
        let authority_str = authority.into().trim().to_string();
        let number_str = number.into().trim().to_string();

        if authority_str.chars().any(char::is_whitespace)
            || number_str.chars().any(char::is_whitespace)
        {
            return Err(NursingError::InvalidNurseRegistration);
        }

        let authority =
            NonEmptyText::new(authority_str).map_err(|_| NursingError::InvalidNurseRegistration)?;
        let number =
            NonEmptyText::new(number_str).map_err(|_| NursingError::InvalidNurseRegistration)?;

        Ok(Self { authority, number })
    }
}

impl std::fmt::Display for NurseRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.authority, self.number)
    }
}
