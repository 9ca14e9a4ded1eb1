//! Opaque identifiers for ward reference data.
//!
//! Patients, nurses, medications and schedule entries arrive with identifiers assigned by the
//! hospital (`P001`, `S01`, a nurse badge number). Each gets its own type so that a
//! medication id can never be passed where a patient id is expected.

use ward_types::{NonEmptyText, TypeError};

macro_rules! ward_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(NonEmptyText);

        impl $name {
            pub fn new(value: impl AsRef<str>) -> Result<Self, TypeError> {
                NonEmptyText::new(value).map(Self)
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

ward_id!(
    /// Hospital patient identifier, e.g. `P001`.
    PatientId
);
ward_id!(
    /// Nurse badge identifier.
    NurseId
);
ward_id!(
    /// Pharmacy medication code, e.g. `100`.
    MedicationId
);
ward_id!(
    /// Medication schedule entry identifier, e.g. `S01`.
    ScheduleEntryId
);
