//! Pain and wound assessment records.
//!
//! Assessments are plain immutable values. The infection status of a wound is derived by
//! [`derive_wound_status`] before the record is built, never inside a constructor.

use crate::constants::{INFECTED_APPEARANCE, INFECTED_DRAINAGE};
use crate::ids::NurseId;
use serde::Serialize;
use ward_types::{NonEmptyText, PainScore};
use ward_uuid::TimestampId;

/// What the nurse reports for a pain assessment, before validation.
#[derive(Clone, Debug, Default)]
pub struct PainReport {
    /// Numeric rating; must be within 0-10.
    pub level: i64,
    pub location: String,
    /// e.g. sharp, dull, irritating
    pub pain_type: String,
    pub comments: String,
}

/// What the nurse observes for a wound assessment, before validation.
#[derive(Clone, Debug, Default)]
pub struct WoundObservation {
    /// e.g. normal, red, swollen
    pub appearance: String,
    /// e.g. small, medium, large
    pub size: String,
    /// e.g. none, serous, bleeding
    pub drainage: String,
    pub dressing_changed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PainAssessment {
    pub id: TimestampId,
    pub level: PainScore,
    pub location: NonEmptyText,
    pub pain_type: NonEmptyText,
    pub comments: String,
    pub nurse: NurseId,
}

impl std::fmt::Display for PainAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pain Level: {} | Location: {} | Type: {}",
            self.level, self.location, self.pain_type
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WoundStatus {
    Normal,
    Infected,
}

impl std::fmt::Display for WoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WoundStatus::Normal => "NORMAL",
            WoundStatus::Infected => "INFECTED",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WoundAssessment {
    pub id: TimestampId,
    pub appearance: NonEmptyText,
    pub size: NonEmptyText,
    pub drainage: NonEmptyText,
    pub dressing_changed: bool,
    pub status: WoundStatus,
    pub nurse: NurseId,
}

impl std::fmt::Display for WoundAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wound Appearance: {} | Size: {} | Drainage: {} | Dressing Changed: {} | Status: {}",
            self.appearance, self.size, self.drainage, self.dressing_changed, self.status
        )
    }
}

/// Infection is indicated by a red appearance or bleeding drainage, compared
/// case-insensitively. Nothing else (a swollen appearance, say) triggers it.
pub fn derive_wound_status(appearance: &str, drainage: &str) -> WoundStatus {
    if appearance.trim().eq_ignore_ascii_case(INFECTED_APPEARANCE)
        || drainage.trim().eq_ignore_ascii_case(INFECTED_DRAINAGE)
    {
        WoundStatus::Infected
    } else {
        WoundStatus::Normal
    }
}
