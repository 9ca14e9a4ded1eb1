//! Constants used throughout the ward core crate.
//!
//! Clinical thresholds and the fixed wording of summary lines live here so that the
//! discharge rules can be reviewed in one place.

use std::ops::RangeInclusive;

/// Safe oral temperature, degrees Fahrenheit (inclusive).
pub const SAFE_TEMPERATURE_F: RangeInclusive<f64> = 96.0..=100.4;

/// Safe systolic blood pressure, mmHg (inclusive).
pub const SAFE_SYSTOLIC_BP: RangeInclusive<i32> = 90..=140;

/// Safe resting heart rate, beats per minute (inclusive).
pub const SAFE_HEART_RATE: RangeInclusive<i32> = 50..=110;

/// Lowest safe oxygen saturation, percent. There is no upper bound.
pub const MIN_OXYGEN_SATURATION: i32 = 94;

/// Wound appearance that indicates infection.
pub const INFECTED_APPEARANCE: &str = "red";

/// Wound drainage that indicates infection.
pub const INFECTED_DRAINAGE: &str = "bleeding";

/// Summary line used when a patient has no wound assessments.
pub const NO_WOUND_RECORDS: &str = "No wound assessments found.";

/// Summary line used when a patient has no pain assessments.
pub const NO_PAIN_RECORDS: &str = "No pain assessments found.";

/// Summary line shown in place of a missing follow-up appointment.
pub const NO_FOLLOW_UP: &str = "No follow up scheduled.";

/// Ward name used when none is configured.
pub const DEFAULT_WARD_NAME: &str = "General Ward";

/// Default filename for a ward roster.
pub const DEFAULT_ROSTER_FILENAME: &str = "roster.yaml";

/// Roster loaded when no roster file is configured.
pub const BUILTIN_ROSTER: &str = r#"patients:
  - id: P001
    name: Joe Tyler
    room: Room 001
  - id: P002
    name: Sebastian Smith
    room: Room 002
  - id: P003
    name: Brad Powell
    room: Room 003
medications:
  - id: "100"
    name: Paracetamol
    dosage: 500mg
    indication: Fever
    stock: 2
  - id: "200"
    name: Ibuprofen
    dosage: 200mg
    indication: Stomach upset
    stock: 0
  - id: "300"
    name: Amoxicillin
    dosage: 250mg
    indication: Rash
    stock: 3
schedules:
  - id: S01
    patient: P001
    medication: "100"
    time: "9:00 AM"
  - id: S02
    patient: P001
    medication: "200"
    time: "2:00 PM"
  - id: S03
    patient: P002
    medication: "300"
    time: "11:00 AM"
  - id: S04
    patient: P003
    medication: "100"
    time: "10:00 PM"
  - id: S05
    patient: P003
    medication: "300"
    time: "4:00 PM"
"#;
