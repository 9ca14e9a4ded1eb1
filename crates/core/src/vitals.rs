//! Vital-sign safety evaluation.
//!
//! Discharge requires every reading to sit inside its safe range. The check is a pure
//! predicate: no unit conversion, no partial credit.

use crate::constants::{
    MIN_OXYGEN_SATURATION, SAFE_HEART_RATE, SAFE_SYSTOLIC_BP, SAFE_TEMPERATURE_F,
};
use serde::Serialize;

/// One set of vital-sign readings taken for a discharge attempt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VitalSigns {
    temperature_f: f64,
    systolic_bp: i32,
    heart_rate: i32,
    oxygen_saturation: i32,
}

/// Identifies a single reading within [`VitalSigns`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VitalSign {
    Temperature,
    SystolicBloodPressure,
    HeartRate,
    OxygenSaturation,
}

impl VitalSign {
    /// Every reading, in the order failures are reported.
    pub const ALL: [VitalSign; 4] = [
        VitalSign::Temperature,
        VitalSign::SystolicBloodPressure,
        VitalSign::HeartRate,
        VitalSign::OxygenSaturation,
    ];

    /// True when this reading of `vitals` is inside its inclusive safe range.
    ///
    /// A non-finite temperature is never safe.
    pub fn is_safe(&self, vitals: &VitalSigns) -> bool {
        match self {
            VitalSign::Temperature => SAFE_TEMPERATURE_F.contains(&vitals.temperature_f),
            VitalSign::SystolicBloodPressure => SAFE_SYSTOLIC_BP.contains(&vitals.systolic_bp),
            VitalSign::HeartRate => SAFE_HEART_RATE.contains(&vitals.heart_rate),
            VitalSign::OxygenSaturation => vitals.oxygen_saturation >= MIN_OXYGEN_SATURATION,
        }
    }
}

impl std::fmt::Display for VitalSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VitalSign::Temperature => "temperature",
            VitalSign::SystolicBloodPressure => "systolic blood pressure",
            VitalSign::HeartRate => "heart rate",
            VitalSign::OxygenSaturation => "oxygen saturation",
        };
        f.write_str(name)
    }
}

impl VitalSigns {
    /// * `temperature_f` - degrees Fahrenheit
    /// * `systolic_bp` - mmHg
    /// * `heart_rate` - beats per minute
    /// * `oxygen_saturation` - percent
    pub fn new(
        temperature_f: f64,
        systolic_bp: i32,
        heart_rate: i32,
        oxygen_saturation: i32,
    ) -> Self {
        Self {
            temperature_f,
            systolic_bp,
            heart_rate,
            oxygen_saturation,
        }
    }

    pub fn temperature_f(&self) -> f64 {
        self.temperature_f
    }

    pub fn systolic_bp(&self) -> i32 {
        self.systolic_bp
    }

    pub fn heart_rate(&self) -> i32 {
        self.heart_rate
    }

    pub fn oxygen_saturation(&self) -> i32 {
        self.oxygen_saturation
    }

    /// Readings that fall outside their safe range, in [`VitalSign::ALL`] order.
    pub fn out_of_range(&self) -> Vec<VitalSign> {
        VitalSign::ALL
            .into_iter()
            .filter(|sign| !sign.is_safe(self))
            .collect()
    }

    pub fn is_within_safe_range(&self) -> bool {
        is_within_safe_range(self)
    }
}

/// True when every reading is inside its inclusive safe range.
pub fn is_within_safe_range(vitals: &VitalSigns) -> bool {
    VitalSign::ALL.iter().all(|sign| sign.is_safe(vitals))
}

impl std::fmt::Display for VitalSigns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Temperature: {} F, Blood Pressure: {} mmHg, Heart Rate: {} bpm, Oxygen Saturation: {}%",
            self.temperature_f, self.systolic_bp, self.heart_rate, self.oxygen_saturation
        )
    }
}
