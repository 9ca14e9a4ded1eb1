//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the ward. Nothing
//! in this crate reads environment variables while a session is running; the CLI reads them
//! and hands the raw values to the parsing helpers below.

use crate::error::{NursingError, NursingResult};
use crate::events::{EventDispatcher, TracingNotifier};
use crate::roster::WardRoster;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use ward_types::NonEmptyText;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    ward_name: NonEmptyText,
    roster_path: Option<PathBuf>,
    physician_available: bool,
    pharmacy_available: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with both notification channels available.
    pub fn new(ward_name: impl AsRef<str>, roster_path: Option<PathBuf>) -> NursingResult<Self> {
        let ward_name = NonEmptyText::new(ward_name)
            .map_err(|_| NursingError::InvalidInput("ward name cannot be empty".into()))?;

        Ok(Self {
            ward_name,
            roster_path,
            physician_available: true,
            pharmacy_available: true,
        })
    }

    /// Marks notification channels as down, for drills and tests.
    pub fn with_simulated_outages(mut self, physician_down: bool, pharmacy_down: bool) -> Self {
        self.physician_available = !physician_down;
        self.pharmacy_available = !pharmacy_down;
        self
    }

    pub fn ward_name(&self) -> &str {
        self.ward_name.as_str()
    }

    pub fn roster_path(&self) -> Option<&Path> {
        self.roster_path.as_deref()
    }

    pub fn physician_available(&self) -> bool {
        self.physician_available
    }

    pub fn pharmacy_available(&self) -> bool {
        self.pharmacy_available
    }

    /// Builds the event dispatcher shared by the ward's repositories.
    pub fn dispatcher(&self) -> Arc<EventDispatcher> {
        Arc::new(EventDispatcher::new(
            TracingNotifier::new(self.physician_available),
            TracingNotifier::new(self.pharmacy_available),
        ))
    }

    /// Loads the configured roster, or the built-in one when no path is set.
    pub fn load_roster(&self) -> NursingResult<WardRoster> {
        match &self.roster_path {
            Some(path) => WardRoster::load(path),
            None => WardRoster::builtin(),
        }
    }
}

/// Parse an optional roster path.
///
/// `None` or an empty/whitespace value means "use the built-in roster".
pub fn roster_path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse an optional boolean flag.
///
/// Accepts `1`, `true`, `yes` and `on` (any case) as set. Anything else, including a missing
/// value, is unset.
pub fn flag_from_env_value(value: Option<String>) -> bool {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DomainEvent;
    use crate::ids::{MedicationId, PatientId};
    use ward_uuid::RecordId;

    #[test]
    fn new_rejects_blank_ward_name() {
        let err = CoreConfig::new("   ", None).unwrap_err();
        assert!(matches!(err, NursingError::InvalidInput(_)));
    }

    #[test]
    fn channels_default_to_available() {
        let cfg = CoreConfig::new("Ward 7", None).unwrap();
        assert_eq!(cfg.ward_name(), "Ward 7");
        assert!(cfg.physician_available());
        assert!(cfg.pharmacy_available());
        assert!(cfg.roster_path().is_none());
    }

    #[test]
    fn simulated_outage_fails_delivery() {
        let cfg = CoreConfig::new("Ward 7", None)
            .unwrap()
            .with_simulated_outages(false, true);
        assert!(cfg.physician_available());
        assert!(!cfg.pharmacy_available());

        let dispatcher = cfg.dispatcher();
        let restock = DomainEvent::RestockRequested {
            medication: MedicationId::new("100").unwrap(),
            quantity: 5,
            request: RecordId::new(),
        };
        assert!(!dispatcher.dispatch(&restock).is_delivered());

        let infection = DomainEvent::InfectionDetected {
            patient: PatientId::new("P001").unwrap(),
            assessment: ward_uuid::TimestampIdGenerator::new().next_id(),
            reason: "red".into(),
        };
        assert!(dispatcher.dispatch(&infection).is_delivered());
    }

    #[test]
    fn roster_path_blank_means_builtin() {
        assert_eq!(roster_path_from_env_value(None), None);
        assert_eq!(roster_path_from_env_value(Some("  ".into())), None);
        assert_eq!(
            roster_path_from_env_value(Some(" ward.yaml ".into())),
            Some(PathBuf::from("ward.yaml"))
        );
    }

    #[test]
    fn flag_values() {
        assert!(flag_from_env_value(Some("1".into())));
        assert!(flag_from_env_value(Some(" TRUE ".into())));
        assert!(flag_from_env_value(Some("on".into())));
        assert!(!flag_from_env_value(Some("0".into())));
        assert!(!flag_from_env_value(Some("".into())));
        assert!(!flag_from_env_value(None));
    }

    #[test]
    fn load_roster_without_path_uses_builtin() {
        let cfg = CoreConfig::new("Ward 7", None).unwrap();
        let roster = cfg.load_roster().unwrap();
        assert_eq!(roster.patients.len(), 3);
    }
}
