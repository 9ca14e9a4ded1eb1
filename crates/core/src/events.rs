//! Domain events and notification dispatch.
//!
//! Core operations describe what happened as a [`DomainEvent`] and hand it to the
//! [`EventDispatcher`], which forwards it to the physician or pharmacy collaborator.
//! Notification failures are logged and reported back as [`Delivery::Failed`]; they never
//! turn into an error for the operation that raised the event.

use crate::ids::{MedicationId, PatientId};
use std::sync::Arc;
use ward_uuid::{RecordId, TimestampId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    /// A wound assessment showed infection indicators.
    InfectionDetected {
        patient: PatientId,
        assessment: TimestampId,
        reason: String,
    },
    /// A nurse asked the pharmacy to restock a medication.
    RestockRequested {
        request: RecordId,
        medication: MedicationId,
        quantity: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("{sink} notification sink unreachable: {reason}")]
    Unreachable { sink: &'static str, reason: String },
}

/// Outcome of forwarding an event to its collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Failed { reason: String },
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

/// Receives "physician notified" signals.
pub trait PhysicianNotifier {
    fn notify(&self, patient: &PatientId, reason: &str) -> Result<(), NotificationError>;
}

/// Receives restock requests.
pub trait PharmacyNotifier {
    fn request_restock(
        &self,
        medication: &MedicationId,
        quantity: u32,
    ) -> Result<(), NotificationError>;
}

impl<T: PhysicianNotifier + ?Sized> PhysicianNotifier for Arc<T> {
    fn notify(&self, patient: &PatientId, reason: &str) -> Result<(), NotificationError> {
        (**self).notify(patient, reason)
    }
}

impl<T: PharmacyNotifier + ?Sized> PharmacyNotifier for Arc<T> {
    fn request_restock(
        &self,
        medication: &MedicationId,
        quantity: u32,
    ) -> Result<(), NotificationError> {
        (**self).request_restock(medication, quantity)
    }
}

/// Notifier that writes to the tracing log.
///
/// With `available == false` it behaves as an unreachable sink, which is how outages are
/// simulated from configuration.
#[derive(Clone, Copy, Debug)]
pub struct TracingNotifier {
    available: bool,
}

impl TracingNotifier {
    pub fn new(available: bool) -> Self {
        Self { available }
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PhysicianNotifier for TracingNotifier {
    fn notify(&self, patient: &PatientId, reason: &str) -> Result<(), NotificationError> {
        if !self.available {
            return Err(NotificationError::Unreachable {
                sink: "physician",
                reason: "paging service offline".into(),
            });
        }
        tracing::info!(patient_id = %patient, reason, "physician notified");
        Ok(())
    }
}

impl PharmacyNotifier for TracingNotifier {
    fn request_restock(
        &self,
        medication: &MedicationId,
        quantity: u32,
    ) -> Result<(), NotificationError> {
        if !self.available {
            return Err(NotificationError::Unreachable {
                sink: "pharmacy",
                reason: "pharmacy system offline".into(),
            });
        }
        tracing::info!(medication_id = %medication, quantity, "pharmacy restock requested");
        Ok(())
    }
}

/// Routes domain events to notification collaborators.
pub struct EventDispatcher {
    physician: Box<dyn PhysicianNotifier>,
    pharmacy: Box<dyn PharmacyNotifier>,
}

impl EventDispatcher {
    pub fn new(
        physician: impl PhysicianNotifier + 'static,
        pharmacy: impl PharmacyNotifier + 'static,
    ) -> Self {
        Self {
            physician: Box::new(physician),
            pharmacy: Box::new(pharmacy),
        }
    }

    /// Dispatcher whose collaborators only log.
    pub fn logging() -> Self {
        Self::new(TracingNotifier::default(), TracingNotifier::default())
    }

    /// Forwards `event`. No retry is attempted on failure.
    pub fn dispatch(&self, event: &DomainEvent) -> Delivery {
        let result = match event {
            DomainEvent::InfectionDetected {
                patient, reason, ..
            } => self.physician.notify(patient, reason),
            DomainEvent::RestockRequested {
                medication,
                quantity,
                ..
            } => self.pharmacy.request_restock(medication, *quantity),
        };

        match result {
            Ok(()) => Delivery::Delivered,
            Err(e) => {
                tracing::warn!(?event, error = %e, "notification not delivered");
                Delivery::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::logging()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher").finish_non_exhaustive()
    }
}
