//! Medication ledger.
//!
//! Tracks, per patient, which scheduled doses have been administered or held, and forwards
//! restock requests to the pharmacy.
//!
//! ## Dose lifecycle
//!
//! ```text
//! SCHEDULED ──administer──────▶ ADMINISTERED
//!     │
//!     └──────hold_for_allergy──▶ HELD_ALLERGY
//! ```
//!
//! Both transitions happen once. Any action on a dose that is not `SCHEDULED` fails with
//! [`NursingError::DoseNotScheduled`] and leaves the entry untouched. Entries are never
//! removed.
//!
//! Mutating methods take `&mut self`: the read-check-write on an entry's status relies on
//! exclusive access to the ledger.

use super::DoseClearance;
use crate::error::{NursingError, NursingResult};
use crate::events::{Delivery, DomainEvent, EventDispatcher};
use crate::ids::{MedicationId, PatientId, ScheduleEntryId};
use crate::medication::{
    DoseAction, DoseStatus, Medication, RestockRequest, RestockStatus, ScheduleEntry,
};
use crate::nurse::Nurse;
use crate::validation::validate_restock_quantity;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use ward_uuid::RecordId;

#[derive(Debug)]
pub struct MedicationLedger {
    medications: BTreeMap<MedicationId, Medication>,
    entries: Vec<ScheduleEntry>,
    restocks: Vec<RestockRequest>,
    dispatcher: Arc<EventDispatcher>,
}

impl MedicationLedger {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            medications: BTreeMap::new(),
            entries: Vec::new(),
            restocks: Vec::new(),
            dispatcher,
        }
    }

    /// Adds a medication to the formulary.
    pub fn add_medication(&mut self, medication: Medication) -> NursingResult<()> {
        if self.medications.contains_key(&medication.id) {
            return Err(NursingError::DuplicateRecord(format!(
                "medication {}",
                medication.id
            )));
        }
        self.medications.insert(medication.id.clone(), medication);
        Ok(())
    }

    /// Adds a schedule entry. Its medication must already be in the formulary.
    pub fn add_schedule(&mut self, entry: ScheduleEntry) -> NursingResult<()> {
        if !self.medications.contains_key(entry.medication()) {
            return Err(NursingError::MedicationNotFound(entry.medication().clone()));
        }
        if self.entries.iter().any(|e| e.id() == entry.id()) {
            return Err(NursingError::DuplicateRecord(format!(
                "schedule entry {}",
                entry.id()
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn medication(&self, id: &MedicationId) -> NursingResult<&Medication> {
        self.medications
            .get(id)
            .ok_or_else(|| NursingError::MedicationNotFound(id.clone()))
    }

    pub fn medications(&self) -> impl Iterator<Item = &Medication> {
        self.medications.values()
    }

    pub fn entry(&self, id: &ScheduleEntryId) -> NursingResult<&ScheduleEntry> {
        self.entries
            .iter()
            .find(|e| e.id() == id)
            .ok_or_else(|| NursingError::ScheduleEntryNotFound(id.clone()))
    }

    /// The patient's schedule entries in the order they were added.
    pub fn schedules_for(&self, patient: &PatientId) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.patient() == patient)
            .collect()
    }

    /// Marks a scheduled dose as given by `nurse`.
    ///
    /// # Errors
    ///
    /// - [`NursingError::ScheduleEntryNotFound`] for an unknown entry,
    /// - [`NursingError::DoseNotScheduled`] if the dose was already administered or held.
    pub fn administer(
        &mut self,
        entry: &ScheduleEntryId,
        nurse: &Nurse,
    ) -> NursingResult<&ScheduleEntry> {
        let closed = self.close_entry(entry, nurse, DoseStatus::Administered, None)?;
        tracing::info!(
            entry = %closed.id(),
            patient_id = %closed.patient(),
            nurse_id = %nurse.id,
            "dose administered"
        );
        Ok(closed)
    }

    /// Withholds a scheduled dose because of an allergic reaction, recording `notes`.
    ///
    /// Blank notes still hold the dose; they are stored as no notes.
    ///
    /// # Errors
    ///
    /// As for [`administer`](Self::administer).
    pub fn hold_for_allergy(
        &mut self,
        entry: &ScheduleEntryId,
        nurse: &Nurse,
        notes: &str,
    ) -> NursingResult<&ScheduleEntry> {
        let notes = Some(notes.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let closed = self.close_entry(entry, nurse, DoseStatus::HeldAllergy, notes)?;
        tracing::warn!(
            entry = %closed.id(),
            patient_id = %closed.patient(),
            nurse_id = %nurse.id,
            "dose held due to allergy"
        );
        Ok(closed)
    }

    fn close_entry(
        &mut self,
        entry: &ScheduleEntryId,
        nurse: &Nurse,
        status: DoseStatus,
        notes: Option<String>,
    ) -> NursingResult<&ScheduleEntry> {
        let target = self
            .entries
            .iter_mut()
            .find(|e| e.id() == entry)
            .ok_or_else(|| NursingError::ScheduleEntryNotFound(entry.clone()))?;

        if target.status() != DoseStatus::Scheduled {
            return Err(NursingError::DoseNotScheduled {
                entry: entry.clone(),
                status: target.status(),
            });
        }

        target.close(
            status,
            DoseAction {
                nurse: nurse.id.clone(),
                at: Utc::now(),
            },
            notes,
        );
        Ok(target)
    }

    /// Asks the pharmacy to restock a medication. Dose state is not touched.
    ///
    /// The request is always kept. If the pharmacy cannot be reached it stays `Pending` with
    /// a timestamped note and is not retried.
    ///
    /// # Errors
    ///
    /// - [`NursingError::InvalidRestockQuantity`] unless `quantity` is positive,
    /// - [`NursingError::MedicationNotFound`] for a medication outside the formulary.
    pub fn request_restock(
        &mut self,
        medication: &MedicationId,
        quantity: i64,
    ) -> NursingResult<&RestockRequest> {
        let quantity = validate_restock_quantity(quantity)?;
        let stock_on_hand = self.medication(medication)?.stock;

        let id = RecordId::new();
        let event = DomainEvent::RestockRequested {
            request: id,
            medication: medication.clone(),
            quantity,
        };

        let requested_at = Utc::now();
        let status = match self.dispatcher.dispatch(&event) {
            Delivery::Delivered => RestockStatus::Sent,
            Delivery::Failed { reason } => RestockStatus::Pending {
                note: format!(
                    "pharmacy notification failed at {}: {reason}",
                    Utc::now().to_rfc3339()
                ),
            },
        };

        self.restocks.push(RestockRequest {
            id,
            medication: medication.clone(),
            quantity,
            stock_on_hand,
            requested_at,
            status,
        });
        Ok(&self.restocks[self.restocks.len() - 1])
    }

    /// Every restock request made, oldest first.
    pub fn restock_requests(&self) -> &[RestockRequest] {
        &self.restocks
    }

    pub fn all_doses_cleared(&self, patient: &PatientId) -> bool {
        self.entries
            .iter()
            .filter(|e| e.patient() == patient)
            .all(|e| e.status().is_terminal())
    }
}

impl DoseClearance for MedicationLedger {
    fn all_doses_cleared(&self, patient: &PatientId) -> bool {
        MedicationLedger::all_doses_cleared(self, patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::events::testing::{recording_dispatcher, RecordingNotifier};
    use ward_types::NonEmptyText;

    fn test_nurse() -> Nurse {
        Nurse::new("N100", "Alex Carter").unwrap()
    }

    fn pid(s: &str) -> PatientId {
        PatientId::new(s).unwrap()
    }

    fn sid(s: &str) -> ScheduleEntryId {
        ScheduleEntryId::new(s).unwrap()
    }

    fn mid(s: &str) -> MedicationId {
        MedicationId::new(s).unwrap()
    }

    fn ledger_with(dispatcher: Arc<EventDispatcher>) -> MedicationLedger {
        let mut ledger = MedicationLedger::new(dispatcher);
        ledger
            .add_medication(
                Medication::new("100", "Paracetamol", "500mg", "Fever")
                    .unwrap()
                    .with_stock(2),
            )
            .unwrap();
        ledger
            .add_medication(Medication::new("200", "Ibuprofen", "200mg", "Stomach upset").unwrap())
            .unwrap();
        for (entry, patient, medication, time) in [
            ("S01", "P001", "100", "9:00 AM"),
            ("S02", "P001", "200", "2:00 PM"),
            ("S03", "P002", "100", "11:00 AM"),
        ] {
            ledger
                .add_schedule(ScheduleEntry::new(
                    sid(entry),
                    pid(patient),
                    mid(medication),
                    NonEmptyText::new(time).unwrap(),
                ))
                .unwrap();
        }
        ledger
    }

    fn ledger() -> MedicationLedger {
        ledger_with(Arc::new(EventDispatcher::logging()))
    }

    #[test]
    fn administer_moves_scheduled_dose_to_administered() {
        let mut ledger = ledger();
        let nurse = test_nurse();

        let entry = ledger.administer(&sid("S01"), &nurse).unwrap();
        assert_eq!(entry.status(), DoseStatus::Administered);
        assert_eq!(entry.action().unwrap().nurse, nurse.id);
    }

    #[test]
    fn administer_twice_is_precondition_violation_and_leaves_entry_unchanged() {
        let mut ledger = ledger();
        let nurse = test_nurse();
        ledger.administer(&sid("S01"), &nurse).unwrap();
        let before = ledger.entry(&sid("S01")).unwrap().clone();

        let err = ledger.administer(&sid("S01"), &nurse).unwrap_err();
        assert!(matches!(
            err,
            NursingError::DoseNotScheduled {
                status: DoseStatus::Administered,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(ledger.entry(&sid("S01")).unwrap(), &before);
    }

    #[test]
    fn hold_for_allergy_records_notes() {
        let mut ledger = ledger();
        let entry = ledger
            .hold_for_allergy(&sid("S02"), &test_nurse(), "hives after first dose")
            .unwrap();
        assert_eq!(entry.status(), DoseStatus::HeldAllergy);
        assert_eq!(entry.notes(), Some("hives after first dose"));
    }

    #[test]
    fn hold_after_administer_is_rejected() {
        let mut ledger = ledger();
        let nurse = test_nurse();
        ledger.administer(&sid("S02"), &nurse).unwrap();

        let err = ledger
            .hold_for_allergy(&sid("S02"), &nurse, "rash")
            .unwrap_err();
        assert!(matches!(err, NursingError::DoseNotScheduled { .. }));
        assert_eq!(ledger.entry(&sid("S02")).unwrap().notes(), None);
    }

    #[test]
    fn hold_with_blank_notes_still_clears_the_dose() {
        let mut ledger = ledger();
        let nurse = test_nurse();
        ledger.administer(&sid("S01"), &nurse).unwrap();

        let entry = ledger.hold_for_allergy(&sid("S02"), &nurse, "   ").unwrap();
        assert_eq!(entry.status(), DoseStatus::HeldAllergy);
        assert_eq!(entry.notes(), None);
        assert!(ledger.all_doses_cleared(&pid("P001")));
    }

    #[test]
    fn unknown_entry_is_reported() {
        let mut ledger = ledger();
        let err = ledger.administer(&sid("S99"), &test_nurse()).unwrap_err();
        assert!(matches!(err, NursingError::ScheduleEntryNotFound(_)));
    }

    #[test]
    fn doses_cleared_only_when_every_entry_is_terminal() {
        let mut ledger = ledger();
        let nurse = test_nurse();
        let patient = pid("P001");

        assert!(!ledger.all_doses_cleared(&patient));
        ledger.administer(&sid("S01"), &nurse).unwrap();
        assert!(!ledger.all_doses_cleared(&patient));
        ledger
            .hold_for_allergy(&sid("S02"), &nurse, "swelling")
            .unwrap();
        assert!(ledger.all_doses_cleared(&patient));

        // Other patients are unaffected.
        assert!(!ledger.all_doses_cleared(&pid("P002")));
    }

    #[test]
    fn patient_without_schedule_is_cleared() {
        assert!(ledger().all_doses_cleared(&pid("P404")));
    }

    #[test]
    fn schedules_for_keeps_insertion_order() {
        let ledger = ledger();
        let ids: Vec<_> = ledger
            .schedules_for(&pid("P001"))
            .iter()
            .map(|e| e.id().as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["S01", "S02"]);
    }

    #[test]
    fn add_schedule_requires_known_medication() {
        let mut ledger = ledger();
        let err = ledger
            .add_schedule(ScheduleEntry::new(
                sid("S10"),
                pid("P001"),
                mid("999"),
                NonEmptyText::new("8:00 AM").unwrap(),
            ))
            .unwrap_err();
        assert!(matches!(err, NursingError::MedicationNotFound(_)));
    }

    #[test]
    fn restock_rejects_non_positive_quantity_without_notifying() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut ledger = ledger_with(recording_dispatcher(&notifier));

        for quantity in [0, -4] {
            let err = ledger.request_restock(&mid("100"), quantity).unwrap_err();
            assert!(matches!(err, NursingError::InvalidRestockQuantity(_)));
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert!(notifier.pharmacy_calls.lock().unwrap().is_empty());
        assert!(ledger.restock_requests().is_empty());
    }

    #[test]
    fn restock_unknown_medication_is_rejected() {
        let mut ledger = ledger();
        let err = ledger.request_restock(&mid("999"), 3).unwrap_err();
        assert!(matches!(err, NursingError::MedicationNotFound(_)));
    }

    #[test]
    fn restock_notifies_pharmacy_and_leaves_doses_alone() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut ledger = ledger_with(recording_dispatcher(&notifier));

        let request = ledger.request_restock(&mid("200"), 10).unwrap();
        assert_eq!(request.status, RestockStatus::Sent);
        assert_eq!(request.quantity, 10);
        assert_eq!(request.stock_on_hand, 0);

        assert_eq!(
            notifier.pharmacy_calls.lock().unwrap().as_slice(),
            &[(mid("200"), 10)]
        );
        assert!(ledger
            .schedules_for(&pid("P001"))
            .iter()
            .all(|e| e.status() == DoseStatus::Scheduled));
    }

    #[test]
    fn restock_kept_pending_when_pharmacy_unreachable() {
        let notifier = Arc::new(RecordingNotifier::offline());
        let mut ledger = ledger_with(recording_dispatcher(&notifier));

        let request = ledger.request_restock(&mid("100"), 2).unwrap().clone();
        assert!(request.is_pending());
        assert_eq!(request.stock_on_hand, 2);
        match &request.status {
            RestockStatus::Pending { note } => {
                assert!(note.starts_with("pharmacy notification failed at "));
            }
            RestockStatus::Sent => panic!("expected pending request"),
        }

        // Kept on record, and not re-sent.
        assert_eq!(ledger.restock_requests(), &[request]);
        assert_eq!(notifier.pharmacy_calls.lock().unwrap().len(), 1);
    }
}
