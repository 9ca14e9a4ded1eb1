//! Clinical log store: append-only pain and wound assessments per patient.
//!
//! Records are never edited or removed once appended. Callers get read-only views of the
//! history; only the store can append.

use super::ClinicalSummarySource;
use crate::assessment::{
    derive_wound_status, PainAssessment, PainReport, WoundAssessment, WoundObservation,
    WoundStatus,
};
use crate::constants::{NO_PAIN_RECORDS, NO_WOUND_RECORDS};
use crate::error::{NursingError, NursingResult};
use crate::events::{DomainEvent, EventDispatcher};
use crate::ids::{NurseId, PatientId};
use crate::validation::validate_pain_level;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use ward_types::NonEmptyText;
use ward_uuid::TimestampIdGenerator;

/// Human-readable wound and pain lines for a discharge summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClinicalSummary {
    pub wound: String,
    pub pain: String,
}

#[derive(Debug, Default)]
struct PatientLog {
    pain: Vec<PainAssessment>,
    wound: Vec<WoundAssessment>,
}

#[derive(Debug)]
pub struct ClinicalLogStore {
    logs: HashMap<PatientId, PatientLog>,
    ids: TimestampIdGenerator,
    dispatcher: Arc<EventDispatcher>,
}

impl ClinicalLogStore {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            logs: HashMap::new(),
            ids: TimestampIdGenerator::new(),
            dispatcher,
        }
    }

    /// Opens an empty log for a patient. Registering twice is harmless.
    pub fn register_patient(&mut self, patient: &PatientId) {
        self.logs.entry(patient.clone()).or_default();
    }

    fn log_mut<'a>(
        logs: &'a mut HashMap<PatientId, PatientLog>,
        patient: &PatientId,
    ) -> NursingResult<&'a mut PatientLog> {
        logs.get_mut(patient).ok_or_else(|| NursingError::PatientNotFound(patient.clone()))
    }

    /// Appends a pain assessment.
    ///
    /// # Errors
    ///
    /// - [`NursingError::InvalidPainLevel`] when the level is outside 0-10 (not clamped),
    /// - [`NursingError::Text`] for a blank location or pain type,
    /// - [`NursingError::PatientNotFound`] for a patient without a log.
    ///
    /// Nothing is appended when an error is returned.
    pub fn record_pain(
        &mut self,
        patient: &PatientId,
        report: PainReport,
        nurse: &NurseId,
    ) -> NursingResult<PainAssessment> {
        let level = validate_pain_level(report.level)?;
        let location = NonEmptyText::new(&report.location)?;
        let pain_type = NonEmptyText::new(&report.pain_type)?;
        let log = Self::log_mut(&mut self.logs, patient)?;

        let assessment = PainAssessment {
            id: self.ids.next_id(),
            level,
            location,
            pain_type,
            comments: report.comments.trim().to_string(),
            nurse: nurse.clone(),
        };

        log.pain.push(assessment.clone());
        tracing::info!(patient_id = %patient, level = %level, "pain assessment recorded");
        Ok(assessment)
    }

    /// Appends a wound assessment, deriving its infection status.
    ///
    /// An infected wound raises [`DomainEvent::InfectionDetected`]. Whether or not the
    /// physician is reached, the assessment itself is recorded and returned.
    pub fn record_wound(
        &mut self,
        patient: &PatientId,
        observation: WoundObservation,
        nurse: &NurseId,
    ) -> NursingResult<WoundAssessment> {
        let appearance = NonEmptyText::new(&observation.appearance)?;
        let size = NonEmptyText::new(&observation.size)?;
        let drainage = NonEmptyText::new(&observation.drainage)?;
        let log = Self::log_mut(&mut self.logs, patient)?;

        let status = derive_wound_status(appearance.as_str(), drainage.as_str());
        let assessment = WoundAssessment {
            id: self.ids.next_id(),
            appearance,
            size,
            drainage,
            dressing_changed: observation.dressing_changed,
            status,
            nurse: nurse.clone(),
        };

        log.wound.push(assessment.clone());
        tracing::info!(patient_id = %patient, status = %status, "wound assessment recorded");

        if status == WoundStatus::Infected {
            let event = DomainEvent::InfectionDetected {
                patient: patient.clone(),
                assessment: assessment.id,
                reason: format!(
                    "infection indicators: appearance {}, drainage {}",
                    assessment.appearance, assessment.drainage
                ),
            };
            // Delivery failures are logged by the dispatcher.
            self.dispatcher.dispatch(&event);
        }

        Ok(assessment)
    }

    /// Pain assessments for a patient, oldest first.
    pub fn pain_history(&self, patient: &PatientId) -> &[PainAssessment] {
        self.logs
            .get(patient)
            .map(|log| log.pain.as_slice())
            .unwrap_or(&[])
    }

    /// Wound assessments for a patient, oldest first.
    pub fn wound_history(&self, patient: &PatientId) -> &[WoundAssessment] {
        self.logs
            .get(patient)
            .map(|log| log.wound.as_slice())
            .unwrap_or(&[])
    }

    pub fn summary_for(&self, patient: &PatientId) -> ClinicalSummary {
        let wound_count = self.wound_history(patient).len();
        let pain_count = self.pain_history(patient).len();

        let wound = if wound_count == 0 {
            NO_WOUND_RECORDS.to_string()
        } else {
            format!("Wound assessments recorded: {wound_count}")
        };
        let pain = if pain_count == 0 {
            NO_PAIN_RECORDS.to_string()
        } else {
            format!("Pain assessments recorded: {pain_count}")
        };

        ClinicalSummary { wound, pain }
    }
}

impl ClinicalSummarySource for ClinicalLogStore {
    fn summary_for(&self, patient: &PatientId) -> ClinicalSummary {
        ClinicalLogStore::summary_for(self, patient)
    }
}
