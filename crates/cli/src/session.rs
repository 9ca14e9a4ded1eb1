//! Interactive nursing session.
//!
//! A numbered main menu over one ward: medication scheduling, pain and wound assessment,
//! and discharge. Rejected operations are reported and the menu is shown again. The session
//! ends on "Exit" or when input runs out.

use crate::console::Console;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use ward_core::validation::{parse_yes, validate_pain_level};
use ward_core::{
    DischargeOutcome, ErrorKind, MedicationId, Nurse, NursingError, NursingResult, PainReport,
    PatientId, PatientRegistry, RestockStatus, ScheduleEntryId, Ward, WoundObservation,
    WoundStatus,
};

enum Step {
    Continue,
    Exit,
}

/// Reads a line or ends the current step when input is exhausted.
macro_rules! ask_or_exit {
    ($console:expr, $text:expr) => {
        match $console.ask($text)? {
            Some(line) => line,
            None => return Ok(Step::Exit),
        }
    };
}

/// Asks for the nurse's id and name.
///
/// Returns `None` if input ends first.
pub fn login<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> anyhow::Result<Option<Nurse>> {
    writeln!(console.out(), "Nurse Login")?;
    let Some(id) = console.ask("Enter Nurse ID: ")? else {
        return Ok(None);
    };
    let Some(name) = console.ask("Enter Nurse Name: ")? else {
        return Ok(None);
    };
    Ok(Some(Nurse::new(id, name)?))
}

pub struct Session<'a, R, W> {
    ward: &'a mut Ward,
    nurse: Nurse,
    console: Console<R, W>,
    summary_out: Option<PathBuf>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(ward: &'a mut Ward, nurse: Nurse, console: Console<R, W>) -> Self {
        Self {
            ward,
            nurse,
            console,
            summary_out: None,
        }
    }

    /// Also write each completed discharge summary to `path` as YAML.
    pub fn with_summary_out(mut self, path: Option<PathBuf>) -> Self {
        self.summary_out = path;
        self
    }

    pub fn run(&mut self, ward_name: &str) -> anyhow::Result<()> {
        writeln!(self.console.out(), "Nursing Services Loaded: {ward_name}")?;
        tracing::info!(ward = ward_name, nurse_id = %self.nurse.id, "session started");

        while let Step::Continue = self.main_menu()? {}

        writeln!(self.console.out(), "Nursing Services Closed")?;
        tracing::info!(ward = ward_name, "session closed");
        Ok(())
    }

    fn main_menu(&mut self) -> anyhow::Result<Step> {
        let out = self.console.out();
        writeln!(out)?;
        writeln!(out, "MAIN MENU")?;
        writeln!(out, "1) Medication Scheduling")?;
        writeln!(out, "2) Pain and Wound Assessment")?;
        writeln!(out, "3) Patient Discharge")?;
        writeln!(out, "4) Exit Nursing Services")?;

        let choice = ask_or_exit!(self.console, "Choose an option: ");
        let choice = choice.trim();
        if choice == "4" {
            return Ok(Step::Exit);
        }
        if !matches!(choice, "1" | "2" | "3") {
            writeln!(self.console.out(), "Invalid option.")?;
            return Ok(Step::Continue);
        }

        let patient = match self.select_patient()? {
            Selection::Picked(patient) => patient,
            Selection::Invalid => return Ok(Step::Continue),
            Selection::Closed => return Ok(Step::Exit),
        };

        let result = match choice {
            "1" => self.medication_menu(&patient),
            "2" => self.assessment(&patient),
            _ => self.discharge(&patient),
        };
        self.report(result)
    }

    /// Prints a rejected operation and carries on; infrastructure failures end the session.
    fn report(&mut self, result: NursingResult<Step>) -> anyhow::Result<Step> {
        match result {
            Ok(step) => Ok(step),
            Err(NursingError::InputClosed(_)) => Ok(Step::Exit),
            Err(e) if e.kind() != ErrorKind::Infrastructure => {
                tracing::warn!(error = %e, "operation rejected");
                writeln!(self.console.out(), "Error: {e}")?;
                Ok(Step::Continue)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn select_patient(&mut self) -> anyhow::Result<Selection<PatientId>> {
        let listing: Vec<String> = self
            .ward
            .patients
            .patients()
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}) {p}", i + 1))
            .collect();

        let out = self.console.out();
        writeln!(out, "Patient List:")?;
        for line in listing {
            writeln!(out, "{line}")?;
        }

        let Some(answer) = self.console.ask("Select patient by number: ")? else {
            return Ok(Selection::Closed);
        };
        let picked = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| self.ward.patients.select(n))
            .map(|p| p.id.clone());

        match picked {
            Some(id) => Ok(Selection::Picked(id)),
            None => {
                writeln!(self.console.out(), "Invalid patient selection.")?;
                Ok(Selection::Invalid)
            }
        }
    }

    fn medication_menu(&mut self, patient: &PatientId) -> NursingResult<Step> {
        let name = self.ward.patients.lookup(patient)?.name.clone();
        let schedules: Vec<(ScheduleEntryId, String)> = self
            .ward
            .ledger
            .schedules_for(patient)
            .into_iter()
            .map(|e| (e.id().clone(), e.to_string()))
            .collect();

        if schedules.is_empty() {
            self.say("No medication schedules for this patient.")?;
            return Ok(Step::Continue);
        }
        self.say(&format!("Medication Schedules for {name}:"))?;
        for (i, (_, line)) in schedules.iter().enumerate() {
            self.say(&format!("{}) {line}", i + 1))?;
        }

        let pick = ask_or_exit!(self.console, "Select schedule: ");
        let Some((entry, _)) = pick
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| schedules.get(i))
        else {
            return Err(NursingError::InvalidInput(format!(
                "no schedule numbered '{}'",
                pick.trim()
            )));
        };

        self.say(
            "Options\n1) Administer Medication\n2) Record Allergy Reaction\n\
             3) Request Pharmacy Restock\n4) Back to Main Menu",
        )?;

        let action = ask_or_exit!(self.console, "Choose: ");
        match action.trim() {
            "1" => {
                let entry = self.ward.ledger.administer(entry, &self.nurse)?.to_string();
                self.say(&format!("Medication administered: {entry}"))?;
            }
            "2" => {
                let notes = ask_or_exit!(self.console, "Enter allergy notes: ");
                let entry = self
                    .ward
                    .ledger
                    .hold_for_allergy(entry, &self.nurse, &notes)?
                    .to_string();
                self.say(&format!("Dose held: {entry}"))?;
            }
            "3" => {
                let medication = ask_or_exit!(self.console, "Enter medication ID: ");
                let medication = MedicationId::new(medication)?;
                let quantity = ask_or_exit!(self.console, "Enter restock amount: ");
                let quantity = quantity.trim().parse::<i64>().map_err(|e| {
                    NursingError::InvalidInput(format!(
                        "restock amount '{}' is not a number ({e})",
                        quantity.trim()
                    ))
                })?;

                let request = self.ward.ledger.request_restock(&medication, quantity)?;
                let message = match &request.status {
                    RestockStatus::Sent => format!(
                        "Restock request sent: {} x{} (on hand: {})",
                        request.medication, request.quantity, request.stock_on_hand
                    ),
                    RestockStatus::Pending { note } => {
                        format!("Restock request pending ({note})")
                    }
                };
                self.say(&message)?;
            }
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn assessment(&mut self, patient: &PatientId) -> NursingResult<Step> {
        let name = self.ward.patients.lookup(patient)?.name.clone();
        let pain_count = self.ward.logs.pain_history(patient).len();
        let wound_count = self.ward.logs.wound_history(patient).len();
        self.say(&format!(
            "Previous Records for {name}\nPain Logs: {pain_count}\nWound Logs: {wound_count}"
        ))?;

        self.say("Pain Assessment")?;
        let level = ask_or_exit!(self.console, "Enter pain level (0 - 10): ");
        let level = level.trim().parse::<i64>().map_err(|e| {
            NursingError::InvalidInput(format!(
                "pain level '{}' is not a number ({e})",
                level.trim()
            ))
        })?;
        validate_pain_level(level)?;
        let report = PainReport {
            level,
            location: ask_or_exit!(self.console, "Enter pain location: "),
            pain_type: ask_or_exit!(self.console, "Enter pain type (sharp/dull/irritating): "),
            comments: ask_or_exit!(self.console, "Enter patient comments: "),
        };
        self.ward.logs.record_pain(patient, report, &self.nurse.id)?;
        self.say("Pain Assessment Recorded Successfully.")?;

        self.say("Wound Assessment")?;
        let observation = WoundObservation {
            appearance: ask_or_exit!(
                self.console,
                "Enter wound appearance (normal/red/swollen): "
            ),
            size: ask_or_exit!(self.console, "Enter wound size (small/medium/large): "),
            drainage: ask_or_exit!(
                self.console,
                "Enter drainage type (none/serous/bleeding): "
            ),
            dressing_changed: parse_yes(&ask_or_exit!(
                self.console,
                "Was dressing changed? (yes/no): "
            )),
        };
        let assessment = self
            .ward
            .logs
            .record_wound(patient, observation, &self.nurse.id)?;
        if assessment.status == WoundStatus::Infected {
            self.say("ALERT: Infection indicators found. Physician notification raised.")?;
        }
        self.say("Assessment Completed.")?;
        Ok(Step::Continue)
    }

    fn discharge(&mut self, patient: &PatientId) -> NursingResult<Step> {
        self.say("Patient Discharge Processing")?;

        let mut workflow = self.ward.discharge_workflow();
        let outcome = workflow.process(patient, &self.nurse, &mut self.console)?;

        match outcome {
            DischargeOutcome::Aborted(reason) => {
                self.say(&format!("Discharge not completed: {reason}."))?;
            }
            DischargeOutcome::Completed(summary) => {
                self.say("Final Discharge Summary Generated:")?;
                self.say(&summary.to_string())?;
                if let Some(path) = &self.summary_out {
                    std::fs::write(path, summary.render_yaml()?)
                        .map_err(NursingError::FileWrite)?;
                    tracing::info!(path = %path.display(), "discharge summary exported");
                }
            }
        }
        Ok(Step::Continue)
    }

    fn say(&mut self, text: &str) -> NursingResult<()> {
        writeln!(self.console.out(), "{text}").map_err(NursingError::OutputWrite)
    }
}

enum Selection<T> {
    Picked(T),
    Invalid,
    Closed,
}
