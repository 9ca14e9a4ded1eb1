//! Interactive input contract for the discharge workflow.
//!
//! The workflow asks a fixed set of typed questions ([`Prompt`]) and receives raw text back
//! from an [`InputSource`]. How the question is shown (terminal, form, script) is the
//! source's business.

use crate::error::{NursingError, NursingResult};
use std::collections::VecDeque;

/// Questions asked while processing a discharge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prompt {
    Temperature,
    SystolicBloodPressure,
    HeartRate,
    OxygenSaturation,
    DoctorApproval,
    FollowUpScheduled,
    FollowUpClinic,
    FollowUpDate,
    FollowUpTime,
    FollowUpStatus,
    DischargeNotes,
}

impl Prompt {
    /// Text shown to the nurse.
    pub fn text(&self) -> &'static str {
        match self {
            Prompt::Temperature => "Enter patient temperature in Fahrenheit: ",
            Prompt::SystolicBloodPressure => "Enter patient blood pressure (systolic): ",
            Prompt::HeartRate => "Enter heart rate: ",
            Prompt::OxygenSaturation => "Enter oxygen saturation: ",
            Prompt::DoctorApproval => "Has the doctor approved discharge? (yes/no): ",
            Prompt::FollowUpScheduled => "Is a follow up appointment scheduled? (yes/no): ",
            Prompt::FollowUpClinic => "Enter clinic/purpose: ",
            Prompt::FollowUpDate => "Enter date: ",
            Prompt::FollowUpTime => "Enter time: ",
            Prompt::FollowUpStatus => "Enter status: ",
            Prompt::DischargeNotes => "Enter discharge notes: ",
        }
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text().trim_end_matches([':', ' ']))
    }
}

/// Supplies answers to workflow prompts.
pub trait InputSource {
    /// Returns the raw answer to `prompt`.
    ///
    /// # Errors
    ///
    /// [`NursingError::InputClosed`] when no more answers are available, or
    /// [`NursingError::InputRead`] when the underlying reader fails.
    fn answer(&mut self, prompt: Prompt) -> NursingResult<String>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn answer(&mut self, prompt: Prompt) -> NursingResult<String> {
        (**self).answer(prompt)
    }
}

/// An [`InputSource`] that replays canned answers in order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    asked: Vec<Prompt>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts asked so far, in order.
    pub fn asked(&self) -> &[Prompt] {
        &self.asked
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl InputSource for ScriptedInput {
    fn answer(&mut self, prompt: Prompt) -> NursingResult<String> {
        self.asked.push(prompt);
        self.answers
            .pop_front()
            .ok_or(NursingError::InputClosed(prompt))
    }
}

/// Asks a yes/no question. Only `yes` (any case) counts as affirmative.
pub(crate) fn ask_yes_no(input: &mut dyn InputSource, prompt: Prompt) -> NursingResult<bool> {
    let raw = input.answer(prompt)?;
    Ok(crate::validation::parse_yes(&raw))
}

/// Asks for a numeric reading.
pub(crate) fn ask_reading<T>(input: &mut dyn InputSource, prompt: Prompt) -> NursingResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = input.answer(prompt)?;
    crate::validation::parse_reading(&raw, prompt)
}
