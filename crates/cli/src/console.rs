//! Line-oriented terminal adapter.

use std::io::{BufRead, Write};
use ward_core::{InputSource, NursingError, NursingResult, Prompt};

/// Prompts on a writer and reads one answer per line from a reader.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Prints `text` and reads a line, without its line ending.
    ///
    /// Returns `None` once the reader is exhausted.
    pub fn ask(&mut self, text: &str) -> NursingResult<Option<String>> {
        write!(self.writer, "{text}").map_err(NursingError::OutputWrite)?;
        self.writer.flush().map_err(NursingError::OutputWrite)?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(NursingError::InputRead)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> InputSource for Console<R, W> {
    fn answer(&mut self, prompt: Prompt) -> NursingResult<String> {
        self.ask(prompt.text())?
            .ok_or(NursingError::InputClosed(prompt))
    }
}
