//! Typed console prompts.
//!
//! Input that does not parse or falls outside its bounds is discarded and
//! the question is asked again. An empty answer keeps the current value, as
//! does end of input.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use colored::Colorize;
use tracing::debug;

use crate::error::SimulationError;
use crate::simulation::Simulation;

/// Inclusive bounds for a numeric answer.
#[derive(Debug, Clone, Copy, PartialEq, derive_new::new)]
pub struct Bounds<T> {
    pub lower: Option<T>,
    pub upper: Option<T>,
}

impl<T: PartialOrd> Bounds<T> {
    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub fn at_least(lower: T) -> Self {
        Self::new(Some(lower), None)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.lower.as_ref().is_none_or(|lower| value >= lower)
            && self.upper.as_ref().is_none_or(|upper| value <= upper)
    }
}

/// Parses `raw` as a `T` and checks it against `bounds`.
pub fn parse_bounded<T>(raw: &str, bounds: &Bounds<T>) -> Option<T>
where
    T: FromStr + PartialOrd,
{
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(|value| bounds.contains(value))
}

/// Strict positivity check for scales; zero would collapse the view.
pub fn parse_positive(raw: &str) -> Option<f64> {
    parse_bounded(raw, &Bounds::at_least(0.0))
        .filter(|value: &f64| *value > 0.0 && value.is_finite())
}

/// Reads a yes/no answer. Accepts English and French affirmatives.
pub fn parse_yes_no(raw: &str) -> Option<bool> {
    let answer = raw.trim().to_lowercase();
    if answer.is_empty() {
        return None;
    }
    Some(answer.starts_with('y') || answer.starts_with('o'))
}

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads one trimmed line, or `None` at end of input.
    fn read_answer(&mut self) -> io::Result<Option<String>> {
        write!(self.writer, "{} ", ">".bright_yellow())?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{message}")
    }

    /// Asks until `parse` accepts the answer. Empty input keeps `current`.
    pub fn ask<T, F>(&mut self, question: &str, current: T, parse: F) -> io::Result<T>
    where
        T: std::fmt::Display,
        F: Fn(&str) -> Option<T>,
    {
        writeln!(self.writer, "{} ({})", question, current.to_string().cyan())?;
        loop {
            let Some(answer) = self.read_answer()? else {
                return Ok(current);
            };
            if answer.is_empty() {
                return Ok(current);
            }
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => debug!(answer = %answer, "discarding invalid input"),
            }
        }
    }

    pub fn ask_positive(&mut self, question: &str, current: f64) -> io::Result<f64> {
        self.ask(question, current, parse_positive)
    }

    pub fn ask_yes_no(&mut self, question: &str, current: bool) -> io::Result<bool> {
        let shown = if current { "yes" } else { "no" };
        writeln!(self.writer, "{} ({})", question, shown.cyan())?;
        loop {
            let Some(answer) = self.read_answer()? else {
                return Ok(current);
            };
            if answer.is_empty() {
                return Ok(current);
            }
            if let Some(value) = parse_yes_no(&answer) {
                return Ok(value);
            }
        }
    }

    /// Asks for a body to keep centered, retrying on unknown names.
    pub fn ask_focus(&mut self, simulation: &Simulation, current: &str) -> io::Result<String> {
        writeln!(self.writer, "Screen center ({})", current.cyan())?;
        loop {
            let Some(answer) = self.read_answer()? else {
                return Ok(current.to_string());
            };
            if answer.is_empty() {
                return Ok(current.to_string());
            }
            match simulation.get_by_name(&answer) {
                Ok(body) => return Ok(body.name().clone()),
                Err(SimulationError::BodyNotFound(_)) => {
                    writeln!(self.writer, "{}", format!("no body named '{answer}'").red())?;
                }
                Err(err) => debug!(%err, "unexpected lookup failure"),
            }
        }
    }
}
