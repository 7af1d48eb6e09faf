use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::{info, warn};

use crate::error::InputError;
use crate::record::{Faculty, FacultyId};
use crate::registry::{AddOutcome, Registry};

const MENU: [&str; 4] = [
    "1. Add Faculty",
    "2. Display All Faculty (Sorted by ID)",
    "3. Display Recruitment Priority",
    "4. Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ShowSorted,
    ShowRanking,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::ShowSorted),
            "3" => Some(MenuChoice::ShowRanking),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Colouring for headings and status lines.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Style { color }
    }

    pub fn plain() -> Self {
        Style::new(false)
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

// =============================================================================
// Field parsing
// =============================================================================

pub fn parse_id(input: &str) -> Result<FacultyId, InputError> {
    let input = input.trim();
    input
        .parse()
        .map_err(|_| InputError::invalid_number("Faculty ID", input))
}

pub fn parse_experience(input: &str) -> Result<u32, InputError> {
    let input = input.trim();
    let years: i64 = input
        .parse()
        .map_err(|_| InputError::invalid_number("Experience", input))?;
    if years < 0 {
        return Err(InputError::Negative {
            field: "Experience",
        });
    }
    u32::try_from(years).map_err(|_| InputError::invalid_number("Experience", input))
}

pub fn parse_name(input: &str) -> Result<String, InputError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(InputError::Empty { field: "Name" });
    }
    Ok(name.to_string())
}

// =============================================================================
// Menu loop
// =============================================================================

/// Interactive menu over any line source and sink.
///
/// End of input ends the session the same way as choosing Exit.
pub struct Console<'a, R, W> {
    registry: &'a mut Registry,
    input: R,
    output: W,
    style: Style,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(registry: &'a mut Registry, input: R, output: W, style: Style) -> Self {
        Console {
            registry,
            input,
            output,
            style,
        }
    }

    pub fn run(&mut self) -> Result<(), InputError> {
        info!(records = self.registry.len(), "session started");

        loop {
            writeln!(self.output, "\n{}", MENU.join("\n"))?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Add) => {
                    if !self.add_faculty()? {
                        break;
                    }
                }
                Some(MenuChoice::ShowSorted) => {
                    let heading = self.style.heading("Faculty sorted by ID (AVL Tree):");
                    writeln!(self.output, "\n{heading}")?;
                    self.registry.write_sorted(&mut self.output)?;
                }
                Some(MenuChoice::ShowRanking) => {
                    let heading = self.style.heading("Recruitment priority:");
                    writeln!(self.output, "\n{heading}")?;
                    self.registry.write_ranking(&mut self.output)?;
                }
                Some(MenuChoice::Exit) => break,
                None => {
                    warn!(choice = %line, "invalid menu choice");
                    let message = self.style.error("Invalid choice. Try again.");
                    writeln!(self.output, "{message}")?;
                }
            }
        }

        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        info!(records = self.registry.len(), "session ended");
        Ok(())
    }

    /// Returns `false` when input ran out part way through.
    fn add_faculty(&mut self) -> Result<bool, InputError> {
        let Some(id) = self.prompt_parsed("Enter Faculty ID: ", parse_id)? else {
            return Ok(false);
        };
        let Some(name) = self.prompt_parsed("Enter Faculty Name: ", parse_name)? else {
            return Ok(false);
        };
        let Some(qualification) = self.prompt("Enter Qualification: ")? else {
            return Ok(false);
        };
        let Some(experience) =
            self.prompt_parsed("Enter Experience (years): ", parse_experience)?
        else {
            return Ok(false);
        };

        let faculty = Faculty::new(id, name, qualification.trim(), experience);
        let message = match self.registry.add(faculty) {
            AddOutcome::Added => self.style.success("Faculty added successfully!"),
            AddOutcome::Duplicate => self.style.error(&format!(
                "Faculty ID {id} already exists, record left unchanged."
            )),
        };
        writeln!(self.output, "{message}")?;
        Ok(true)
    }

    /// Writes `message` and reads one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, InputError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Re-prompts until `parse` accepts the line.
    fn prompt_parsed<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<Option<T>, InputError> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) if err.is_recoverable() => {
                    warn!(%err, "rejected input");
                    let message = self.style.error(&err.to_string());
                    writeln!(self.output, "{message}")?;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
