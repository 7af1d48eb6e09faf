use std::fmt;

use serde::Deserialize;

use crate::error::InputError;

/// Caller-supplied faculty identifier, the key of the sorted index.
pub type FacultyId = i64;

/// One faculty member. Created once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub qualification: String,
    /// Years of experience, the ranking key.
    pub experience: u32,
}

impl Faculty {
    pub fn new(
        id: FacultyId,
        name: impl Into<String>,
        qualification: impl Into<String>,
        experience: u32,
    ) -> Self {
        Faculty {
            id,
            name: name.into(),
            qualification: qualification.into(),
            experience,
        }
    }

    /// Checks the fields that the type system cannot.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.name.trim().is_empty() {
            return Err(InputError::Empty { field: "Name" });
        }
        Ok(())
    }
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID {}, {}, {} years)",
            self.name, self.id, self.qualification, self.experience
        )
    }
}
