//! Consistency checking of one scenario against every character's statements.
//!
//! Each statement a character utters is checked on its own against that
//! character's kind. Checking never stops early: every failing statement is
//! recorded as a [`Reason`] so diagnostics see the full picture.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::puzzle::Character;
use crate::scenario::Scenario;
use crate::statement::Statement;

/// A statement its speaker could not have uttered in some scenario
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reason {
    pub character: String,
    pub statement: Statement,
}

impl Reason {
    pub fn new(character: impl Into<String>, statement: Statement) -> Self {
        Self {
            character: character.into(),
            statement,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} should not have said {}", self.character, self.statement)
    }
}

/// A scenario together with its consistency verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedScenario {
    pub scenario: Scenario,
    /// Empty when the scenario is consistent
    pub reasons: Vec<Reason>,
}

impl CheckedScenario {
    pub fn is_consistent(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Number of distinct characters with at least one reason
    pub fn offending_characters(&self) -> usize {
        self.reasons
            .iter()
            .map(|reason| reason.character.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Check every statement of every character against `scenario`.
///
/// Fails if a speaker or a referenced character is missing from the scenario.
pub fn check_scenario(characters: &[Character], scenario: Scenario) -> Result<CheckedScenario> {
    let mut reasons = Vec::new();

    for character in characters {
        let speaker = scenario.lookup(&character.name)?;
        for statement in &character.statements {
            if !statement.evaluate_consistency(speaker, &scenario)? {
                reasons.push(Reason::new(character.name.clone(), statement.clone()));
            }
        }
    }

    Ok(CheckedScenario { scenario, reasons })
}
