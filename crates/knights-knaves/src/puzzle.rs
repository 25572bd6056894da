//! Puzzle definition, solving and difficulty metrics.
//!
//! A puzzle is built once from its characters and their statements and solved
//! at most once: the first call to [`Puzzle::solve`] enumerates and checks every
//! scenario, and the result is kept for every later query.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checker::{check_scenario, CheckedScenario};
use crate::error::{PuzzleError, Result};
use crate::scenario::{max_monks, AssignmentSpace, Scenario, MAX_CHARACTERS, MIN_CHARACTERS};
use crate::statement::Statement;

/// Most solutions a valid puzzle may have
pub const MAX_SOLUTIONS: usize = 2;

/// A named character and everything they say
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl Character {
    pub fn new(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            name: name.into(),
            statements,
        }
    }
}

fn default_allow_monks() -> bool {
    true
}

/// Serializable form of a puzzle, as read from and written to JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    #[serde(default = "default_allow_monks")]
    pub allow_monks: bool,
    pub characters: Vec<Character>,
}

/// Everything learned by checking every scenario of a puzzle
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    names: Vec<String>,
    max_monks: usize,
    scenarios: Vec<CheckedScenario>,
}

impl Solution {
    /// Character names in puzzle order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Every enumerated scenario with its verdict
    pub fn scenarios(&self) -> &[CheckedScenario] {
        &self.scenarios
    }

    pub fn total_possibilities(&self) -> usize {
        self.scenarios.len()
    }

    /// The consistent scenarios, in enumeration order
    pub fn consistent_scenarios(&self) -> Vec<&Scenario> {
        self.scenarios
            .iter()
            .filter(|checked| checked.is_consistent())
            .map(|checked| &checked.scenario)
            .collect()
    }

    pub fn solution_count(&self) -> usize {
        self.scenarios
            .iter()
            .filter(|checked| checked.is_consistent())
            .count()
    }

    /// For each inconsistent scenario, how many distinct characters rule it out.
    pub fn reason_counts_per_scenario(&self) -> Vec<usize> {
        self.scenarios
            .iter()
            .filter(|checked| !checked.is_consistent())
            .map(CheckedScenario::offending_characters)
            .collect()
    }

    /// Mean of [`Solution::reason_counts_per_scenario`], or 0 when nothing was rejected
    pub fn mean_reason_count(&self) -> f64 {
        let counts = self.reason_counts_per_scenario();
        if counts.is_empty() {
            return 0.0;
        }
        counts.iter().sum::<usize>() as f64 / counts.len() as f64
    }

    pub fn rejection_reason_count(&self) -> usize {
        self.scenarios.iter().map(|checked| checked.reasons.len()).sum()
    }

    /// Share of all reasons attributable to each character.
    ///
    /// Characters who never offend are absent.
    pub fn rejection_reason_distribution(&self) -> BTreeMap<&str, f64> {
        let mut histogram: BTreeMap<&str, usize> = BTreeMap::new();
        for reason in self.scenarios.iter().flat_map(|checked| &checked.reasons) {
            *histogram.entry(reason.character.as_str()).or_default() += 1;
        }
        let total = self.rejection_reason_count() as f64;
        histogram
            .into_iter()
            .map(|(name, count)| (name, count as f64 / total))
            .collect()
    }

    /// Whether every offending character's share of reasons lies within
    /// `delta` of an even split. True when there are no reasons at all.
    pub fn has_balanced_reasons(&self, delta: f64) -> bool {
        let distribution = self.rejection_reason_distribution();
        if distribution.is_empty() {
            return true;
        }
        let even = 1.0 / distribution.len() as f64;
        distribution
            .values()
            .all(|share| (even - delta..=even + delta).contains(share))
    }

    /// Whether exactly `expected` consistent scenarios use the full monk allowance.
    pub fn has_maximum_monks(&self, expected: usize) -> bool {
        self.consistent_scenarios()
            .into_iter()
            .filter(|scenario| scenario.monk_count() == self.max_monks)
            .count()
            == expected
    }
}

/// A knights, knaves and monks puzzle.
///
/// Names referenced by statements are resolved when the puzzle is solved; a
/// name outside the cast fails [`Puzzle::solve`] with
/// [`PuzzleError::UnknownCharacter`]. Call [`Puzzle::validate`] to catch that
/// up front.
#[derive(Debug, Clone)]
pub struct Puzzle {
    characters: Vec<Character>,
    allow_monks: bool,
    max_monks: usize,
    solution: OnceLock<Solution>,
}

impl Puzzle {
    /// Build a puzzle from `(name, statements)` pairs, in cast order.
    pub fn new<I, N>(characters: I, allow_monks: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Vec<Statement>)>,
        N: Into<String>,
    {
        Self::from_characters(
            characters
                .into_iter()
                .map(|(name, statements)| Character::new(name, statements))
                .collect(),
            allow_monks,
        )
    }

    pub fn from_characters(characters: Vec<Character>, allow_monks: bool) -> Result<Self> {
        let mut seen = HashSet::new();
        for character in &characters {
            if !seen.insert(character.name.as_str()) {
                return Err(PuzzleError::DuplicateCharacter(character.name.clone()));
            }
        }

        let max_monks = max_monks(characters.len(), allow_monks);
        Ok(Self {
            characters,
            allow_monks,
            max_monks,
            solution: OnceLock::new(),
        })
    }

    pub fn from_definition(definition: PuzzleDefinition) -> Result<Self> {
        Self::from_characters(definition.characters, definition.allow_monks)
    }

    /// Parse a puzzle from its JSON definition
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_definition(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The structural definition of this puzzle, for rendering or storage.
    pub fn to_definition(&self) -> PuzzleDefinition {
        PuzzleDefinition {
            allow_monks: self.allow_monks,
            characters: self.characters.clone(),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_definition())?)
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.characters.iter().map(|c| c.name.as_str())
    }

    pub fn statements_of(&self, name: &str) -> Option<&[Statement]> {
        self.characters
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.statements.as_slice())
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn allow_monks(&self) -> bool {
        self.allow_monks
    }

    pub fn max_monks(&self) -> usize {
        self.max_monks
    }

    /// Check that every statement only names characters of this puzzle.
    pub fn validate(&self) -> Result<()> {
        for statement in self.characters.iter().flat_map(|c| &c.statements) {
            for name in statement.referenced_names() {
                if self.statements_of(name).is_none() {
                    return Err(PuzzleError::UnknownCharacter(name.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Enumerate and check every scenario. Later calls return the same result.
    ///
    /// Casts above [`MAX_CHARACTERS`] fail with
    /// [`PuzzleError::TooManyCharacters`] before anything is enumerated.
    pub fn solve(&self) -> Result<&Solution> {
        if let Some(solution) = self.solution.get() {
            return Ok(solution);
        }
        if self.characters.len() > MAX_CHARACTERS {
            return Err(PuzzleError::TooManyCharacters {
                count: self.characters.len(),
                max: MAX_CHARACTERS,
            });
        }

        let names: Vec<String> = self.characters.iter().map(|c| c.name.clone()).collect();
        let scenarios = AssignmentSpace::new(&names, self.max_monks)
            .enumerate()
            .into_iter()
            .map(|scenario| check_scenario(&self.characters, scenario))
            .collect::<Result<Vec<_>>>()?;

        let solution = Solution {
            names,
            max_monks: self.max_monks,
            scenarios,
        };
        debug!(
            event = "puzzle_solved",
            characters = self.characters.len(),
            max_monks = self.max_monks,
            scenarios = solution.total_possibilities(),
            solutions = solution.solution_count(),
        );

        Ok(self.solution.get_or_init(|| solution))
    }

    pub fn is_solved(&self) -> bool {
        self.solution.get().is_some()
    }

    pub fn solution_count(&self) -> Result<usize> {
        Ok(self.solve()?.solution_count())
    }

    pub fn consistent_scenarios(&self) -> Result<Vec<&Scenario>> {
        Ok(self.solve()?.consistent_scenarios())
    }

    pub fn reason_counts_per_scenario(&self) -> Result<Vec<usize>> {
        Ok(self.solve()?.reason_counts_per_scenario())
    }

    pub fn mean_reason_count(&self) -> Result<f64> {
        Ok(self.solve()?.mean_reason_count())
    }

    pub fn has_maximum_monks(&self, expected: usize) -> Result<bool> {
        Ok(self.solve()?.has_maximum_monks(expected))
    }

    /// A cast of 3 to 7 characters with at most two solutions.
    ///
    /// Casts outside the bounds are rejected without solving.
    pub fn is_valid_puzzle(&self) -> Result<bool> {
        if !(MIN_CHARACTERS..=MAX_CHARACTERS).contains(&self.character_count()) {
            return Ok(false);
        }
        Ok(self.solution_count()? <= MAX_SOLUTIONS)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for character in &self.characters {
            writeln!(f, "{}", character.name)?;
            for statement in &character.statements {
                writeln!(f, "\t{statement}")?;
            }
        }
        Ok(())
    }
}
