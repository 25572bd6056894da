//! Candidate assignments of kinds to characters and their enumeration.
//!
//! Enumeration walks every kind ordering with an odometer and builds each
//! scenario incrementally, rejecting it as soon as the running monk count
//! passes the ceiling for the cast size.

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::error::{PuzzleError, Result};
use crate::kind::Kind;

/// Largest cast a puzzle may have
pub const MAX_CHARACTERS: usize = 7;

/// Smallest cast a valid puzzle may have
pub const MIN_CHARACTERS: usize = 3;

/// The most monks allowed for a cast of `character_count`.
///
/// Monks must stay strictly below half the cast, so an even cast loses one
/// more slot than an odd one.
pub fn max_monks(character_count: usize, allow_monks: bool) -> usize {
    if !allow_monks {
        return 0;
    }
    let half = character_count / 2;
    if character_count % 2 == 0 {
        half.saturating_sub(1)
    } else {
        half
    }
}

/// One full mapping of character names to kinds.
///
/// Pairs are kept sorted by name, so equality and hashing do not depend on
/// the order the scenario was built in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Scenario {
    kinds: SmallVec<[(String, Kind); MAX_CHARACTERS]>,
}

impl Scenario {
    /// Build from `(name, kind)` pairs. If a name repeats, the first pair wins.
    pub fn from_pairs<I, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, Kind)>,
        N: Into<String>,
    {
        let mut kinds: SmallVec<[(String, Kind); MAX_CHARACTERS]> = pairs
            .into_iter()
            .map(|(name, kind)| (name.into(), kind))
            .collect();
        kinds.sort_by(|a, b| a.0.cmp(&b.0));
        kinds.dedup_by(|later, earlier| later.0 == earlier.0);
        Self { kinds }
    }

    /// Get the kind assigned to `name`, if any
    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.kinds
            .binary_search_by(|(candidate, _)| candidate.as_str().cmp(name))
            .ok()
            .map(|index| self.kinds[index].1)
    }

    /// Like [`Scenario::kind_of`], but a missing name is an error.
    pub fn lookup(&self, name: &str) -> Result<Kind> {
        self.kind_of(name)
            .ok_or_else(|| PuzzleError::UnknownCharacter(name.to_string()))
    }

    /// Iterate `(name, kind)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Kind)> + '_ {
        self.kinds.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.kinds.iter().map(|(_, kind)| *kind)
    }

    pub fn count_of(&self, kind: Kind) -> usize {
        self.kinds().filter(|k| *k == kind).count()
    }

    pub fn monk_count(&self) -> usize {
        self.count_of(Kind::Monk)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Number of characters assigned a different kind in `other`.
    ///
    /// Names missing from `other` count as differences.
    pub fn differences(&self, other: &Scenario) -> usize {
        self.iter()
            .filter(|(name, kind)| other.kind_of(name) != Some(*kind))
            .count()
    }
}

impl<N: Into<String>> FromIterator<(N, Kind)> for Scenario {
    fn from_iter<I: IntoIterator<Item = (N, Kind)>>(iter: I) -> Self {
        Scenario::from_pairs(iter)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, kind)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, kind.tag())?;
        }
        Ok(())
    }
}

/// A kind per character, in cast order.
pub type KindOrdering = SmallVec<[Kind; MAX_CHARACTERS]>;

/// Odometer over every `alphabet^n` kind ordering.
#[derive(Debug, Clone)]
pub struct KindOrderings {
    alphabet: SmallVec<[Kind; 3]>,
    digits: SmallVec<[usize; MAX_CHARACTERS]>,
    done: bool,
}

impl KindOrderings {
    fn new(alphabet: SmallVec<[Kind; 3]>, length: usize) -> Self {
        let done = alphabet.is_empty() && length > 0;
        Self {
            alphabet,
            digits: SmallVec::from_elem(0, length),
            done,
        }
    }
}

impl Iterator for KindOrderings {
    type Item = KindOrdering;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.digits.iter().map(|&d| self.alphabet[d]).collect();

        // Advance the odometer, rightmost digit fastest
        let mut position = self.digits.len();
        loop {
            if position == 0 {
                self.done = true;
                break;
            }
            position -= 1;
            self.digits[position] += 1;
            if self.digits[position] < self.alphabet.len() {
                break;
            }
            self.digits[position] = 0;
        }

        Some(current)
    }
}

/// Outcome of building one scenario from an ordering
enum Construction {
    Complete(Scenario),
    TooManyMonks,
}

/// Every assignment of a cast to kinds under a monk ceiling.
#[derive(Debug, Clone)]
pub struct AssignmentSpace<'a> {
    names: &'a [String],
    max_monks: usize,
}

impl<'a> AssignmentSpace<'a> {
    pub fn new(names: &'a [String], max_monks: usize) -> Self {
        Self { names, max_monks }
    }

    pub fn max_monks(&self) -> usize {
        self.max_monks
    }

    /// Kinds a character may take. Monks are left out entirely when none are allowed.
    pub fn alphabet(&self) -> SmallVec<[Kind; 3]> {
        Kind::ALL
            .into_iter()
            .filter(|kind| *kind != Kind::Monk || self.max_monks > 0)
            .collect()
    }

    /// Every kind ordering before the monk ceiling is applied
    pub fn orderings(&self) -> KindOrderings {
        KindOrderings::new(self.alphabet(), self.names.len())
    }

    /// `alphabet^n`, or `None` when it does not fit in a `usize`
    pub fn ordering_count(&self) -> Option<usize> {
        u32::try_from(self.names.len())
            .ok()
            .and_then(|n| self.alphabet().len().checked_pow(n))
    }

    /// Build a scenario, stopping at the first monk over the ceiling.
    fn build(&self, ordering: &[Kind]) -> Construction {
        let mut pairs: SmallVec<[(&str, Kind); MAX_CHARACTERS]> = SmallVec::new();
        let mut monks = 0;
        for (name, &kind) in self.names.iter().zip(ordering) {
            if kind == Kind::Monk {
                monks += 1;
                if monks > self.max_monks {
                    return Construction::TooManyMonks;
                }
            }
            pairs.push((name.as_str(), kind));
        }
        Construction::Complete(Scenario::from_pairs(pairs))
    }

    /// All scenarios within the monk ceiling.
    pub fn enumerate(&self) -> Vec<Scenario> {
        self.orderings()
            .filter_map(|ordering| match self.build(&ordering) {
                Construction::Complete(scenario) => Some(scenario),
                Construction::TooManyMonks => None,
            })
            .collect()
    }
}
