//! The three kinds of characters and their truth-telling polarity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// Character kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Always tells the truth
    Knight,
    /// Always lies
    Knave,
    /// May say anything
    Monk,
}

impl Kind {
    /// Every kind, in a fixed order.
    pub const ALL: [Kind; 3] = [Kind::Knight, Kind::Knave, Kind::Monk];

    /// How honest this kind is, used by honesty comparisons.
    pub fn truth_quantifier(self) -> i8 {
        match self {
            Kind::Knight => 1,
            Kind::Monk => 0,
            Kind::Knave => -1,
        }
    }

    /// Single-letter tag used for compact scenario rendering
    pub fn tag(self) -> char {
        match self {
            Kind::Knight => 'K',
            Kind::Monk => 'M',
            Kind::Knave => 'V',
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Kind::Knight => "Knight",
            Kind::Monk => "Monk",
            Kind::Knave => "Knave",
        }
    }

    pub fn from_tag(tag: char) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Kind {
    type Err = PuzzleError;

    /// Accepts either the single-letter tag or the title, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(kind) = Kind::from_tag(c.to_ascii_uppercase()) {
                return Ok(kind);
            }
        }
        Kind::ALL
            .into_iter()
            .find(|kind| kind.title().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PuzzleError::InvalidKind(s.to_string()))
    }
}
