//! Error taxonomy for puzzle definition, solving, and generation.

use thiserror::Error;

/// Errors surfaced by the puzzle engine.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// A statement names a character that is not part of the assignment.
    #[error("Cannot find character '{0}'")]
    UnknownCharacter(String),

    #[error("Character '{0}' is defined more than once")]
    DuplicateCharacter(String),

    /// A cast too large to enumerate.
    #[error("Cannot solve a puzzle of {count} characters (at most {max})")]
    TooManyCharacters { count: usize, max: usize },

    /// A relation symbol that has no comparison operator.
    #[error("Cannot handle relation '{0}'")]
    InvalidRelation(String),

    #[error("Unknown character kind '{0}'")]
    InvalidKind(String),

    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
