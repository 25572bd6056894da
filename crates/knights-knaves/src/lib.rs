//! Knights, knaves and monks puzzle engine.
//!
//! This crate solves puzzles in which every character is a knight (always
//! truthful), a knave (always lying) or a monk (unconstrained), by checking
//! every assignment of kinds against what each character says. It also
//! generates new puzzles by filling a statement skeleton from a library of
//! statement templates and keeping the candidates with exactly two solutions
//! that are hard to tell apart.

pub mod checker;
pub mod config;
pub mod error;
pub mod generator;
pub mod kind;
pub mod puzzle;
pub mod report;
pub mod scenario;
pub mod skeleton;
pub mod statement;
pub mod template;

// Re-export main types
pub use checker::{check_scenario, CheckedScenario, Reason};
pub use config::{GeneratorConfig, SearchBudget};
pub use error::{PuzzleError, Result};
pub use generator::{
    GenerationReport, PuzzleGenerator, ScoredPuzzle, SearchObserver, SearchProgress, StopReason,
};
pub use kind::Kind;
pub use puzzle::{Character, Puzzle, PuzzleDefinition, Solution};
pub use report::{ScenarioRow, Verdict};
pub use scenario::{max_monks, AssignmentSpace, Scenario};
pub use skeleton::{Pattern, Skeleton, SkeletonCharacter};
pub use statement::{Relation, Statement};
pub use template::{statement_pool, Pairing, StatementTemplate};
