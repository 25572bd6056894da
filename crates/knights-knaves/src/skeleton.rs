//! Fixed logical templates with numbered slots.
//!
//! A skeleton says, for each character, what they utter in terms of slots;
//! the generator binds drawn statements to the slots to get a candidate puzzle.

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};
use crate::kind::Kind;
use crate::puzzle::{Character, Puzzle};
use crate::statement::{Relation, Statement};

/// A statement shape whose leaves may be slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// The drawn statement with this index
    Slot(usize),
    Fixed(Statement),
    Not(Box<Pattern>),
    And(Vec<Pattern>),
    Or(Vec<Pattern>),
    Implies(Box<Pattern>, Box<Pattern>),
    Iff(Box<Pattern>, Box<Pattern>),
    Xor(Box<Pattern>, Box<Pattern>),
}

impl Pattern {
    pub fn slot(index: usize) -> Self {
        Pattern::Slot(index)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(pattern: Pattern) -> Self {
        Pattern::Not(Box::new(pattern))
    }

    pub fn implies(antecedent: Pattern, consequent: Pattern) -> Self {
        Pattern::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn iff(a: Pattern, b: Pattern) -> Self {
        Pattern::Iff(Box::new(a), Box::new(b))
    }

    pub fn xor(a: Pattern, b: Pattern) -> Self {
        Pattern::Xor(Box::new(a), Box::new(b))
    }

    /// Highest slot index used, if any
    pub fn max_slot(&self) -> Option<usize> {
        match self {
            Pattern::Slot(index) => Some(*index),
            Pattern::Fixed(_) => None,
            Pattern::Not(inner) => inner.max_slot(),
            Pattern::And(parts) | Pattern::Or(parts) => {
                parts.iter().filter_map(Pattern::max_slot).max()
            }
            Pattern::Implies(a, b) | Pattern::Iff(a, b) | Pattern::Xor(a, b) => {
                a.max_slot().max(b.max_slot())
            }
        }
    }

    /// Replace every slot with the matching drawn statement
    pub fn fill(&self, drawn: &[Statement]) -> Result<Statement> {
        let statement = match self {
            Pattern::Slot(index) => drawn.get(*index).cloned().ok_or_else(|| {
                PuzzleError::InvalidConfig(format!(
                    "slot {} has no statement ({} drawn)",
                    index,
                    drawn.len()
                ))
            })?,
            Pattern::Fixed(statement) => statement.clone(),
            Pattern::Not(inner) => Statement::not(inner.fill(drawn)?),
            Pattern::And(parts) => Statement::And(
                parts
                    .iter()
                    .map(|part| part.fill(drawn))
                    .collect::<Result<_>>()?,
            ),
            Pattern::Or(parts) => Statement::Or(
                parts
                    .iter()
                    .map(|part| part.fill(drawn))
                    .collect::<Result<_>>()?,
            ),
            Pattern::Implies(a, b) => Statement::implies(a.fill(drawn)?, b.fill(drawn)?),
            Pattern::Iff(a, b) => Statement::iff(a.fill(drawn)?, b.fill(drawn)?),
            Pattern::Xor(a, b) => Statement::xor(a.fill(drawn)?, b.fill(drawn)?),
        };
        Ok(statement)
    }
}

impl From<Statement> for Pattern {
    fn from(statement: Statement) -> Self {
        Pattern::Fixed(statement)
    }
}

/// One character of a skeleton and the shapes of what they say
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonCharacter {
    pub name: String,
    #[serde(default)]
    pub says: Vec<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skeleton {
    pub characters: Vec<SkeletonCharacter>,
}

impl Skeleton {
    pub fn new<I, N>(characters: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<Pattern>)>,
        N: Into<String>,
    {
        Self {
            characters: characters
                .into_iter()
                .map(|(name, says)| SkeletonCharacter {
                    name: name.into(),
                    says,
                })
                .collect(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.characters.iter().map(|c| c.name.clone()).collect()
    }

    /// Number of statements needed to fill every slot
    pub fn slot_count(&self) -> usize {
        self.characters
            .iter()
            .flat_map(|c| &c.says)
            .filter_map(Pattern::max_slot)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Bind `drawn` to the slots and build the resulting puzzle
    pub fn instantiate(&self, drawn: &[Statement], allow_monks: bool) -> Result<Puzzle> {
        let characters = self
            .characters
            .iter()
            .map(|c| {
                let statements = c
                    .says
                    .iter()
                    .map(|pattern| pattern.fill(drawn))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Character::new(c.name.clone(), statements))
            })
            .collect::<Result<Vec<_>>>()?;
        Puzzle::from_characters(characters, allow_monks)
    }
}

impl Default for Skeleton {
    /// Four characters `A` to `D` over six slots.
    fn default() -> Self {
        let fixed = |statement: Statement| Pattern::Fixed(statement);
        Skeleton::new([
            (
                "A",
                vec![Pattern::implies(
                    Pattern::iff(Pattern::slot(3), fixed(Statement::is_of_type("B", Kind::Monk))),
                    fixed(Statement::iff(
                        Statement::honesty("C", "D", Relation::Gt),
                        Statement::count_of_type(Kind::Knave, 2, Relation::Lt),
                    )),
                )],
            ),
            (
                "B",
                vec![
                    Pattern::iff(Pattern::slot(1), fixed(Statement::is_same_as("A", "D"))),
                    Pattern::not(Pattern::iff(Pattern::slot(2), Pattern::slot(0))),
                ],
            ),
            ("C", vec![Pattern::iff(Pattern::slot(4), Pattern::slot(5))]),
            (
                "D",
                vec![fixed(Statement::or([
                    Statement::count_of_type(Kind::Knight, 2, Relation::Eq),
                    Statement::count_of_type(Kind::Knight, 4, Relation::Eq),
                ]))],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawn(count: usize) -> Vec<Statement> {
        (0..count)
            .map(|i| Statement::count_of_type(Kind::Knight, i, Relation::Eq))
            .collect()
    }

    #[test]
    fn test_default_skeleton_shape() {
        let skeleton = Skeleton::default();
        assert_eq!(skeleton.names(), vec!["A", "B", "C", "D"]);
        assert_eq!(skeleton.slot_count(), 6);
    }

    #[test]
    fn test_instantiate_binds_slots_in_place() {
        let skeleton = Skeleton::default();
        let statements = drawn(6);
        let puzzle = skeleton.instantiate(&statements, true).unwrap();

        assert_eq!(
            puzzle.statements_of("C").unwrap(),
            &[Statement::iff(statements[4].clone(), statements[5].clone())]
        );
        assert_eq!(
            puzzle.statements_of("B").unwrap()[1],
            Statement::not(Statement::iff(statements[2].clone(), statements[0].clone()))
        );
        assert!(puzzle.validate().is_ok());
    }

    #[test]
    fn test_missing_slot_is_config_error() {
        let skeleton = Skeleton::default();
        let result = skeleton.instantiate(&drawn(4), true);
        assert!(matches!(result, Err(PuzzleError::InvalidConfig(_))));
    }

    #[test]
    fn test_slot_count_of_fixed_only_skeleton() {
        let skeleton = Skeleton::new([("A", vec![Pattern::from(Statement::True)]), ("B", vec![])]);
        assert_eq!(skeleton.slot_count(), 0);
    }

    #[test]
    fn test_pattern_json_shape() {
        let pattern: Pattern = serde_json::from_str(
            r#"{"iff": [{"slot": 0}, {"fixed": {"is_of_type": {"target": "B", "kind": "monk"}}}]}"#,
        )
        .unwrap();
        assert_eq!(
            pattern,
            Pattern::iff(
                Pattern::slot(0),
                Pattern::Fixed(Statement::is_of_type("B", Kind::Monk))
            )
        );
        assert_eq!(pattern.max_slot(), Some(0));
    }
}
