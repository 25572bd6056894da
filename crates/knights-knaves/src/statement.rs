//! Statement expression trees and their evaluation.
//!
//! A statement is a closed tree of claims about an assignment. Truth is
//! evaluated against a [`Scenario`]; consistency layers the speaker's kind on
//! top, exactly once, at the root of each uttered statement.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{PuzzleError, Result};
use crate::kind::Kind;
use crate::scenario::{Scenario, MAX_CHARACTERS};

/// Comparison operator used by honesty and count claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
}

impl Relation {
    pub const ALL: [Relation; 5] = [
        Relation::Eq,
        Relation::Lt,
        Relation::Gt,
        Relation::Le,
        Relation::Ge,
    ];

    /// Apply the operator as `a <op> b`
    pub fn holds<T: Ord>(self, a: T, b: T) -> bool {
        match self {
            Relation::Eq => a == b,
            Relation::Lt => a < b,
            Relation::Gt => a > b,
            Relation::Le => a <= b,
            Relation::Ge => a >= b,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Eq => "==",
            Relation::Lt => "<",
            Relation::Gt => ">",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Relation {
    type Err = PuzzleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let symbol = s.trim();
        Relation::ALL
            .into_iter()
            .find(|relation| relation.symbol() == symbol)
            .ok_or_else(|| PuzzleError::InvalidRelation(s.to_string()))
    }
}

/// A claim about the kinds of characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// Always true
    True,
    /// `target` is of `kind`
    IsOfType { target: String, kind: Kind },
    /// `first` and `second` are the same kind
    IsSameAs { first: String, second: String },
    /// Compares the truth quantifiers of two characters
    Honesty {
        first: String,
        second: String,
        relation: Relation,
    },
    /// Compares the number of characters of `kind` against `count`
    CountOfType {
        kind: Kind,
        count: usize,
        relation: Relation,
    },
    AllTheSame,
    AllDifferent,
    Not(Box<Statement>),
    /// True when every part is true; true when empty
    And(Vec<Statement>),
    /// True when some part is true; false when empty
    Or(Vec<Statement>),
    Implies(Box<Statement>, Box<Statement>),
    Iff(Box<Statement>, Box<Statement>),
    Xor(Box<Statement>, Box<Statement>),
}

impl Statement {
    pub fn is_of_type(target: impl Into<String>, kind: Kind) -> Self {
        Statement::IsOfType {
            target: target.into(),
            kind,
        }
    }

    pub fn is_same_as(first: impl Into<String>, second: impl Into<String>) -> Self {
        Statement::IsSameAs {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn honesty(first: impl Into<String>, second: impl Into<String>, relation: Relation) -> Self {
        Statement::Honesty {
            first: first.into(),
            second: second.into(),
            relation,
        }
    }

    pub fn count_of_type(kind: Kind, count: usize, relation: Relation) -> Self {
        Statement::CountOfType {
            kind,
            count,
            relation,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(statement: Statement) -> Self {
        Statement::Not(Box::new(statement))
    }

    pub fn and(statements: impl IntoIterator<Item = Statement>) -> Self {
        Statement::And(statements.into_iter().collect())
    }

    pub fn or(statements: impl IntoIterator<Item = Statement>) -> Self {
        Statement::Or(statements.into_iter().collect())
    }

    pub fn implies(antecedent: Statement, consequent: Statement) -> Self {
        Statement::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn iff(a: Statement, b: Statement) -> Self {
        Statement::Iff(Box::new(a), Box::new(b))
    }

    pub fn xor(a: Statement, b: Statement) -> Self {
        Statement::Xor(Box::new(a), Box::new(b))
    }

    /// "`relation` `count` of us are the same".
    ///
    /// Holds when at least one kind satisfies the count claim.
    pub fn sameness_count(count: usize, relation: Relation) -> Self {
        Statement::or(
            Kind::ALL
                .into_iter()
                .map(|kind| Statement::count_of_type(kind, count, relation)),
        )
    }

    /// Evaluate whether this claim is true under `scenario`.
    ///
    /// Every operand is evaluated, so a name missing from the scenario is
    /// reported no matter what its siblings evaluate to.
    pub fn evaluate_truth(&self, scenario: &Scenario) -> Result<bool> {
        let truth = match self {
            Statement::True => true,
            Statement::IsOfType { target, kind } => scenario.lookup(target)? == *kind,
            Statement::IsSameAs { first, second } => {
                scenario.lookup(first)? == scenario.lookup(second)?
            }
            Statement::Honesty {
                first,
                second,
                relation,
            } => {
                let a = scenario.lookup(first)?.truth_quantifier();
                let b = scenario.lookup(second)?.truth_quantifier();
                relation.holds(a, b)
            }
            Statement::CountOfType {
                kind,
                count,
                relation,
            } => relation.holds(scenario.count_of(*kind), *count),
            Statement::AllTheSame => {
                let mut kinds = scenario.kinds();
                match kinds.next() {
                    Some(first) => kinds.all(|kind| kind == first),
                    None => true,
                }
            }
            Statement::AllDifferent => {
                let kinds: SmallVec<[Kind; MAX_CHARACTERS]> = scenario.kinds().collect();
                kinds
                    .iter()
                    .enumerate()
                    .all(|(i, a)| kinds[i + 1..].iter().all(|b| a != b))
            }
            Statement::Not(inner) => !inner.evaluate_truth(scenario)?,
            Statement::And(parts) => {
                let mut all = true;
                for part in parts {
                    all &= part.evaluate_truth(scenario)?;
                }
                all
            }
            Statement::Or(parts) => {
                let mut any = false;
                for part in parts {
                    any |= part.evaluate_truth(scenario)?;
                }
                any
            }
            Statement::Implies(a, b) => {
                let (a, b) = (a.evaluate_truth(scenario)?, b.evaluate_truth(scenario)?);
                !a || b
            }
            Statement::Iff(a, b) => {
                let (a, b) = (a.evaluate_truth(scenario)?, b.evaluate_truth(scenario)?);
                (a && b) || (!a && !b)
            }
            Statement::Xor(a, b) => {
                let (a, b) = (a.evaluate_truth(scenario)?, b.evaluate_truth(scenario)?);
                (a || b) && !(a && b)
            }
        };
        Ok(truth)
    }

    /// Whether a speaker of kind `speaker` could utter this under `scenario`.
    pub fn evaluate_consistency(&self, speaker: Kind, scenario: &Scenario) -> Result<bool> {
        match speaker {
            Kind::Monk => Ok(true),
            Kind::Knight => self.evaluate_truth(scenario),
            Kind::Knave => Ok(!self.evaluate_truth(scenario)?),
        }
    }

    /// Every character name this tree mentions, in first-seen order
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Statement::IsOfType { target, .. } => push_unique(names, target),
            Statement::IsSameAs { first, second } | Statement::Honesty { first, second, .. } => {
                push_unique(names, first);
                push_unique(names, second);
            }
            Statement::Not(inner) => inner.collect_names(names),
            Statement::And(parts) | Statement::Or(parts) => {
                for part in parts {
                    part.collect_names(names);
                }
            }
            Statement::Implies(a, b) | Statement::Iff(a, b) | Statement::Xor(a, b) => {
                a.collect_names(names);
                b.collect_names(names);
            }
            Statement::True
            | Statement::CountOfType { .. }
            | Statement::AllTheSame
            | Statement::AllDifferent => {}
        }
    }
}

fn push_unique<'a>(names: &mut Vec<&'a str>, name: &'a str) {
    if !names.contains(&name) {
        names.push(name);
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &str, parts: &[Statement]) -> fmt::Result {
    write!(f, "{head}(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{part}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::True => f.write_str("True"),
            Statement::IsOfType { target, kind } => write!(f, "IsOfType({target}, {kind})"),
            Statement::IsSameAs { first, second } => write!(f, "IsSameAs({first}, {second})"),
            Statement::Honesty {
                first,
                second,
                relation,
            } => write!(f, "Honesty({first} {relation} {second})"),
            Statement::CountOfType {
                kind,
                count,
                relation,
            } => write!(f, "CountOfType({kind} {relation} {count})"),
            Statement::AllTheSame => f.write_str("AllTheSame"),
            Statement::AllDifferent => f.write_str("AllDifferent"),
            Statement::Not(inner) => write!(f, "Not({inner})"),
            Statement::And(parts) => write_list(f, "And", parts),
            Statement::Or(parts) => write_list(f, "Or", parts),
            Statement::Implies(a, b) => write!(f, "Implies({a}, {b})"),
            Statement::Iff(a, b) => write!(f, "Iff({a}, {b})"),
            Statement::Xor(a, b) => write!(f, "Xor({a}, {b})"),
        }
    }
}
