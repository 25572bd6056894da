//! Statement families the generator draws from.
//!
//! Each template knows every syntactically valid instantiation of itself over
//! a cast and the kind set, e.g. `IsOfType` yields one claim per name and kind.

use serde::{Deserialize, Serialize};

use crate::kind::Kind;
use crate::statement::{Relation, Statement};

/// How ordered pairs of characters are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// Every ordered pair of distinct names
    #[default]
    Permutations,
    /// Every unordered pair, first name earlier in the cast
    Combinations,
}

impl Pairing {
    pub fn pairs<'a>(self, names: &'a [String]) -> Vec<(&'a str, &'a str)> {
        let mut pairs = Vec::new();
        for (i, a) in names.iter().enumerate() {
            for (j, b) in names.iter().enumerate() {
                let keep = match self {
                    Pairing::Permutations => i != j,
                    Pairing::Combinations => i < j,
                };
                if keep {
                    pairs.push((a.as_str(), b.as_str()));
                }
            }
        }
        pairs
    }
}

fn default_relations() -> Vec<Relation> {
    vec![Relation::Le]
}

/// A family of statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatementTemplate {
    True,
    IsOfType,
    IsSameAs,
    Honesty {
        #[serde(default = "default_relations")]
        relations: Vec<Relation>,
        #[serde(default)]
        pairing: Pairing,
    },
    /// Counts use half the cast, rounded down
    CountOfType {
        #[serde(default = "default_relations")]
        relations: Vec<Relation>,
    },
    AllTheSame,
    AllDifferent,
}

impl StatementTemplate {
    /// Honesty over ordered pairs with `<=`
    pub fn honesty() -> Self {
        StatementTemplate::Honesty {
            relations: default_relations(),
            pairing: Pairing::Permutations,
        }
    }

    pub fn count_of_type() -> Self {
        StatementTemplate::CountOfType {
            relations: default_relations(),
        }
    }

    /// The template library used when none is configured
    pub fn default_library() -> Vec<StatementTemplate> {
        vec![
            StatementTemplate::IsSameAs,
            StatementTemplate::count_of_type(),
            StatementTemplate::honesty(),
        ]
    }

    /// Every instantiation of this template over `names` and `kinds`
    pub fn possibilities(&self, names: &[String], kinds: &[Kind]) -> Vec<Statement> {
        match self {
            StatementTemplate::True => vec![Statement::True],
            StatementTemplate::IsOfType => names
                .iter()
                .flat_map(|name| {
                    kinds
                        .iter()
                        .map(move |kind| Statement::is_of_type(name.clone(), *kind))
                })
                .collect(),
            StatementTemplate::IsSameAs => Pairing::Combinations
                .pairs(names)
                .into_iter()
                .map(|(a, b)| Statement::is_same_as(a, b))
                .collect(),
            StatementTemplate::Honesty { relations, pairing } => pairing
                .pairs(names)
                .into_iter()
                .flat_map(|(a, b)| {
                    relations
                        .iter()
                        .map(move |relation| Statement::honesty(a, b, *relation))
                })
                .collect(),
            StatementTemplate::CountOfType { relations } => {
                let count = names.len() / 2;
                kinds
                    .iter()
                    .flat_map(|kind| {
                        relations
                            .iter()
                            .map(move |relation| Statement::count_of_type(*kind, count, *relation))
                    })
                    .collect()
            }
            StatementTemplate::AllTheSame => vec![Statement::AllTheSame],
            StatementTemplate::AllDifferent => vec![Statement::AllDifferent],
        }
    }
}

/// Every instantiation of every template, in library order
pub fn statement_pool(templates: &[StatementTemplate], names: &[String]) -> Vec<Statement> {
    templates
        .iter()
        .flat_map(|template| template.possibilities(names, &Kind::ALL))
        .collect()
}
