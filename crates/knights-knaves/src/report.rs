//! Tabular per-scenario rows for export.
//!
//! One row per enumerated scenario: the kind of every character in name order,
//! the verdict, and the reasons it was rejected. Rows are plain data; writing
//! them anywhere is up to the caller.

use serde::Serialize;

use crate::checker::{CheckedScenario, Reason};
use crate::kind::Kind;
use crate::puzzle::Solution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Consistent,
    Inconsistent,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Consistent => "Consistent",
            Verdict::Inconsistent => "Inconsistent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioRow {
    /// `(name, kind)` in name order
    pub kinds: Vec<(String, Kind)>,
    pub verdict: Verdict,
    pub reasons: Vec<Reason>,
}

impl ScenarioRow {
    pub fn from_checked(checked: &CheckedScenario) -> Self {
        let verdict = if checked.is_consistent() {
            Verdict::Consistent
        } else {
            Verdict::Inconsistent
        };
        Self {
            kinds: checked
                .scenario
                .iter()
                .map(|(name, kind)| (name.to_string(), kind))
                .collect(),
            verdict,
            reasons: checked.reasons.clone(),
        }
    }

    /// Column names: every character in name order, then `Result` and `Explanation`
    pub fn header(row: &ScenarioRow) -> Vec<String> {
        row.kinds
            .iter()
            .map(|(name, _)| name.clone())
            .chain(["Result".to_string(), "Explanation".to_string()])
            .collect()
    }

    /// Cell values matching [`ScenarioRow::header`]
    pub fn cells(&self) -> Vec<String> {
        let explanation = self
            .reasons
            .iter()
            .map(Reason::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        self.kinds
            .iter()
            .map(|(_, kind)| kind.tag().to_string())
            .chain([self.verdict.as_str().to_string(), explanation])
            .collect()
    }
}

impl Solution {
    /// One row per enumerated scenario, in enumeration order
    pub fn rows(&self) -> Vec<ScenarioRow> {
        self.scenarios().iter().map(ScenarioRow::from_checked).collect()
    }
}
