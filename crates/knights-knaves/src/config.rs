//! Generator configuration.
//!
//! Every field has a default, so a TOML file only needs to name what it
//! changes:
//!
//! ```
//! use knights_knaves::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [budget]
//!     max_candidates = 5000
//!
//!     [[templates]]
//!     type = "honesty"
//!     relations = ["<", ">"]
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.required_solutions, 2);
//! assert_eq!(config.templates().len(), 1);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::skeleton::Skeleton;
use crate::template::StatementTemplate;

/// Filters, budget and inputs of a generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub allow_monks: bool,

    /// Seed for reproducible draw order; drawn from the OS when unset.
    pub random_seed: Option<u64>,

    /// Number of consistent scenarios a kept puzzle must have.
    pub required_solutions: usize,

    /// Number of solutions that must use the full monk allowance.
    pub required_saturated: usize,

    /// Upper bound on the mean number of offending characters per
    /// rejected scenario.
    pub max_mean_reason_count: f64,

    /// How many characters the solutions may agree on.
    pub allowed_character_variance: usize,

    /// When set, every character's share of the rejection reasons must stay
    /// within this distance of an even split.
    pub reason_distribution_delta: Option<f64>,

    pub budget: SearchBudget,

    /// Statement families to draw from; the default library when unset.
    pub templates: Option<Vec<StatementTemplate>>,

    /// Skeleton to fill; the four character default when unset.
    pub skeleton: Option<Skeleton>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            allow_monks: true,
            random_seed: None,
            required_solutions: 2,
            required_saturated: 2,
            max_mean_reason_count: 1.8,
            allowed_character_variance: 0,
            reason_distribution_delta: None,
            budget: SearchBudget::default(),
            templates: None,
            skeleton: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_allow_monks(mut self, allow_monks: bool) -> Self {
        self.allow_monks = allow_monks;
        self
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_templates(mut self, templates: Vec<StatementTemplate>) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_skeleton(mut self, skeleton: Skeleton) -> Self {
        self.skeleton = Some(skeleton);
        self
    }

    /// Configured templates, or the default library.
    pub fn templates(&self) -> Vec<StatementTemplate> {
        self.templates
            .clone()
            .unwrap_or_else(StatementTemplate::default_library)
    }

    /// Configured skeleton, or the default one.
    pub fn skeleton(&self) -> Skeleton {
        self.skeleton.clone().unwrap_or_default()
    }
}

/// When the search stops.
///
/// Checked before every draw; whichever limit is hit first ends the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    /// Spaces of at most this many draws are enumerated in full and
    /// shuffled instead of sampled.
    pub exhaustive_limit: u64,

    /// Share of the draw space to examine before stopping.
    pub fraction_of_space: f64,

    pub max_candidates: Option<u64>,

    pub time_limit_ms: Option<u64>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            exhaustive_limit: 250_000,
            fraction_of_space: 0.5,
            max_candidates: None,
            time_limit_ms: None,
        }
    }
}

impl SearchBudget {
    pub fn with_fraction_of_space(mut self, fraction: f64) -> Self {
        self.fraction_of_space = fraction;
        self
    }

    pub fn with_max_candidates(mut self, candidates: u64) -> Self {
        self.max_candidates = Some(candidates);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis() as u64);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}
