//! Budgeted search for puzzles with two hard-to-tell-apart solutions.
//!
//! The generator draws ordered statement combinations from the template pool,
//! binds them into the skeleton, and keeps the puzzles that pass every filter.
//! Small draw spaces are enumerated in full (in shuffled order); large ones are
//! walked in a scrambled order that never repeats a draw. Either way the search
//! is best-effort: it stops when the budget runs out and returns whatever it
//! has kept.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::{PuzzleError, Result};
use crate::puzzle::{Puzzle, Solution};
use crate::skeleton::Skeleton;
use crate::statement::Statement;
use crate::template::{statement_pool, StatementTemplate};

/// Largest number of statements a single draw may bind
pub const MAX_DRAW_SIZE: usize = 16;

/// A kept puzzle and its difficulty; higher is harder.
#[derive(Debug, Clone)]
pub struct ScoredPuzzle {
    pub puzzle: Puzzle,
    pub score: f64,
}

/// Why the search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every draw in the space was examined
    Exhausted,
    FractionOfSpace,
    MaxCandidates,
    TimeLimit,
}

/// Snapshot handed to a [`SearchObserver`] between draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProgress {
    pub examined: u64,
    pub valid: u64,
    pub accepted: usize,
    /// Number of distinct draws
    pub space_size: u128,
}

impl SearchProgress {
    /// Examined share of the draw space
    pub fn fraction_examined(&self) -> f64 {
        if self.space_size == 0 {
            return 1.0;
        }
        self.examined as f64 / self.space_size as f64
    }
}

/// Receives progress between draws.
///
/// Both hooks default to doing nothing; `()` is the silent observer.
pub trait SearchObserver {
    fn on_progress(&mut self, _progress: &SearchProgress) {}

    fn on_accepted(&mut self, _puzzle: &ScoredPuzzle) {}
}

impl SearchObserver for () {}

/// Result of a generator run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Kept puzzles, highest score first; equal scores keep discovery order
    pub puzzles: Vec<ScoredPuzzle>,
    /// Number of draws turned into candidate puzzles
    pub candidates_examined: u64,
    /// Candidates that passed `is_valid_puzzle`
    pub valid_candidates: u64,
    pub space_size: u128,
    pub search_exhausted: bool,
    pub stop_reason: StopReason,
    pub time_elapsed_ms: u64,
}

/// Number of ordered draws of `k` distinct items out of `n`
pub fn permutation_count(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    (0..k).try_fold(1u128, |acc, i| acc.checked_mul((n - i) as u128))
}

/// Every ordered draw of `k` distinct indices below `n`
fn all_draws(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(n: usize, k: usize, current: &mut Vec<usize>, used: &mut [bool], out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in 0..n {
            if used[i] {
                continue;
            }
            used[i] = true;
            current.push(i);
            extend(n, k, current, used, out);
            current.pop();
            used[i] = false;
        }
    }

    let mut out = Vec::new();
    extend(n, k, &mut Vec::with_capacity(k), &mut vec![false; n], &mut out);
    out
}

/// `a + b (mod m)` for `a, b < m`, without overflow
fn add_mod(a: u128, b: u128, m: u128) -> u128 {
    if a >= m - b {
        a - (m - b)
    } else {
        a + b
    }
}

/// `a * b (mod m)`, without overflow
fn mul_mod(a: u128, b: u128, m: u128) -> u128 {
    if let Some(product) = a.checked_mul(b) {
        return product % m;
    }
    let (mut a, mut b) = (a % m, b);
    let mut result = 0;
    while b > 0 {
        if b & 1 == 1 {
            result = add_mod(result, a, m);
        }
        a = add_mod(a, a, m);
        b >>= 1;
    }
    result
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Decode `rank` into a draw of `draw_size` distinct labels.
///
/// Digits are read in mixed radix `n, n - 1, ...`, so every rank below
/// `P(n, draw_size)` gives a different draw.
fn unrank(mut rank: u128, labels: &[usize], draw_size: usize) -> Vec<usize> {
    let mut remaining = labels.to_vec();
    let mut draw = Vec::with_capacity(draw_size);
    for _ in 0..draw_size {
        let radix = remaining.len() as u128;
        let digit = (rank % radix) as usize;
        rank /= radix;
        draw.push(remaining.swap_remove(digit));
    }
    draw
}

/// Visits every rank of the draw space once, in scrambled order.
///
/// Ranks follow `offset + step * i (mod space)` with `step` coprime to the
/// space, so no record of past draws is kept. Ranks decode over a shuffled
/// relabelling of the pool.
#[derive(Debug, Clone)]
struct RankWalk {
    labels: Vec<usize>,
    draw_size: usize,
    space_size: u128,
    step: u128,
    offset: u128,
    visited: u128,
}

impl RankWalk {
    fn new(pool_size: usize, draw_size: usize, space_size: u128, rng: &mut StdRng) -> Self {
        let mut labels: Vec<usize> = (0..pool_size).collect();
        labels.shuffle(rng);

        let (step, offset) = if space_size > 1 {
            let step = loop {
                let candidate = rng.random_range(1..space_size);
                if gcd(candidate, space_size) == 1 {
                    break candidate;
                }
            };
            (step, rng.random_range(0..space_size))
        } else {
            (1, 0)
        };

        Self {
            labels,
            draw_size,
            space_size,
            step,
            offset,
            visited: 0,
        }
    }
}

impl Iterator for RankWalk {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.visited >= self.space_size {
            return None;
        }
        let rank = add_mod(
            self.offset,
            mul_mod(self.step, self.visited, self.space_size),
            self.space_size,
        );
        self.visited += 1;
        Some(unrank(rank, &self.labels, self.draw_size))
    }
}

/// Yields draws until the space runs out
enum DrawOrder {
    Exhaustive(std::vec::IntoIter<Vec<usize>>),
    Walk(RankWalk),
}

impl Iterator for DrawOrder {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            DrawOrder::Exhaustive(draws) => draws.next(),
            DrawOrder::Walk(walk) => walk.next(),
        }
    }
}

/// Searches statement combinations for puzzles that pass the configured filters.
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    names: Vec<String>,
    pool: Vec<Statement>,
    skeleton: Skeleton,
    space_size: u128,
    config: GeneratorConfig,
}

impl PuzzleGenerator {
    /// Build a generator over `names`.
    ///
    /// The skeleton must speak for exactly these characters, its slots must
    /// fit in a draw from the template pool, and the number of distinct draws
    /// must fit in a `u128`.
    pub fn new(
        names: Vec<String>,
        templates: &[StatementTemplate],
        skeleton: Skeleton,
        config: GeneratorConfig,
    ) -> Result<Self> {
        if skeleton.names() != names {
            return Err(PuzzleError::InvalidConfig(format!(
                "skeleton characters {:?} do not match generator characters {:?}",
                skeleton.names(),
                names
            )));
        }

        let draw_size = skeleton.slot_count();
        if draw_size == 0 || draw_size > MAX_DRAW_SIZE {
            return Err(PuzzleError::InvalidConfig(format!(
                "skeleton uses {draw_size} slots, expected 1 to {MAX_DRAW_SIZE}"
            )));
        }

        let pool = statement_pool(templates, &names);
        if pool.len() < draw_size {
            return Err(PuzzleError::InvalidConfig(format!(
                "template pool has {} statements, skeleton needs {draw_size}",
                pool.len()
            )));
        }

        let space_size = permutation_count(pool.len(), draw_size).ok_or_else(|| {
            PuzzleError::InvalidConfig(format!(
                "drawing {draw_size} of {} statements has too many orderings",
                pool.len()
            ))
        })?;

        Ok(Self {
            names,
            pool,
            skeleton,
            space_size,
            config,
        })
    }

    /// Build a generator from the templates and skeleton named in `config`,
    /// or their defaults.
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        let skeleton = config.skeleton();
        let templates = config.templates();
        Self::new(skeleton.names(), &templates, skeleton, config)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn pool(&self) -> &[Statement] {
        &self.pool
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn draw_size(&self) -> usize {
        self.skeleton.slot_count()
    }

    /// Number of distinct ordered draws
    pub fn space_size(&self) -> u128 {
        self.space_size
    }

    /// Run the search until the space or the budget is exhausted.
    ///
    /// A candidate that fails to solve (a skeleton or template naming a
    /// character outside the cast) aborts the search with that error.
    pub fn generate(&self, observer: &mut impl SearchObserver) -> Result<GenerationReport> {
        let start_time = Instant::now();
        let budget = &self.config.budget;
        let deadline = budget.time_limit().map(|limit| start_time + limit);
        let space_size = self.space_size();
        let draw_size = self.draw_size();

        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let exhaustive = space_size <= u128::from(budget.exhaustive_limit);
        let mut draws = if exhaustive {
            let mut all = all_draws(self.pool.len(), draw_size);
            all.shuffle(&mut rng);
            DrawOrder::Exhaustive(all.into_iter())
        } else {
            DrawOrder::Walk(RankWalk::new(self.pool.len(), draw_size, space_size, &mut rng))
        };

        info!(
            event = "generate_start",
            characters = self.names.len(),
            pool_size = self.pool.len(),
            draw_size,
            space_size = %space_size,
            exhaustive,
        );

        let mut puzzles = Vec::new();
        let mut progress = SearchProgress {
            examined: 0,
            valid: 0,
            accepted: 0,
            space_size,
        };

        let stop_reason = loop {
            if let Some(reason) = self.budget_reached(&progress, deadline) {
                break reason;
            }
            let Some(draw) = draws.next() else {
                break StopReason::Exhausted;
            };

            let drawn: Vec<Statement> = draw.iter().map(|&i| self.pool[i].clone()).collect();
            let puzzle = self.skeleton.instantiate(&drawn, self.config.allow_monks)?;
            progress.examined += 1;

            if puzzle.is_valid_puzzle()? {
                progress.valid += 1;
                if let Some(score) = self.score(puzzle.solve()?) {
                    let scored = ScoredPuzzle { puzzle, score };
                    debug!(event = "candidate_accepted", score, examined = progress.examined);
                    observer.on_accepted(&scored);
                    puzzles.push(scored);
                    progress.accepted = puzzles.len();
                }
            }

            observer.on_progress(&progress);
        };

        // Stable, so equal scores keep discovery order
        puzzles.sort_by(|a, b| b.score.total_cmp(&a.score));

        let elapsed = start_time.elapsed();
        info!(
            event = "generate_end",
            examined = progress.examined,
            valid = progress.valid,
            accepted = puzzles.len(),
            stop_reason = ?stop_reason,
            elapsed_ms = duration_ms(elapsed),
        );

        Ok(GenerationReport {
            puzzles,
            candidates_examined: progress.examined,
            valid_candidates: progress.valid,
            space_size,
            search_exhausted: stop_reason == StopReason::Exhausted,
            stop_reason,
            time_elapsed_ms: duration_ms(elapsed),
        })
    }

    fn budget_reached(&self, progress: &SearchProgress, deadline: Option<Instant>) -> Option<StopReason> {
        if u128::from(progress.examined) >= progress.space_size {
            return Some(StopReason::Exhausted);
        }
        let budget = &self.config.budget;
        if progress.fraction_examined() >= budget.fraction_of_space {
            return Some(StopReason::FractionOfSpace);
        }
        if budget
            .max_candidates
            .is_some_and(|max| progress.examined >= max)
        {
            return Some(StopReason::MaxCandidates);
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(StopReason::TimeLimit);
        }
        None
    }

    /// Score of a solved candidate, or `None` when a filter rejects it
    fn score(&self, solution: &Solution) -> Option<f64> {
        let config = &self.config;
        if solution.solution_count() != config.required_solutions {
            return None;
        }
        if !solution.has_maximum_monks(config.required_saturated) {
            return None;
        }

        let mean = solution.mean_reason_count();
        if mean > config.max_mean_reason_count {
            return None;
        }

        let required_differences = self
            .names
            .len()
            .saturating_sub(config.allowed_character_variance);
        let consistent = solution.consistent_scenarios();
        for (i, a) in consistent.iter().enumerate() {
            if consistent[i + 1..]
                .iter()
                .any(|b| a.differences(b) < required_differences)
            {
                return None;
            }
        }

        if let Some(delta) = config.reason_distribution_delta {
            if !solution.has_balanced_reasons(delta) {
                return None;
            }
        }

        Some(-mean)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::config::SearchBudget;
    use crate::kind::Kind;
    use crate::skeleton::Pattern;
    use crate::statement::Relation;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    /// A, B and C each utter one drawn statement.
    fn one_slot_each() -> Skeleton {
        Skeleton::new([
            ("A", vec![Pattern::slot(0)]),
            ("B", vec![Pattern::slot(1)]),
            ("C", vec![Pattern::slot(2)]),
        ])
    }

    fn small_templates() -> Vec<StatementTemplate> {
        vec![StatementTemplate::IsOfType, StatementTemplate::IsSameAs]
    }

    fn small_generator(budget: SearchBudget) -> PuzzleGenerator {
        generator_with(GeneratorConfig::new().with_budget(budget))
    }

    fn generator_with(config: GeneratorConfig) -> PuzzleGenerator {
        let config = config.with_random_seed(17);
        PuzzleGenerator::new(names(&["A", "B", "C"]), &small_templates(), one_slot_each(), config)
            .unwrap()
    }

    fn whole_space() -> SearchBudget {
        SearchBudget::default().with_fraction_of_space(1.0)
    }

    #[derive(Default)]
    struct Recorder {
        progress_calls: u64,
        accepted: usize,
    }

    impl SearchObserver for Recorder {
        fn on_progress(&mut self, progress: &SearchProgress) {
            self.progress_calls += 1;
            assert_eq!(progress.examined, self.progress_calls);
        }

        fn on_accepted(&mut self, _puzzle: &ScoredPuzzle) {
            self.accepted += 1;
        }
    }

    #[test]
    fn test_permutation_count() {
        assert_eq!(permutation_count(12, 3), Some(1320));
        assert_eq!(permutation_count(5, 0), Some(1));
        assert_eq!(permutation_count(2, 3), Some(0));
        assert_eq!(permutation_count(200, 16).map(|n| n > 0), Some(true));
        assert_eq!(permutation_count(usize::MAX, 16), None);
    }

    #[test]
    fn test_all_draws_are_distinct_permutations() {
        let draws = all_draws(4, 2);
        assert_eq!(draws.len(), 12);
        let unique: HashSet<_> = draws.iter().cloned().collect();
        assert_eq!(unique.len(), 12);
        assert!(draws.iter().all(|d| d[0] != d[1]));
    }

    #[test]
    fn test_exhaustive_search_finds_every_puzzle() {
        let generator = small_generator(SearchBudget::default().with_fraction_of_space(1.0));
        assert_eq!(generator.pool().len(), 12);
        assert_eq!(generator.space_size(), 1320);

        let mut recorder = Recorder::default();
        let report = generator.generate(&mut recorder).unwrap();

        assert!(report.search_exhausted);
        assert_eq!(report.stop_reason, StopReason::Exhausted);
        assert_eq!(report.candidates_examined, 1320);
        assert_eq!(report.valid_candidates, 477);
        assert_eq!(report.puzzles.len(), 78);
        assert_eq!(recorder.progress_calls, 1320);
        assert_eq!(recorder.accepted, 78);
    }

    #[test]
    fn test_kept_puzzles_meet_every_filter() {
        let generator = small_generator(SearchBudget::default().with_fraction_of_space(1.0));
        let report = generator.generate(&mut ()).unwrap();

        for scored in &report.puzzles {
            let puzzle = &scored.puzzle;
            assert!(puzzle.is_valid_puzzle().unwrap());
            assert_eq!(puzzle.solution_count().unwrap(), 2);
            assert!(puzzle.has_maximum_monks(2).unwrap());

            let solutions = puzzle.consistent_scenarios().unwrap();
            assert_eq!(solutions[0].differences(solutions[1]), 3);

            let mean = puzzle.mean_reason_count().unwrap();
            assert!(mean <= 1.8);
            assert_eq!(scored.score, -mean);
        }
    }

    #[test]
    fn test_puzzles_sorted_by_score() {
        let generator = small_generator(SearchBudget::default().with_fraction_of_space(1.0));
        let report = generator.generate(&mut ()).unwrap();
        assert!(report
            .puzzles
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let budget = SearchBudget::default().with_max_candidates(200);
        let first = small_generator(budget.clone()).generate(&mut ()).unwrap();
        let second = small_generator(budget).generate(&mut ()).unwrap();

        let render = |report: &GenerationReport| -> Vec<String> {
            report.puzzles.iter().map(|p| p.puzzle.to_string()).collect()
        };
        assert_eq!(render(&first), render(&second));
    }

    #[test]
    fn test_max_candidates_stops_search() {
        let generator = small_generator(
            SearchBudget::default()
                .with_fraction_of_space(1.0)
                .with_max_candidates(50),
        );
        let report = generator.generate(&mut ()).unwrap();
        assert_eq!(report.candidates_examined, 50);
        assert_eq!(report.stop_reason, StopReason::MaxCandidates);
        assert!(!report.search_exhausted);
    }

    #[test]
    fn test_fraction_of_space_stops_search() {
        let generator = small_generator(SearchBudget::default());
        let report = generator.generate(&mut ()).unwrap();
        assert_eq!(report.candidates_examined, 660);
        assert_eq!(report.stop_reason, StopReason::FractionOfSpace);
    }

    #[test]
    fn test_zero_time_limit_examines_nothing() {
        let generator = small_generator(SearchBudget::default().with_time_limit(Duration::ZERO));
        let report = generator.generate(&mut ()).unwrap();
        assert_eq!(report.candidates_examined, 0);
        assert_eq!(report.stop_reason, StopReason::TimeLimit);
        assert!(report.puzzles.is_empty());
    }

    #[test]
    fn test_mul_mod_matches_wide_arithmetic() {
        assert_eq!(mul_mod(7, 9, 10), 3);
        assert_eq!(mul_mod(0, 9, 10), 0);

        let m = u128::MAX - 58;
        let a = u128::MAX - 100;
        // (m - 42)^2 = 42^2 (mod m)
        assert_eq!(mul_mod(a, a, m), 42 * 42);
        assert_eq!(add_mod(m - 1, m - 1, m), m - 2);
    }

    #[test]
    fn test_unrank_is_a_bijection() {
        let labels: Vec<usize> = (0..5).collect();
        let draws: HashSet<Vec<usize>> = (0..60).map(|rank| unrank(rank, &labels, 3)).collect();
        assert_eq!(draws.len(), 60);
        assert!(draws.iter().all(|d| d.iter().collect::<HashSet<_>>().len() == 3));
    }

    #[test]
    fn test_rank_walk_visits_each_draw_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let draws: Vec<Vec<usize>> = RankWalk::new(12, 3, 1320, &mut rng).collect();
        assert_eq!(draws.len(), 1320);

        let unique: HashSet<_> = draws.iter().cloned().collect();
        assert_eq!(unique.len(), 1320);
        assert!(draws.iter().all(|d| d.iter().all(|&i| i < 12)));
    }

    #[test]
    fn test_walked_search_matches_exhaustive_search() {
        let budget = SearchBudget {
            exhaustive_limit: 0,
            ..whole_space()
        };
        let report = small_generator(budget).generate(&mut ()).unwrap();
        assert!(report.search_exhausted);
        assert_eq!(report.candidates_examined, 1320);
        assert_eq!(report.valid_candidates, 477);
        assert_eq!(report.puzzles.len(), 78);
    }

    #[test]
    fn test_walked_search_respects_candidate_budget() {
        let budget = SearchBudget {
            exhaustive_limit: 0,
            ..whole_space().with_max_candidates(300)
        };
        let report = small_generator(budget).generate(&mut ()).unwrap();
        assert_eq!(report.candidates_examined, 300);
        assert_eq!(report.stop_reason, StopReason::MaxCandidates);

        let rendered: HashSet<String> = report.puzzles.iter().map(|p| p.puzzle.to_string()).collect();
        assert_eq!(rendered.len(), report.puzzles.len());
    }

    #[test]
    fn test_character_variance_loosens_difference_filter() {
        let mut config = GeneratorConfig::new().with_budget(whole_space());
        config.allowed_character_variance = 1;
        let report = generator_with(config).generate(&mut ()).unwrap();

        assert_eq!(report.puzzles.len(), 150);
        for scored in &report.puzzles {
            let solutions = scored.puzzle.consistent_scenarios().unwrap();
            assert_eq!(solutions.len(), 2);
            assert!(solutions[0].differences(solutions[1]) >= 2);
        }
    }

    #[test]
    fn test_reason_distribution_filter() {
        let mut config = GeneratorConfig::new().with_budget(whole_space());
        config.allowed_character_variance = 1;
        config.reason_distribution_delta = Some(0.1);
        let report = generator_with(config).generate(&mut ()).unwrap();

        assert_eq!(report.puzzles.len(), 138);
        for scored in &report.puzzles {
            assert!(scored.puzzle.solve().unwrap().has_balanced_reasons(0.1));
        }
    }

    #[test]
    fn test_oversized_draw_space_is_rejected() {
        // 16 slots spread over A, B and C
        let skeleton = Skeleton::new([
            ("A", (0..6).map(Pattern::slot).collect::<Vec<_>>()),
            ("B", (6..11).map(Pattern::slot).collect::<Vec<_>>()),
            ("C", (11..16).map(Pattern::slot).collect::<Vec<_>>()),
        ]);
        // 9 statements per copy; P(270, 16) needs 129 bits
        let templates = vec![StatementTemplate::IsOfType; 30];
        let result = PuzzleGenerator::new(
            names(&["A", "B", "C"]),
            &templates,
            skeleton.clone(),
            GeneratorConfig::default(),
        );
        assert!(matches!(result, Err(PuzzleError::InvalidConfig(_))));

        // P(252, 16) still fits
        let templates = vec![StatementTemplate::IsOfType; 28];
        let generator = PuzzleGenerator::new(
            names(&["A", "B", "C"]),
            &templates,
            skeleton,
            GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(generator.draw_size(), 16);
    }

    #[test]
    fn test_skeleton_must_match_names() {
        let result = PuzzleGenerator::new(
            names(&["A", "B", "D"]),
            &small_templates(),
            one_slot_each(),
            GeneratorConfig::default(),
        );
        assert!(matches!(result, Err(PuzzleError::InvalidConfig(_))));
    }

    #[test]
    fn test_skeleton_without_slots_is_rejected() {
        let skeleton = Skeleton::new([
            ("A", vec![Pattern::from(Statement::True)]),
            ("B", vec![]),
            ("C", vec![]),
        ]);
        let result = PuzzleGenerator::new(
            names(&["A", "B", "C"]),
            &small_templates(),
            skeleton,
            GeneratorConfig::default(),
        );
        assert!(matches!(result, Err(PuzzleError::InvalidConfig(_))));
    }

    #[test]
    fn test_pool_smaller_than_draw_is_rejected() {
        let result = PuzzleGenerator::new(
            names(&["A", "B", "C"]),
            &[StatementTemplate::True],
            one_slot_each(),
            GeneratorConfig::default(),
        );
        assert!(matches!(result, Err(PuzzleError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_character_aborts_search() {
        let skeleton = Skeleton::new([
            ("A", vec![Pattern::slot(0)]),
            (
                "B",
                vec![Pattern::from(Statement::is_of_type("Zed", Kind::Knight))],
            ),
            ("C", vec![]),
        ]);
        let config = GeneratorConfig::new().with_random_seed(1);
        let generator = PuzzleGenerator::new(
            names(&["A", "B", "C"]),
            &small_templates(),
            skeleton,
            config,
        )
        .unwrap();
        let result = generator.generate(&mut ());
        assert!(matches!(result, Err(PuzzleError::UnknownCharacter(name)) if name == "Zed"));
    }

    #[test]
    fn test_default_generator_setup() {
        let generator = PuzzleGenerator::from_config(GeneratorConfig::default()).unwrap();
        assert_eq!(generator.names(), names(&["A", "B", "C", "D"]).as_slice());
        assert_eq!(generator.draw_size(), 6);
        // 6 IsSameAs + 3 CountOfType + 12 Honesty
        assert_eq!(generator.pool().len(), 21);
        assert_eq!(
            generator.pool()[6],
            Statement::count_of_type(Kind::Knight, 2, Relation::Le)
        );
    }
}
