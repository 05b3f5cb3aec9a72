//! Search strategies over the space of placements.
//!
//! Both strategies return the same sorted set of accepted placements for any puzzle;
//! they differ only in how much of the space they construct on the way.

use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::sync::atomic::{AtomicU64, Ordering};

use strum::{EnumString, VariantArray};

use crate::clue::Clue;
use crate::hints::PruningHints;
use crate::placement::{Placement, PlacementError, View};
use crate::puzzle::Puzzle;
use crate::solution::{resolve, Solution, SolveError};

mod backtracking;
mod exhaustive;

/// Which search to run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, strum::Display, EnumString, VariantArray)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Strategy {
    /// Every row order, then every column permutation.
    Exhaustive,
    /// Row-by-row assignment, abandoning a branch as soon as a decidable clue fails.
    #[default]
    Backtracking,
}

/// Knobs for a solve call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolveOptions {
    /// Report progress; through the log when no explicit [`Progress`] is given.
    pub verbose: bool,
    /// Apply [`PruningHints`]. Turning this off must not change the result, only the work done.
    pub pruning: bool,
    /// Fan the search out over the rayon pool.
    pub parallel: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self { verbose: false, pruning: true, parallel: false }
    }
}

/// Receives monotonically increasing progress counts during a search.
pub trait Progress: Sync {
    /// Announce how many units the search will report; resets the count.
    fn set_total(&self, total: u64);
    /// Report `delta` more units done.
    fn advance(&self, delta: u64);
    /// The search is over.
    fn finish(&self) {}
}

/// Progress sink that discards everything.
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_total(&self, _total: u64) {}
    fn advance(&self, _delta: u64) {}
}

/// Progress sink that logs each completed tenth of the work at info level.
#[derive(Default)]
pub struct LogProgress {
    total: AtomicU64,
    done: AtomicU64,
}

impl Progress for LogProgress {
    fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        log::info!("searching {total} branches");
    }

    fn advance(&self, delta: u64) {
        let total = self.total.load(Ordering::Relaxed).max(1);
        let before = self.done.fetch_add(delta, Ordering::Relaxed);
        let after = before + delta;
        if before * 10 / total != after * 10 / total {
            log::info!("progress: {after}/{total} branches");
        }
    }
}

/// Work counters for one search, summed over parallel branches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Attempts to construct a full [`Placement`].
    pub placements_built: u64,
    /// Constructions rejected because someone would stand on a blocked cell.
    pub rejected_by_geometry: u64,
    /// Calls to [`Clue::holds`], partial and full.
    pub clue_evaluations: u64,
    /// Row orders expanded (exhaustive) or single-row assignments made (backtracking).
    pub nodes_expanded: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.placements_built += rhs.placements_built;
        self.rejected_by_geometry += rhs.rejected_by_geometry;
        self.clue_evaluations += rhs.clue_evaluations;
        self.nodes_expanded += rhs.nodes_expanded;
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} placements built ({} blocked), {} clue evaluations, {} nodes",
            self.placements_built, self.rejected_by_geometry, self.clue_evaluations, self.nodes_expanded
        )
    }
}

/// Accepted placements, sorted, plus what it took to find them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchResult {
    /// Placements satisfying every clue.
    pub accepted: Vec<Placement>,
    /// Work done to find them.
    pub stats: SearchStats,
}

impl SearchResult {
    fn merge(mut self, other: SearchResult) -> SearchResult {
        self.accepted.extend(other.accepted);
        self.stats += other.stats;
        self
    }
}

/// A resolved outcome together with the search counters behind it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SolveReport {
    /// What the accepted placements amount to.
    pub solution: Solution,
    /// Work done by the search.
    pub stats: SearchStats,
}

/// Shared read-only state of one search.
pub(crate) struct Search<'p> {
    puzzle: &'p Puzzle,
    hints: PruningHints,
    options: SolveOptions,
}

impl<'p> Search<'p> {
    fn new(puzzle: &'p Puzzle, options: SolveOptions) -> Self {
        let hints = if options.pruning {
            PruningHints::extract(puzzle)
        } else {
            PruningHints::none(puzzle.size())
        };
        Self { puzzle, hints, options }
    }

    /// Build the placement and run every clue on it, stopping at the first failure.
    fn finalize(&self, row_order: Vec<usize>, col_perm: Vec<usize>, result: &mut SearchResult) {
        result.stats.placements_built += 1;
        let placement = match Placement::new(self.puzzle.grid(), row_order, col_perm) {
            Ok(placement) => placement,
            Err(PlacementError::Blocked(location)) => {
                log::trace!("rejected: {location} is blocked");
                result.stats.rejected_by_geometry += 1;
                return;
            }
            Err(error) => {
                log::warn!("skipping malformed candidate: {error}");
                return;
            }
        };

        if all_hold(self.puzzle.clues().iter(), &placement.view(self.puzzle.grid()), &mut result.stats) {
            log::debug!("accepted {placement}");
            result.accepted.push(placement);
        }
    }
}

fn all_hold<'c>(clues: impl IntoIterator<Item = &'c Clue>, view: &View<'_>, stats: &mut SearchStats) -> bool {
    clues.into_iter().all(|clue| {
        stats.clue_evaluations += 1;
        clue.holds(view)
    })
}

/// Run `strategy` and return the accepted placements without resolving them.
pub fn search(puzzle: &Puzzle, strategy: Strategy, options: &SolveOptions, progress: &dyn Progress) -> SearchResult {
    let search = Search::new(puzzle, *options);
    if search.hints.is_contradictory() {
        log::info!("pruning hints contradict each other; nothing to search");
        return SearchResult::default();
    }

    let mut result = match strategy {
        Strategy::Exhaustive => exhaustive::run(&search, progress),
        Strategy::Backtracking => backtracking::run(&search, progress),
    };
    progress.finish();

    result.accepted.sort();
    log::info!("{strategy} search accepted {} placements: {}", result.accepted.len(), result.stats);
    result
}

/// Solve `puzzle`, reporting progress to `progress`.
pub fn solve_with_progress(
    puzzle: &Puzzle,
    strategy: Strategy,
    options: &SolveOptions,
    progress: &dyn Progress,
) -> Result<SolveReport, SolveError> {
    let SearchResult { accepted, stats } = search(puzzle, strategy, options, progress);
    let solution = resolve(puzzle, accepted)?;
    Ok(SolveReport { solution, stats })
}

/// Solve `puzzle`; progress goes to the log when `options.verbose` is set.
pub fn solve(puzzle: &Puzzle, strategy: Strategy, options: &SolveOptions) -> Result<SolveReport, SolveError> {
    if options.verbose {
        solve_with_progress(puzzle, strategy, options, &LogProgress::default())
    } else {
        solve_with_progress(puzzle, strategy, options, &NoProgress)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn strategies_parse_by_name() {
        assert_eq!(Strategy::from_str("exhaustive"), Ok(Strategy::Exhaustive));
        assert_eq!(Strategy::from_str("Backtracking"), Ok(Strategy::Backtracking));
        assert!(Strategy::from_str("brute").is_err());
        assert_eq!(Strategy::default().to_string(), "backtracking");
        assert_eq!(Strategy::VARIANTS.len(), 2);
    }

    #[test]
    fn pruning_is_on_by_default() {
        let options = SolveOptions::default();
        assert!(options.pruning);
        assert!(!options.verbose);
        assert!(!options.parallel);
    }

    #[test]
    fn stats_add_up() {
        let mut stats = SearchStats { placements_built: 2, rejected_by_geometry: 1, clue_evaluations: 5, nodes_expanded: 3 };
        stats += SearchStats { placements_built: 1, rejected_by_geometry: 0, clue_evaluations: 2, nodes_expanded: 4 };
        assert_eq!(stats, SearchStats { placements_built: 3, rejected_by_geometry: 1, clue_evaluations: 7, nodes_expanded: 7 });
    }

    #[test]
    fn log_progress_counts() {
        let progress = LogProgress::default();
        progress.set_total(20);
        progress.advance(3);
        progress.advance(4);
        assert_eq!(progress.done.load(Ordering::Relaxed), 7);
    }
}
