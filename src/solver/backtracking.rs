use rayon::prelude::*;

use crate::clue::{Clue, Scope};
use crate::location::Location;
use crate::placement::{PersonId, View};

use super::{all_hold, Progress, Search, SearchResult};

/// The partial assignment of the rows filled so far.
#[derive(Clone)]
struct Partial {
    row_order: Vec<PersonId>,
    col_perm: Vec<usize>,
    positions: Vec<Option<Location>>,
    placed: Vec<bool>,
    used_cols: Vec<bool>,
}

impl Partial {
    fn new(n: usize) -> Self {
        Self {
            row_order: Vec::with_capacity(n),
            col_perm: Vec::with_capacity(n),
            positions: vec![None; n],
            placed: vec![false; n],
            used_cols: vec![false; n],
        }
    }

    fn next_row(&self) -> usize {
        self.row_order.len()
    }

    fn push(&mut self, person: PersonId, col: usize) {
        let row = self.next_row();
        self.row_order.push(person);
        self.col_perm.push(col);
        self.positions[person] = Some(Location(row, col));
        self.placed[person] = true;
        self.used_cols[col] = true;
    }

    fn pop(&mut self) {
        if let (Some(person), Some(col)) = (self.row_order.pop(), self.col_perm.pop()) {
            self.positions[person] = None;
            self.placed[person] = false;
            self.used_cols[col] = false;
        }
    }
}

struct Backtracker<'s, 'p> {
    search: &'s Search<'p>,
    // clues decidable once a given person is placed, indexed by person
    early: Vec<Vec<&'p Clue>>,
}

impl<'s, 'p> Backtracker<'s, 'p> {
    fn new(search: &'s Search<'p>) -> Self {
        let puzzle = search.puzzle;
        let mut early = vec![Vec::new(); puzzle.size()];
        for clue in puzzle.clues() {
            match clue.scope() {
                Scope::One(p) => early[p].push(clue),
                Scope::Two(p, q) => {
                    early[p].push(clue);
                    if q != p {
                        early[q].push(clue);
                    }
                }
                Scope::Everyone => {}
            }
        }
        Self { search, early }
    }

    /// The `(person, column)` pairs admissible for the next row of `partial`.
    fn candidates(&self, partial: &Partial) -> Vec<(PersonId, usize)> {
        let grid = self.search.puzzle.grid();
        let hints = &self.search.hints;
        let row = partial.next_row();
        let n = partial.placed.len();

        let mut candidates = Vec::new();
        for person in (0..n).filter(|p| !partial.placed[*p] && hints.may_take_next_row(*p, &partial.placed)) {
            for col in (0..n).filter(|c| !partial.used_cols[*c] && hints.allows_column(person, *c)) {
                if grid.get(Location(row, col)).is_some_and(|cell| !cell.is_blocked()) {
                    candidates.push((person, col));
                }
            }
        }
        candidates
    }

    /// Place `person` in the next row and check every clue that just became decidable.
    fn try_place(&self, partial: &mut Partial, person: PersonId, col: usize, result: &mut SearchResult) -> bool {
        result.stats.nodes_expanded += 1;
        partial.push(person, col);

        let view = View::new(self.search.puzzle.grid(), &partial.positions);
        let decidable = self.early[person].iter().copied().filter(|clue| clue.scope().is_placed(&view));
        if all_hold(decidable, &view, &mut result.stats) {
            true
        } else {
            log::trace!("pruned at row {}: person {person} in column {col}", partial.next_row() - 1);
            partial.pop();
            false
        }
    }

    fn descend(&self, partial: &mut Partial, result: &mut SearchResult) {
        if partial.next_row() == partial.placed.len() {
            self.search.finalize(partial.row_order.clone(), partial.col_perm.clone(), result);
            return;
        }

        for (person, col) in self.candidates(partial) {
            if self.try_place(partial, person, col, result) {
                self.descend(partial, result);
                partial.pop();
            }
        }
    }

    fn branch(&self, root: Partial, person: PersonId, col: usize) -> SearchResult {
        let mut partial = root;
        let mut result = SearchResult::default();
        if self.try_place(&mut partial, person, col, &mut result) {
            self.descend(&mut partial, &mut result);
        }
        result
    }
}

/// Fill rows top-down, abandoning a branch as soon as a clue over placed people fails.
///
/// Complete assignments are re-checked against every clue before being accepted.
pub(super) fn run(search: &Search<'_>, progress: &dyn Progress) -> SearchResult {
    let backtracker = Backtracker::new(search);
    let root = Partial::new(search.puzzle.size());
    let roots = backtracker.candidates(&root);
    progress.set_total(roots.len() as u64);

    let explore = |&(person, col): &(PersonId, usize)| {
        let result = backtracker.branch(root.clone(), person, col);
        progress.advance(1);
        result
    };

    if search.options.parallel {
        roots.par_iter()
            .map(explore)
            .reduce(SearchResult::default, SearchResult::merge)
    } else {
        roots.iter().map(explore).fold(SearchResult::default(), SearchResult::merge)
    }
}
