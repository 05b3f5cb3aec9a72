#![warn(missing_docs)]

//! # `murdoku`
//!
//! A solver for Murdoku, a placement puzzle with a murder mystery on top.
//! N people stand on an N×N floor plan divided into rooms, exactly one per row and one per column,
//! never on a cell blocked by furniture. A set of clues constrains where each person may stand;
//! the murderer is whoever ends up alone in a room with the victim.
//!
//! Begin by loading a puzzle with [`load_puzzle`](loader::load_puzzle), or assemble one by hand from a
//! [`GridBuilder`](builder::GridBuilder), a list of people and a list of [`Clue`]s via [`Puzzle::new`].
//! Then call [`solve()`](solver::solve) with a [`Strategy`](solver::Strategy), yielding a [`Solution`].
//!
//! # Internals
//! A candidate placement is a pair of permutations: `row_order[i]` is the person in row `i`,
//! `col_perm[i]` the column that person takes. The search space is therefore `(N!)²` placements.
//!
//! Two strategies walk it:
//! 1. The exhaustive strategy enumerates every row order and every column permutation, building each
//! [`Placement`] and running the clues over it in order until one fails.
//! 2. The backtracking strategy fills rows top-down and evaluates a clue as soon as everyone it mentions is
//! placed, so a failing branch is abandoned before it is completed.
//!
//! Both consult [`PruningHints`](hints::PruningHints) read off the clues beforehand: `above_person` and
//! `below_person` become a precedence graph over row orders, `at_column` pins a person's column.
//! Hints only ever shrink the search; with or without them, either strategy accepts exactly the same placements.

pub use cell::Cell;
pub use clue::Clue;
pub use location::Location;
pub use placement::{PersonId, Placement};
pub use puzzle::Puzzle;
pub use solution::Solution;

/// Fallible construction of [`Grid`](grid::Grid)s.
pub mod builder;
pub(crate) mod cell;
/// Clue predicates over placements.
pub mod clue;
/// The floor plan.
pub mod grid;
/// Search restrictions read off the clues.
pub mod hints;
pub mod loader;
pub(crate) mod location;
/// Objects that may sit on a cell.
pub mod object;
/// Candidate assignments of people to cells.
pub mod placement;
/// Validated puzzles and their textual output.
pub mod puzzle;
pub mod registry;
/// Turning accepted placements into an answer.
pub mod solution;
pub mod solver;
