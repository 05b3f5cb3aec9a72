use std::fmt::{Display, Formatter};

use crate::cell::Cell;
use crate::grid::Grid;
use crate::location::Location;
use crate::object::ObjectKind;

/// Index of a person in [`Puzzle::people`](crate::Puzzle::people).
pub type PersonId = usize;

/// Reasons a candidate [`Placement`] is rejected at construction.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// A sequence or the grid's column count differs from the grid's row count.
    #[error("row order has {row_order} entries and column permutation {col_perm}, but the grid needs {expected}")]
    LengthMismatch {
        /// Length of the row order given.
        row_order: usize,
        /// Length of the column permutation given.
        col_perm: usize,
        /// Number of grid rows.
        expected: usize,
    },
    /// The sequence repeats or skips an index.
    #[error("{0:?} is not a permutation of 0..{len}", len = .0.len())]
    NotAPermutation(Vec<usize>),
    /// Someone would stand on this blocked cell.
    #[error("cell {0} is blocked")]
    Blocked(Location),
}

/// One candidate assignment of people to cells, encoded as a pair of permutations.
///
/// Person `row_order[i]` stands at `(i, col_perm[i])`. Because both are permutations of `0..n`,
/// every row and every column holds exactly one person.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Placement {
    row_order: Vec<PersonId>,
    col_perm: Vec<usize>,
    // indexed by person; always fully populated
    positions: Vec<Option<Location>>,
}

pub(crate) fn is_permutation(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    values.iter().all(|&v| v < seen.len() && !std::mem::replace(&mut seen[v], true))
}

impl Placement {
    /// Build a placement, rejecting it if either sequence is not a permutation of the grid's
    /// index range or if anyone would stand on a blocked cell.
    pub fn new(grid: &Grid, row_order: Vec<PersonId>, col_perm: Vec<usize>) -> Result<Self, PlacementError> {
        let n = grid.rows();
        if row_order.len() != n || col_perm.len() != n || grid.cols() != n {
            return Err(PlacementError::LengthMismatch {
                row_order: row_order.len(),
                col_perm: col_perm.len(),
                expected: n,
            });
        }
        for sequence in [&row_order, &col_perm] {
            if !is_permutation(sequence) {
                return Err(PlacementError::NotAPermutation(sequence.clone()));
            }
        }

        let mut positions = vec![None; n];
        for (row, (&person, &col)) in row_order.iter().zip(col_perm.iter()).enumerate() {
            let location = Location(row, col);
            match grid.get(location) {
                Some(cell) if !cell.is_blocked() => positions[person] = Some(location),
                _ => return Err(PlacementError::Blocked(location)),
            }
        }

        Ok(Self { row_order, col_perm, positions })
    }

    /// Which person occupies each row.
    pub fn row_order(&self) -> &[PersonId] {
        &self.row_order
    }

    /// Which column each row's occupant sits in.
    pub fn col_perm(&self) -> &[usize] {
        &self.col_perm
    }

    /// Number of people placed, equal to the grid size.
    pub fn len(&self) -> usize {
        self.row_order.len()
    }

    /// Whether nobody is placed, which only a zero-sized grid allows.
    pub fn is_empty(&self) -> bool {
        self.row_order.is_empty()
    }

    /// Where `person` stands, or `None` for an unknown id.
    pub fn position_of(&self, person: PersonId) -> Option<Location> {
        self.positions.get(person).copied().flatten()
    }

    /// The room `person` stands in on `grid`.
    pub fn room_of<'g>(&self, grid: &'g Grid, person: PersonId) -> Option<&'g str> {
        self.position_of(person).and_then(|location| grid.get(location)).map(Cell::room)
    }

    /// People standing in `room`, in row order.
    pub fn people_in_room(&self, grid: &Grid, room: &str) -> Vec<PersonId> {
        self.view(grid).people_in_room(room).collect()
    }

    /// All occupied locations, in row order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.col_perm.iter().enumerate().map(|(row, &col)| Location(row, col))
    }

    /// A read-only view pairing this placement with the grid it was built against.
    pub fn view<'a>(&'a self, grid: &'a Grid) -> View<'a> {
        View::new(grid, &self.positions)
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self.row_order.iter()
            .zip(self.locations())
            .map(|(person, location)| format!("{person}@{location}"))
            .collect();
        write!(f, "[{}]", pairs.join(" "))
    }
}

/// A possibly partial assignment of people to cells, seen through the grid.
///
/// Full placements expose every person; the backtracking search builds views over
/// partially filled position tables, in which unplaced people report `None`.
#[derive(Clone, Copy)]
pub struct View<'a> {
    grid: &'a Grid,
    positions: &'a [Option<Location>],
}

impl<'a> View<'a> {
    /// View `positions`, indexed by person, against `grid`.
    pub fn new(grid: &'a Grid, positions: &'a [Option<Location>]) -> Self {
        Self { grid, positions }
    }

    /// The grid positions refer to.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Where `person` stands, if placed.
    pub fn position_of(&self, person: PersonId) -> Option<Location> {
        self.positions.get(person).copied().flatten()
    }

    /// The cell under `person`, if placed.
    pub fn cell_of(&self, person: PersonId) -> Option<&'a Cell> {
        self.position_of(person).and_then(|location| self.grid.get(location))
    }

    /// The room of the cell under `person`, if placed.
    pub fn room_of(&self, person: PersonId) -> Option<&'a str> {
        self.cell_of(person).map(Cell::room)
    }

    /// Whether `person` has a position yet.
    pub fn is_placed(&self, person: PersonId) -> bool {
        self.position_of(person).is_some()
    }

    /// Every placed person with their cell, ordered by person.
    pub fn placed(&self) -> impl Iterator<Item = (PersonId, &'a Cell)> + 'a {
        let grid = self.grid;
        self.positions.iter()
            .enumerate()
            .filter_map(move |(person, location)| Some((person, grid.get((*location)?)?)))
    }

    /// Placed people standing in `room`, ordered by person.
    pub fn people_in_room(&self, room: &'a str) -> impl Iterator<Item = PersonId> + 'a {
        self.placed().filter(move |(_, cell)| cell.room() == room).map(|(person, _)| person)
    }

    /// Placed people whose cell holds `kind`, ordered by person.
    pub fn people_on_object(&self, kind: ObjectKind) -> impl Iterator<Item = PersonId> + 'a {
        self.placed().filter(move |(_, cell)| cell.has_object(kind)).map(|(person, _)| person)
    }
}
