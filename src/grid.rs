use ndarray::Array2;
use strum::VariantArray;

use crate::cell::Cell;
use crate::location::{Location, Step};
use crate::object::ObjectKind;

/// An immutable rectangular board of [`Cell`]s.
///
/// Every coordinate in `[0, rows) × [0, cols)` holds exactly one cell, either defined by the puzzle or synthesized as void.
/// [`Grid`]s should be built using a [`GridBuilder`](crate::builder::GridBuilder).
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) cells: Array2<Cell>,
}

impl Grid {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// The cell at `location`, or `None` if it lies outside the grid.
    pub fn get(&self, location: Location) -> Option<&Cell> {
        self.cells.get(location.as_index())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Cells a person may stand on. Each call restarts from the top left.
    pub fn valid_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells().filter(|cell| !cell.is_blocked())
    }

    /// Cells holding at least one `kind`, blocked or not.
    pub fn cells_with_object(&self, kind: ObjectKind) -> impl Iterator<Item = &Cell> + '_ {
        self.cells().filter(move |cell| cell.has_object(kind))
    }

    /// Cells whose room is `room`.
    pub fn cells_in_room<'a>(&'a self, room: &'a str) -> impl Iterator<Item = &'a Cell> + 'a {
        self.cells().filter(move |cell| cell.room == room)
    }

    /// Orthogonal neighbors of `cell` that share its room.
    pub fn neighbors<'a>(&'a self, cell: &'a Cell) -> impl Iterator<Item = &'a Cell> + 'a {
        Step::neighbors_of(cell.location)
            .filter_map(|(_, location)| self.get(location))
            .filter(|neighbor| neighbor.room == cell.room)
    }

    /// A room wall lies in direction `step` from `cell`: the step leaves the grid or enters another room.
    fn is_wall(&self, cell: &Cell, step: Step) -> bool {
        match self.get(step.attempt_from(cell.location)) {
            None => true,
            Some(other) => other.room != cell.room,
        }
    }

    /// True iff two sequential (right-angled) directions from `cell` both hit a wall.
    ///
    /// Opposite walls alone, as in the middle of a one-cell-wide corridor, do not make a corner.
    pub fn is_corner(&self, cell: &Cell) -> bool {
        Step::VARIANTS.iter()
            .any(|step| self.is_wall(cell, *step) && self.is_wall(cell, step.clockwise()))
    }

    /// True iff at least one orthogonal direction from `cell` hits a wall.
    pub fn is_on_edge(&self, cell: &Cell) -> bool {
        Step::VARIANTS.iter().any(|step| self.is_wall(cell, *step))
    }
}
