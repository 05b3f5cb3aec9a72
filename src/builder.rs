use std::mem::size_of;

use ndarray::Array2;

use crate::cell::Cell;
use crate::grid::Grid;
use crate::location::Location;
use crate::object::ObjectKind;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A grid needs at least one row and one column.
    ZeroDimension,
    /// The dimensions describe more cells than can be allocated.
    TooLarge,
    /// A cell was inserted outside the bounds specified on the builder.
    CellOutOfBounds(Location),
    /// A cell was inserted twice at the same location.
    DuplicateCell(Location),
}

/// A builder for [`Grid`]s.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Any location never given a cell becomes a void cell when built.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    // rows, cols
    dims: (usize, usize),
    cells: Array2<Option<Cell>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl GridBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(rows, cols)` order.
    pub fn with_dims(rows: usize, cols: usize) -> Self {
        let mut invalid_reasons = Vec::new();
        if rows == 0 || cols == 0 {
            invalid_reasons.push(BuilderInvalidReason::ZeroDimension);
        }
        let fits = rows.checked_mul(cols)
            .and_then(|n| n.checked_mul(size_of::<Option<Cell>>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            invalid_reasons.push(BuilderInvalidReason::TooLarge);
        }

        Self {
            dims: (rows, cols),
            cells: Array2::from_elem(if fits { (rows, cols) } else { (0, 0) }, None),
            invalid_reasons,
        }
    }

    /// Define the cell at `location` as part of `room`, holding `contents`.
    ///
    /// May cause the builder to enter a [`CellOutOfBounds`](BuilderInvalidReason::CellOutOfBounds) or
    /// [`DuplicateCell`](BuilderInvalidReason::DuplicateCell) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_cell(
        &mut self,
        location: Location,
        room: impl Into<String>,
        contents: impl IntoIterator<Item = ObjectKind>,
    ) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.cells.get_mut(location.as_index()) {
            None => self.invalid_reasons.push(BuilderInvalidReason::CellOutOfBounds(location)),
            Some(Some(_)) => self.invalid_reasons.push(BuilderInvalidReason::DuplicateCell(location)),
            Some(slot) => *slot = Some(Cell::new(location, room, contents)),
        }

        self
    }

    /// The dimensions given at construction, in `(rows, cols)` order.
    pub fn dims(&self) -> (usize, usize) {
        self.dims
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Grid`], filling undefined locations with void cells.
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Grid, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let cells = Array2::from_shape_fn(self.cells.raw_dim(), |index| {
            self.cells[index].clone().unwrap_or_else(|| Cell::void(Location::from(index)))
        });

        Ok(Grid { cells })
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::VOID_ROOM;

    use super::*;

    #[test]
    fn undefined_cells_become_void() {
        let grid = GridBuilder::with_dims(2, 3)
            .add_cell(Location(0, 0), "den", [])
            .build()
            .unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.cells().count(), 6);
        let hole = grid.get(Location(1, 2)).unwrap();
        assert_eq!(hole.room(), VOID_ROOM);
        assert!(hole.is_blocked());
        assert_eq!(hole.location(), Location(1, 2));
        assert_eq!(grid.valid_cells().count(), 1);
    }

    #[test]
    fn out_of_bounds_invalidates() {
        let mut builder = GridBuilder::with_dims(2, 2);
        builder.add_cell(Location(2, 0), "den", []);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::CellOutOfBounds(Location(2, 0))]));
        // later calls are ignored once invalid
        builder.add_cell(Location(0, 0), "den", []);
        assert_eq!(builder.build().unwrap_err().len(), 1);
    }

    #[test]
    fn duplicates_invalidate() {
        let mut builder = GridBuilder::with_dims(1, 1);
        builder
            .add_cell(Location(0, 0), "den", [])
            .add_cell(Location(0, 0), "hall", []);
        assert_eq!(builder.build().unwrap_err(), &vec![BuilderInvalidReason::DuplicateCell(Location(0, 0))]);
    }

    #[test]
    fn oversized_dims_are_invalid() {
        let mut builder = GridBuilder::with_dims(usize::MAX / 2, 4);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::TooLarge]));
        builder.add_cell(Location(0, 0), "den", []);
        assert_eq!(builder.build().unwrap_err(), &vec![BuilderInvalidReason::TooLarge]);
        assert_eq!(builder.dims(), (usize::MAX / 2, 4));
    }

    #[test]
    fn zero_dimension_is_invalid() {
        assert_eq!(GridBuilder::with_dims(0, 3).is_valid(), Some(&vec![BuilderInvalidReason::ZeroDimension]));
    }
}
