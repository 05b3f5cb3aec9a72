use std::collections::BTreeSet;

use crate::location::Location;
use crate::object::ObjectKind;

/// Room identifier given to cells the puzzle definition leaves out.
pub const VOID_ROOM: &str = "__void__";

/// One square of the grid. Immutable once the grid is built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub(crate) location: Location,
    pub(crate) room: String,
    pub(crate) contents: BTreeSet<ObjectKind>,
    pub(crate) void: bool,
}

impl Cell {
    pub(crate) fn new(location: Location, room: impl Into<String>, contents: impl IntoIterator<Item = ObjectKind>) -> Self {
        Self {
            location,
            room: room.into(),
            contents: contents.into_iter().collect(),
            void: false,
        }
    }

    pub(crate) fn void(location: Location) -> Self {
        Self {
            location,
            room: VOID_ROOM.to_owned(),
            contents: BTreeSet::new(),
            void: true,
        }
    }

    /// Where this cell sits on the grid.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Shorthand for the row of [`location`](Self::location).
    pub fn row(&self) -> usize {
        self.location.row()
    }

    /// Shorthand for the column of [`location`](Self::location).
    pub fn col(&self) -> usize {
        self.location.col()
    }

    /// The room this cell belongs to; [`VOID_ROOM`] for void cells.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Objects on this cell, ordered as [`ObjectKind`] declares them.
    pub fn contents(&self) -> &BTreeSet<ObjectKind> {
        &self.contents
    }

    /// Whether this cell holds `kind`.
    pub fn has_object(&self, kind: ObjectKind) -> bool {
        self.contents.contains(&kind)
    }

    /// Whether this cell was synthesized to fill a hole in the puzzle definition.
    pub fn is_void(&self) -> bool {
        self.void
    }

    /// True if no person may stand here: the cell is void or holds a blocking object.
    pub fn is_blocked(&self) -> bool {
        self.void || self.contents.iter().any(|kind| kind.blocks())
    }
}
