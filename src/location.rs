use std::fmt::{Display, Formatter};

use ndarray::Ix;
use strum::VariantArray;

pub(crate) type Coord = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a grid. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row of this location.
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column of this location.
    pub fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    // wrapping: stepping off the top or left edge yields a huge coordinate, which is then out of bounds
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    /// Chess-like notation: column letter then row number, e.g. `B3` for `Location(3, 1)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match u8::try_from(self.1).ok().filter(|c| *c < 26) {
            Some(c) => write!(f, "{}{}", (b'A' + c) as char, self.0),
            None => write!(f, "({}, {})", self.0, self.1),
        }
    }
}

/// The four orthogonal directions, declared in clockwise order.
///
/// Two directions are "sequential" when one is the [`clockwise`](Step::clockwise) turn of the other,
/// i.e. they meet at a right angle.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Step {
    /// Towards row 0.
    Up,
    /// Towards higher columns.
    Right,
    /// Towards higher rows.
    Down,
    /// Towards column 0.
    Left,
}

impl Step {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie outside any grid; callers check bounds.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((0, 1)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
        }
    }

    /// The next direction in clockwise order.
    pub fn clockwise(&self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Get all neighbors of a [`Location`] in "theory", by attempting every step direction.
    pub fn neighbors_of(location: Location) -> impl Iterator<Item = (Self, Location)> {
        Self::VARIANTS.iter().map(move |dir| (*dir, dir.attempt_from(location)))
    }
}
