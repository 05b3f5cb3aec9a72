use std::fmt::{Display, Formatter};

use strum::IntoStaticStr;

use crate::object::ObjectKind;
use crate::placement::{PersonId, View};

/// A declarative constraint over a placement.
///
/// Each variant carries its typed parameters, so pruning can recognise a clue by matching on it.
/// Evaluation is pure: the same clue on the same placement always gives the same answer.
#[derive(Clone, Debug, Eq, PartialEq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Clue {
    /// The person stands in `room`.
    InRoom {
        /// Who is constrained.
        person: PersonId,
        /// Room identifier.
        room: String,
    },
    /// The person's cell holds `object` (or does not, when `invert`).
    OnObject {
        /// Who is constrained.
        person: PersonId,
        /// The object looked for.
        object: ObjectKind,
        /// Negate the condition.
        invert: bool,
    },
    /// The person stands on `object` and nobody else does.
    OnlyOnObject {
        /// Who is constrained.
        person: PersonId,
        /// The object looked for.
        object: ObjectKind,
    },
    /// At most one person stands on `object`.
    OnlyOnePersonOn {
        /// The object looked for.
        object: ObjectKind,
    },
    /// A same-room orthogonal neighbor holds `object` (or none does, when `invert`).
    NextToObject {
        /// Who is constrained.
        person: PersonId,
        /// The object looked for.
        object: ObjectKind,
        /// Negate the condition.
        invert: bool,
    },
    /// The victim's room holds exactly two people.
    AloneWithMurderer {
        /// The murdered person.
        victim: PersonId,
    },
    /// The person shares a room with `target` (or does not, when `invert`).
    WithPerson {
        /// Who is constrained.
        person: PersonId,
        /// The other person.
        target: PersonId,
        /// Negate the condition.
        invert: bool,
    },
    /// The person is in `room` and nobody else is.
    AloneInRoom {
        /// Who is constrained.
        person: PersonId,
        /// Room identifier.
        room: String,
    },
    /// The person's room holds exactly the person and `target`.
    OnlyWithPerson {
        /// Who is constrained.
        person: PersonId,
        /// The only company allowed.
        target: PersonId,
    },
    /// The person stands in a room corner.
    InCorner {
        /// Who is constrained.
        person: PersonId,
    },
    /// No orthogonal direction from the person hits a wall or room boundary.
    NotNextToWall {
        /// Who is constrained.
        person: PersonId,
    },
    /// The person's row is greater than `target`'s.
    BelowPerson {
        /// Who is constrained.
        person: PersonId,
        /// The person somewhere above.
        target: PersonId,
    },
    /// The person's row is less than `target`'s.
    AbovePerson {
        /// Who is constrained.
        person: PersonId,
        /// The person somewhere below.
        target: PersonId,
    },
    /// The person stands in `column`.
    AtColumn {
        /// Who is constrained.
        person: PersonId,
        /// Zero-based column index.
        column: usize,
    },
    /// Some cell holding `object` shares the person's column; `different_room` says whether that cell
    /// must lie in another room than the person's, or in the same one.
    SameColumnAsObject {
        /// Who is constrained.
        person: PersonId,
        /// The object looked for.
        object: ObjectKind,
        /// Require the object's room to differ from the person's.
        different_room: bool,
    },
    /// Some cell holding `object` lies in a column right of the person; `different_room` as above.
    LeftOf {
        /// Who is constrained.
        person: PersonId,
        /// The object looked for.
        object: ObjectKind,
        /// Require the object's room to differ from the person's.
        different_room: bool,
    },
}

/// Which people must be placed before a clue can be decided.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope {
    /// Decidable once this person is placed.
    One(PersonId),
    /// Decidable once both people are placed.
    Two(PersonId, PersonId),
    /// Room or object occupancy clues look at everybody.
    Everyone,
}

impl Scope {
    /// Whether every person this scope names is placed in `view`.
    pub fn is_placed(&self, view: &View<'_>) -> bool {
        match *self {
            Scope::One(p) => view.is_placed(p),
            Scope::Two(p, q) => view.is_placed(p) && view.is_placed(q),
            Scope::Everyone => view.placed().count() == view.grid().rows(),
        }
    }
}

impl Clue {
    /// The snake_case type tag of this clue, e.g. `"at_column"`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Who must be placed before [`holds`](Self::holds) gives a final answer.
    pub fn scope(&self) -> Scope {
        match *self {
            Clue::InRoom { person, .. }
            | Clue::OnObject { person, .. }
            | Clue::NextToObject { person, .. }
            | Clue::InCorner { person }
            | Clue::NotNextToWall { person }
            | Clue::AtColumn { person, .. }
            | Clue::SameColumnAsObject { person, .. }
            | Clue::LeftOf { person, .. } => Scope::One(person),
            Clue::WithPerson { person, target, .. }
            | Clue::BelowPerson { person, target }
            | Clue::AbovePerson { person, target } => Scope::Two(person, target),
            Clue::OnlyOnObject { .. }
            | Clue::OnlyOnePersonOn { .. }
            | Clue::AloneWithMurderer { .. }
            | Clue::AloneInRoom { .. }
            | Clue::OnlyWithPerson { .. } => Scope::Everyone,
        }
    }

    /// Every person this clue refers to by name.
    pub fn people(&self) -> Vec<PersonId> {
        match *self {
            Clue::InRoom { person, .. }
            | Clue::OnObject { person, .. }
            | Clue::OnlyOnObject { person, .. }
            | Clue::NextToObject { person, .. }
            | Clue::AloneInRoom { person, .. }
            | Clue::InCorner { person }
            | Clue::NotNextToWall { person }
            | Clue::AtColumn { person, .. }
            | Clue::SameColumnAsObject { person, .. }
            | Clue::LeftOf { person, .. } => vec![person],
            Clue::AloneWithMurderer { victim } => vec![victim],
            Clue::WithPerson { person, target, .. }
            | Clue::OnlyWithPerson { person, target }
            | Clue::BelowPerson { person, target }
            | Clue::AbovePerson { person, target } => vec![person, target],
            Clue::OnlyOnePersonOn { .. } => vec![],
        }
    }

    /// Evaluate this clue against `view`.
    ///
    /// Callers must only pass views in which [`scope`](Self::scope) is placed; a missing person makes the clue fail.
    pub fn holds(&self, view: &View<'_>) -> bool {
        let grid = view.grid();
        match self {
            Clue::InRoom { person, room } => view.room_of(*person) == Some(room.as_str()),
            Clue::OnObject { person, object, invert } => match view.cell_of(*person) {
                Some(cell) => cell.has_object(*object) != *invert,
                None => false,
            },
            Clue::OnlyOnObject { person, object } => {
                view.people_on_object(*object).eq(std::iter::once(*person))
            }
            Clue::OnlyOnePersonOn { object } => view.people_on_object(*object).nth(1).is_none(),
            Clue::NextToObject { person, object, invert } => match view.cell_of(*person) {
                Some(cell) => grid.neighbors(cell).any(|n| n.has_object(*object)) != *invert,
                None => false,
            },
            Clue::AloneWithMurderer { victim } => match view.room_of(*victim) {
                Some(room) => view.people_in_room(room).count() == 2,
                None => false,
            },
            Clue::WithPerson { person, target, invert } => {
                match (view.room_of(*person), view.room_of(*target)) {
                    (Some(a), Some(b)) => (a == b) != *invert,
                    _ => false,
                }
            }
            Clue::AloneInRoom { person, room } => {
                view.room_of(*person) == Some(room.as_str())
                    && view.people_in_room(room).eq(std::iter::once(*person))
            }
            Clue::OnlyWithPerson { person, target } => match view.room_of(*person) {
                Some(room) => {
                    let mut expected = vec![*person, *target];
                    expected.sort_unstable();
                    expected.dedup();
                    view.people_in_room(room).eq(expected)
                }
                None => false,
            },
            Clue::InCorner { person } => view.cell_of(*person).is_some_and(|cell| grid.is_corner(cell)),
            Clue::NotNextToWall { person } => view.cell_of(*person).is_some_and(|cell| !grid.is_on_edge(cell)),
            Clue::BelowPerson { person, target } => {
                match (view.position_of(*person), view.position_of(*target)) {
                    (Some(p), Some(t)) => p.row() > t.row(),
                    _ => false,
                }
            }
            Clue::AbovePerson { person, target } => {
                match (view.position_of(*person), view.position_of(*target)) {
                    (Some(p), Some(t)) => p.row() < t.row(),
                    _ => false,
                }
            }
            Clue::AtColumn { person, column } => view.position_of(*person).is_some_and(|p| p.col() == *column),
            Clue::SameColumnAsObject { person, object, different_room } => match view.cell_of(*person) {
                Some(cell) => grid.cells_with_object(*object)
                    .any(|other| other.col() == cell.col() && (other.room() != cell.room()) == *different_room),
                None => false,
            },
            Clue::LeftOf { person, object, different_room } => match view.cell_of(*person) {
                Some(cell) => grid.cells_with_object(*object)
                    .any(|other| cell.col() < other.col() && (other.room() != cell.room()) == *different_room),
                None => false,
            },
        }
    }
}

impl Display for Clue {
    /// The clue's identity: its type tag and canonical parameters, e.g. `at_column(2, 0)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let tag = self.kind();
        match self {
            Clue::InRoom { person, room } | Clue::AloneInRoom { person, room } => write!(f, "{tag}({person}, {room:?})"),
            Clue::OnObject { person, object, invert } | Clue::NextToObject { person, object, invert } => {
                write!(f, "{}{tag}({person}, {object})", if *invert { "not_" } else { "" })
            }
            Clue::OnlyOnObject { person, object } => write!(f, "{tag}({person}, {object})"),
            Clue::OnlyOnePersonOn { object } => write!(f, "{tag}({object})"),
            Clue::AloneWithMurderer { victim } => write!(f, "{tag}({victim})"),
            Clue::WithPerson { person, target, invert } => {
                write!(f, "{}{tag}({person}, {target})", if *invert { "not_" } else { "" })
            }
            Clue::OnlyWithPerson { person, target }
            | Clue::BelowPerson { person, target }
            | Clue::AbovePerson { person, target } => write!(f, "{tag}({person}, {target})"),
            Clue::InCorner { person } | Clue::NotNextToWall { person } => write!(f, "{tag}({person})"),
            Clue::AtColumn { person, column } => write!(f, "{tag}({person}, {column})"),
            Clue::SameColumnAsObject { person, object, different_room }
            | Clue::LeftOf { person, object, different_room } => {
                write!(f, "{tag}({person}, {object}, {})", if *different_room { "diff_room" } else { "same_room" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::GridBuilder;
    use crate::grid::Grid;
    use crate::location::Location;
    use crate::placement::Placement;

    use super::*;

    const ALICE: PersonId = 0;
    const BOB: PersonId = 1;

    // 2x2, rooms "top" (row 0) and "bot" (row 1); window at (0, 0), bed at (1, 1)
    fn two_rooms() -> Grid {
        GridBuilder::with_dims(2, 2)
            .add_cell(Location(0, 0), "top", [ObjectKind::Window])
            .add_cell(Location(0, 1), "top", [])
            .add_cell(Location(1, 0), "bot", [])
            .add_cell(Location(1, 1), "bot", [ObjectKind::Bed])
            .build()
            .unwrap()
    }

    // Alice at (0, 0), Bob at (1, 1)
    fn check(grid: &Grid, clue: Clue) -> bool {
        let placement = Placement::new(grid, vec![ALICE, BOB], vec![0, 1]).unwrap();
        clue.holds(&placement.view(grid))
    }

    #[test]
    fn in_room() {
        let grid = two_rooms();
        assert!(check(&grid, Clue::InRoom { person: ALICE, room: "top".into() }));
        assert!(!check(&grid, Clue::InRoom { person: ALICE, room: "bot".into() }));
    }

    #[test]
    fn on_object_and_inverted() {
        let grid = two_rooms();
        assert!(check(&grid, Clue::OnObject { person: ALICE, object: ObjectKind::Window, invert: false }));
        assert!(!check(&grid, Clue::OnObject { person: ALICE, object: ObjectKind::Bed, invert: false }));
        assert!(!check(&grid, Clue::OnObject { person: ALICE, object: ObjectKind::Window, invert: true }));
        assert!(check(&grid, Clue::OnObject { person: ALICE, object: ObjectKind::Bed, invert: true }));
    }

    #[test]
    fn only_on_object() {
        let grid = two_rooms();
        assert!(check(&grid, Clue::OnlyOnObject { person: BOB, object: ObjectKind::Bed }));
        assert!(!check(&grid, Clue::OnlyOnObject { person: ALICE, object: ObjectKind::Bed }));
    }

    #[test]
    fn only_one_person_on() {
        let grid = GridBuilder::with_dims(2, 2)
            .add_cell(Location(0, 0), "r", [ObjectKind::Carpet])
            .add_cell(Location(0, 1), "r", [])
            .add_cell(Location(1, 0), "r", [])
            .add_cell(Location(1, 1), "r", [ObjectKind::Carpet])
            .build()
            .unwrap();
        assert!(!check(&grid, Clue::OnlyOnePersonOn { object: ObjectKind::Carpet }));
        assert!(check(&grid, Clue::OnlyOnePersonOn { object: ObjectKind::Window }));
        let placement = Placement::new(&grid, vec![ALICE, BOB], vec![1, 0]).unwrap();
        assert!(Clue::OnlyOnePersonOn { object: ObjectKind::Carpet }.holds(&placement.view(&grid)));
    }

    #[test]
    fn next_to_object_is_room_scoped() {
        let grid = two_rooms();
        // the bed is diagonal to Alice
        assert!(!check(&grid, Clue::NextToObject { person: ALICE, object: ObjectKind::Bed, invert: false }));
        assert!(check(&grid, Clue::NextToObject { person: ALICE, object: ObjectKind::Bed, invert: true }));

        let grid = GridBuilder::with_dims(2, 2)
            .add_cell(Location(0, 0), "r", [])
            .add_cell(Location(0, 1), "r", [ObjectKind::Bed])
            .add_cell(Location(1, 0), "other", [ObjectKind::Plant])
            .add_cell(Location(1, 1), "r", [])
            .build()
            .unwrap();
        assert!(check(&grid, Clue::NextToObject { person: ALICE, object: ObjectKind::Bed, invert: false }));
        // the plant is adjacent but across a room boundary
        assert!(!check(&grid, Clue::NextToObject { person: ALICE, object: ObjectKind::Plant, invert: false }));
    }

    #[test]
    fn alone_with_murderer() {
        let grid = GridBuilder::with_dims(2, 2)
            .add_cell(Location(0, 0), "same", [])
            .add_cell(Location(0, 1), "same", [])
            .add_cell(Location(1, 0), "other", [])
            .add_cell(Location(1, 1), "same", [])
            .build()
            .unwrap();
        assert!(check(&grid, Clue::AloneWithMurderer { victim: ALICE }));
        assert!(!check(&two_rooms(), Clue::AloneWithMurderer { victim: ALICE }));
    }

    #[test]
    fn with_person_and_inverted() {
        let grid = two_rooms();
        assert!(!check(&grid, Clue::WithPerson { person: ALICE, target: BOB, invert: false }));
        assert!(check(&grid, Clue::WithPerson { person: ALICE, target: BOB, invert: true }));
    }

    #[test]
    fn alone_in_room() {
        let grid = two_rooms();
        assert!(check(&grid, Clue::AloneInRoom { person: ALICE, room: "top".into() }));
        assert!(!check(&grid, Clue::AloneInRoom { person: ALICE, room: "bot".into() }));
    }

    #[test]
    fn only_with_person() {
        let grid = GridBuilder::with_dims(2, 2)
            .add_cell(Location(0, 0), "r", [])
            .add_cell(Location(0, 1), "r", [])
            .add_cell(Location(1, 0), "r", [])
            .add_cell(Location(1, 1), "r", [])
            .build()
            .unwrap();
        assert!(check(&grid, Clue::OnlyWithPerson { person: ALICE, target: BOB }));
        assert!(!check(&two_rooms(), Clue::OnlyWithPerson { person: ALICE, target: BOB }));
    }

    #[test]
    fn corners_and_walls() {
        let grid = two_rooms();
        assert!(check(&grid, Clue::InCorner { person: ALICE }));
        assert!(!check(&grid, Clue::NotNextToWall { person: ALICE }));
    }

    #[test]
    fn relative_rows() {
        let grid = two_rooms();
        assert!(check(&grid, Clue::BelowPerson { person: BOB, target: ALICE }));
        assert!(!check(&grid, Clue::BelowPerson { person: ALICE, target: BOB }));
        assert!(check(&grid, Clue::AbovePerson { person: ALICE, target: BOB }));
        assert!(!check(&grid, Clue::AbovePerson { person: BOB, target: ALICE }));
    }

    #[test]
    fn at_column() {
        let grid = two_rooms();
        assert!(check(&grid, Clue::AtColumn { person: BOB, column: 1 }));
        assert!(!check(&grid, Clue::AtColumn { person: BOB, column: 0 }));
    }

    #[test]
    fn same_column_as_object() {
        let grid = two_rooms();
        // the window sits in Alice's column and room
        assert!(check(&grid, Clue::SameColumnAsObject { person: ALICE, object: ObjectKind::Window, different_room: false }));
        assert!(!check(&grid, Clue::SameColumnAsObject { person: ALICE, object: ObjectKind::Window, different_room: true }));
        // the bed is in column 1, Alice in column 0
        assert!(!check(&grid, Clue::SameColumnAsObject { person: ALICE, object: ObjectKind::Bed, different_room: true }));
    }

    #[test]
    fn left_of() {
        let grid = two_rooms();
        // the bed at (1, 1) is right of Alice and in another room
        assert!(check(&grid, Clue::LeftOf { person: ALICE, object: ObjectKind::Bed, different_room: true }));
        assert!(!check(&grid, Clue::LeftOf { person: ALICE, object: ObjectKind::Bed, different_room: false }));
        assert!(!check(&grid, Clue::LeftOf { person: BOB, object: ObjectKind::Window, different_room: true }));
    }

    #[test]
    fn identity_strings() {
        assert_eq!(Clue::AtColumn { person: 2, column: 0 }.to_string(), "at_column(2, 0)");
        assert_eq!(
            Clue::OnObject { person: 1, object: ObjectKind::CashRegister, invert: true }.to_string(),
            "not_on_object(1, cash_register)"
        );
        assert_eq!(Clue::BelowPerson { person: 0, target: 1 }.kind(), "below_person");
    }

    #[test]
    fn scopes() {
        assert_eq!(Clue::InCorner { person: 3 }.scope(), Scope::One(3));
        assert_eq!(Clue::AbovePerson { person: 0, target: 2 }.scope(), Scope::Two(0, 2));
        assert_eq!(Clue::AloneWithMurderer { victim: 1 }.scope(), Scope::Everyone);
    }
}
