//! Table of clue constructors keyed by the `type` tag used in puzzle files.
//!
//! Adding a clue type means adding a [`Clue`] variant and one entry in [`CLUE_REGISTRY`].

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use itertools::Itertools;
use serde::Deserialize;

use crate::clue::Clue;
use crate::object::ObjectKind;
use crate::placement::PersonId;

/// A clue as written in a puzzle file, before names are resolved.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ClueSpec {
    /// Type tag, a key of [`CLUE_REGISTRY`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Name of the constrained person.
    pub person: Option<String>,
    /// Name of the second person, or of the object for `left_of`.
    pub target: Option<String>,
    /// Object name, matched case-insensitively.
    pub object: Option<String>,
    /// Room identifier.
    pub room: Option<String>,
    /// Zero-based column index.
    pub column: Option<usize>,
    /// Negates clues that support it.
    #[serde(default)]
    pub invert: bool,
    /// For column clues: the object must lie in another room.
    #[serde(default)]
    pub different_room: bool,
}

/// Reasons a [`ClueSpec`] cannot be turned into a [`Clue`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ClueError {
    /// No constructor is registered for the tag.
    #[error("unknown clue type {kind:?}; valid types: {}", valid.join(", "))]
    UnknownType {
        /// The tag given.
        kind: String,
        /// Every registered tag, sorted.
        valid: Vec<&'static str>,
    },
    /// A field this clue type needs is absent.
    #[error("{kind} clue is missing field {field:?}")]
    MissingField {
        /// The clue's tag.
        kind: String,
        /// The absent field.
        field: &'static str,
    },
    /// An object name matched no [`ObjectKind`].
    #[error("unknown object {name:?}; valid objects: {}", valid.join(", "))]
    UnknownObject {
        /// The name given.
        name: String,
        /// Every object name.
        valid: Vec<&'static str>,
    },
    /// A person name is not in the roster.
    #[error("{kind} clue names unknown person {name:?}")]
    UnknownPerson {
        /// The clue's tag.
        kind: String,
        /// The name given.
        name: String,
    },
}

/// Resolves person names against the puzzle's ordered list of people.
#[derive(Clone, Copy, Debug)]
pub struct Roster<'a> {
    people: &'a [String],
}

impl<'a> Roster<'a> {
    /// A roster over `people`, whose order defines each [`PersonId`].
    pub fn new(people: &'a [String]) -> Self {
        Self { people }
    }

    /// The id of the person called `name`.
    pub fn person_id(&self, name: &str) -> Option<PersonId> {
        self.people.iter().position(|p| p == name)
    }
}

/// Pure constructor registered for one clue type tag.
pub type ClueBuilder = fn(&ClueSpec, &Roster<'_>) -> Result<Clue, ClueError>;

fn field<'s>(spec: &'s ClueSpec, value: &'s Option<String>, name: &'static str) -> Result<&'s str, ClueError> {
    value.as_deref().ok_or_else(|| ClueError::MissingField { kind: spec.kind.clone(), field: name })
}

fn person_field(spec: &ClueSpec, roster: &Roster<'_>, value: &Option<String>, name: &'static str) -> Result<PersonId, ClueError> {
    let person = field(spec, value, name)?;
    roster.person_id(person).ok_or_else(|| ClueError::UnknownPerson {
        kind: spec.kind.clone(),
        name: person.to_owned(),
    })
}

fn person(spec: &ClueSpec, roster: &Roster<'_>) -> Result<PersonId, ClueError> {
    person_field(spec, roster, &spec.person, "person")
}

fn target(spec: &ClueSpec, roster: &Roster<'_>) -> Result<PersonId, ClueError> {
    person_field(spec, roster, &spec.target, "target")
}

fn object_field(spec: &ClueSpec, value: &Option<String>, name: &'static str) -> Result<ObjectKind, ClueError> {
    let object = field(spec, value, name)?;
    ObjectKind::from_str(object).map_err(|_| ClueError::UnknownObject {
        name: object.to_owned(),
        valid: ObjectKind::names(),
    })
}

fn object(spec: &ClueSpec) -> Result<ObjectKind, ClueError> {
    object_field(spec, &spec.object, "object")
}

fn room(spec: &ClueSpec) -> Result<String, ClueError> {
    field(spec, &spec.room, "room").map(str::to_owned)
}

fn with_person(s: &ClueSpec, r: &Roster<'_>) -> Result<Clue, ClueError> {
    Ok(Clue::WithPerson { person: person(s, r)?, target: target(s, r)?, invert: s.invert })
}

fn in_corner(s: &ClueSpec, r: &Roster<'_>) -> Result<Clue, ClueError> {
    Ok(Clue::InCorner { person: person(s, r)? })
}

/// Every clue type tag and its constructor, including the `in_same_room_as_person` and `at_corner` aliases.
pub static CLUE_REGISTRY: LazyLock<HashMap<&'static str, ClueBuilder>> = LazyLock::new(|| {
    let entries: [(&'static str, ClueBuilder); 18] = [
        ("in_room", |s, r| Ok(Clue::InRoom { person: person(s, r)?, room: room(s)? })),
        ("on_object", |s, r| Ok(Clue::OnObject { person: person(s, r)?, object: object(s)?, invert: s.invert })),
        ("only_on_object", |s, r| Ok(Clue::OnlyOnObject { person: person(s, r)?, object: object(s)? })),
        ("only_one_person_on", |s, _| Ok(Clue::OnlyOnePersonOn { object: object(s)? })),
        ("next_to_object", |s, r| Ok(Clue::NextToObject { person: person(s, r)?, object: object(s)?, invert: s.invert })),
        ("alone_with_murderer", |s, r| Ok(Clue::AloneWithMurderer { victim: person(s, r)? })),
        ("with_person", with_person),
        ("in_same_room_as_person", with_person),
        ("alone_in_room", |s, r| Ok(Clue::AloneInRoom { person: person(s, r)?, room: room(s)? })),
        ("only_with_person", |s, r| Ok(Clue::OnlyWithPerson { person: person(s, r)?, target: target(s, r)? })),
        ("in_corner", in_corner),
        ("at_corner", in_corner),
        ("not_next_to_wall", |s, r| Ok(Clue::NotNextToWall { person: person(s, r)? })),
        ("below_person", |s, r| Ok(Clue::BelowPerson { person: person(s, r)?, target: target(s, r)? })),
        ("above_person", |s, r| Ok(Clue::AbovePerson { person: person(s, r)?, target: target(s, r)? })),
        ("at_column", |s, r| {
            let column = s.column.ok_or_else(|| ClueError::MissingField { kind: s.kind.clone(), field: "column" })?;
            Ok(Clue::AtColumn { person: person(s, r)?, column })
        }),
        ("same_column_as_object", |s, r| {
            Ok(Clue::SameColumnAsObject { person: person(s, r)?, object: object(s)?, different_room: s.different_room })
        }),
        // the object for left_of is given in "target"
        ("left_of", |s, r| {
            Ok(Clue::LeftOf {
                person: person(s, r)?,
                object: object_field(s, &s.target, "target")?,
                different_room: s.different_room,
            })
        }),
    ];
    entries.into_iter().collect()
});

/// Sorted list of every registered clue type tag.
pub fn clue_types() -> Vec<&'static str> {
    CLUE_REGISTRY.keys().copied().sorted().collect()
}

/// Look up the constructor for `spec.kind` and run it.
pub fn build_clue(spec: &ClueSpec, roster: &Roster<'_>) -> Result<Clue, ClueError> {
    match CLUE_REGISTRY.get(spec.kind.as_str()) {
        Some(builder) => builder(spec, roster),
        None => Err(ClueError::UnknownType { kind: spec.kind.clone(), valid: clue_types() }),
    }
}
