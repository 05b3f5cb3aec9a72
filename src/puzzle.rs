use itertools::Itertools;
use ndarray::Array2;

use crate::clue::Clue;
use crate::grid::Grid;
use crate::placement::{PersonId, Placement};

/// Structural problems that make a puzzle unsolvable before any search starts.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PuzzleError {
    /// The people list is empty.
    #[error("a puzzle needs at least one person")]
    NoPeople,
    /// The grid is not square with one row per person.
    #[error("{people} people cannot fill a {rows}x{cols} grid one per row and column")]
    SizeMismatch {
        /// Number of people.
        people: usize,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },
    /// Two people share a name.
    #[error("person {0:?} is listed more than once")]
    DuplicatePerson(String),
    /// The victim's name matches nobody.
    #[error("victim {0:?} is not among the people")]
    UnknownVictim(String),
    /// A clue names a person id past the end of the people list.
    #[error("clue #{index} ({clue}) refers to person #{person}, but there are only {people} people")]
    ClueOutOfRange {
        /// Position of the clue in the list.
        index: usize,
        /// The clue, displayed.
        clue: String,
        /// The offending id.
        person: PersonId,
        /// Number of people.
        people: usize,
    },
}

/// An immutable puzzle: the grid, the people, who was murdered, and the clues that must all hold.
#[derive(Clone, Debug)]
pub struct Puzzle {
    grid: Grid,
    people: Vec<String>,
    victim: PersonId,
    clues: Vec<Clue>,
}

impl Puzzle {
    /// Assemble a puzzle, checking that `people.len() == rows == cols`, names are unique,
    /// the victim is one of the people, and every clue refers to existing people.
    pub fn new(grid: Grid, people: Vec<String>, victim: &str, clues: Vec<Clue>) -> Result<Self, PuzzleError> {
        if people.is_empty() {
            return Err(PuzzleError::NoPeople);
        }
        if people.len() != grid.rows() || people.len() != grid.cols() {
            return Err(PuzzleError::SizeMismatch { people: people.len(), rows: grid.rows(), cols: grid.cols() });
        }
        if let Some(duplicate) = people.iter().duplicates().next() {
            return Err(PuzzleError::DuplicatePerson(duplicate.clone()));
        }
        let victim = people.iter()
            .position(|p| p == victim)
            .ok_or_else(|| PuzzleError::UnknownVictim(victim.to_owned()))?;
        for (index, clue) in clues.iter().enumerate() {
            if let Some(person) = clue.people().into_iter().find(|p| *p >= people.len()) {
                return Err(PuzzleError::ClueOutOfRange { index, clue: clue.to_string(), person, people: people.len() });
            }
        }

        Ok(Self { grid, people, victim, clues })
    }

    /// The floor plan.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Names, indexed by [`PersonId`].
    pub fn people(&self) -> &[String] {
        &self.people
    }

    /// Number of people, which is also the side length of the grid.
    pub fn size(&self) -> usize {
        self.people.len()
    }

    /// Who was murdered.
    pub fn victim(&self) -> PersonId {
        self.victim
    }

    /// Every clue, in the order given.
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// The id of the person called `name`.
    pub fn person_id(&self, name: &str) -> Option<PersonId> {
        self.people.iter().position(|p| p == name)
    }

    /// The name of `person`, or `None` for an unknown id.
    pub fn name_of(&self, person: PersonId) -> Option<&str> {
        self.people.get(person).map(String::as_str)
    }

    /// Draw `placement` as a character grid: each occupant's initial, `#` on blocked cells, `.` elsewhere.
    pub fn render(&self, placement: &Placement) -> String {
        let mut board: Array2<char> = self.grid.cells.map(|cell| if cell.is_blocked() { '#' } else { '.' });
        for (&person, location) in placement.row_order().iter().zip(placement.locations()) {
            if let Some(slot) = board.get_mut(location.as_index()) {
                *slot = self.name_of(person)
                    .and_then(|name| name.chars().next())
                    .unwrap_or('?')
                    .to_ascii_uppercase();
            }
        }

        let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));
        for row in board.rows() {
            for col in row {
                out.push(*col);
            }
            out.push('\n');
        }

        out
    }

    /// One line per person, sorted by name: position, room and cell contents.
    pub fn describe(&self, placement: &Placement) -> Vec<String> {
        self.people.iter()
            .enumerate()
            .sorted_by(|a, b| a.1.cmp(b.1))
            .filter_map(|(person, name)| {
                let location = placement.position_of(person)?;
                let cell = self.grid.get(location)?;
                let contents = if cell.contents().is_empty() {
                    "empty".to_owned()
                } else {
                    cell.contents().iter().join(", ")
                };
                Some(format!("{name:<10} {location}  room={}  ({contents})", cell.room()))
            })
            .collect()
    }
}
