use std::fmt::{Display, Formatter};

use crate::placement::{PersonId, Placement};
use crate::puzzle::Puzzle;

/// Failures surfaced by a solve call. Not finding a single answer is a [`Solution`], not an error.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// Exactly one placement was accepted, but the victim's room does not hold exactly one other person.
    #[error("accepted placement {placement} leaves {occupants} people besides the victim in room {room:?}")]
    InternalInconsistency {
        /// The single accepted placement.
        placement: Placement,
        /// The victim's room.
        room: String,
        /// People in that room other than the victim.
        occupants: usize,
    },
}

/// One of several accepted placements, with its murderer when one can be derived.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    /// An accepted placement.
    pub placement: Placement,
    /// The victim's only roommate in this placement, if there is exactly one.
    pub murderer: Option<PersonId>,
}

/// The outcome of a solve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {
    /// Exactly one placement was accepted.
    Unique {
        /// The accepted placement.
        placement: Placement,
        /// The victim's only roommate.
        murderer: PersonId,
    },
    /// No placement satisfies every clue.
    NoSolution,
    /// More than one placement was accepted, even if they all agree on the murderer.
    Ambiguous {
        /// Every accepted placement, sorted.
        candidates: Vec<Candidate>,
    },
}

impl Solution {
    /// Whether exactly one placement was accepted.
    pub fn is_unique(&self) -> bool {
        matches!(self, Solution::Unique { .. })
    }

    /// The murderer of a unique solution.
    pub fn murderer(&self) -> Option<PersonId> {
        match self {
            Solution::Unique { murderer, .. } => Some(*murderer),
            _ => None,
        }
    }

    /// The placement of a unique solution.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Solution::Unique { placement, .. } => Some(placement),
            _ => None,
        }
    }

    /// Every accepted placement behind this outcome.
    pub fn placements(&self) -> Vec<&Placement> {
        match self {
            Solution::Unique { placement, .. } => vec![placement],
            Solution::NoSolution => vec![],
            Solution::Ambiguous { candidates } => candidates.iter().map(|c| &c.placement).collect(),
        }
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Solution::Unique { placement, murderer } => write!(f, "unique: murderer {murderer} in {placement}"),
            Solution::NoSolution => write!(f, "no solution"),
            Solution::Ambiguous { candidates } => write!(f, "ambiguous: {} candidates", candidates.len()),
        }
    }
}

/// The single non-victim sharing the victim's room in `placement`.
///
/// Fails with [`SolveError::InternalInconsistency`] when that room holds anything but exactly one other person.
pub fn murderer_of(puzzle: &Puzzle, placement: &Placement) -> Result<PersonId, SolveError> {
    let victim = puzzle.victim();
    let room = placement.room_of(puzzle.grid(), victim).unwrap_or_default();
    let others: Vec<PersonId> = placement.people_in_room(puzzle.grid(), room)
        .into_iter()
        .filter(|p| *p != victim)
        .collect();

    match others.as_slice() {
        [murderer] => Ok(*murderer),
        _ => Err(SolveError::InternalInconsistency {
            placement: placement.clone(),
            room: room.to_owned(),
            occupants: others.len(),
        }),
    }
}

/// Turn the accepted placements of a search into an outcome.
pub fn resolve(puzzle: &Puzzle, mut accepted: Vec<Placement>) -> Result<Solution, SolveError> {
    match accepted.len() {
        0 => Ok(Solution::NoSolution),
        1 => {
            let placement = accepted.remove(0);
            let murderer = murderer_of(puzzle, &placement)?;
            Ok(Solution::Unique { placement, murderer })
        }
        _ => {
            accepted.sort();
            let candidates = accepted.into_iter()
                .map(|placement| Candidate { murderer: murderer_of(puzzle, &placement).ok(), placement })
                .collect();
            Ok(Solution::Ambiguous { candidates })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::GridBuilder;
    use crate::grid::Grid;
    use crate::location::Location;

    use super::*;

    // rooms: "den" = (0, 0), (0, 1), (1, 0); "nook" = (1, 1)
    fn grid() -> Grid {
        GridBuilder::with_dims(2, 2)
            .add_cell(Location(0, 0), "den", [])
            .add_cell(Location(0, 1), "den", [])
            .add_cell(Location(1, 0), "den", [])
            .add_cell(Location(1, 1), "nook", [])
            .build()
            .unwrap()
    }

    fn puzzle() -> Puzzle {
        Puzzle::new(grid(), vec!["Ann".to_owned(), "Ben".to_owned()], "Ben", vec![]).unwrap()
    }

    #[test]
    fn no_placements_means_no_solution() {
        assert_eq!(resolve(&puzzle(), vec![]), Ok(Solution::NoSolution));
    }

    #[test]
    fn single_placement_names_the_murderer() {
        let puzzle = puzzle();
        // Ann at (0, 1), Ben at (1, 0): both in the den
        let placement = Placement::new(puzzle.grid(), vec![0, 1], vec![1, 0]).unwrap();
        let solution = resolve(&puzzle, vec![placement.clone()]).unwrap();
        assert_eq!(solution, Solution::Unique { placement, murderer: 0 });
        assert_eq!(solution.murderer(), Some(0));
        assert!(solution.is_unique());
    }

    #[test]
    fn single_placement_without_company_is_inconsistent() {
        let puzzle = puzzle();
        // Ben alone in the nook
        let placement = Placement::new(puzzle.grid(), vec![0, 1], vec![0, 1]).unwrap();
        assert!(matches!(
            resolve(&puzzle, vec![placement]),
            Err(SolveError::InternalInconsistency { occupants: 0, .. })
        ));
    }

    #[test]
    fn several_placements_are_ambiguous() {
        let puzzle = puzzle();
        let lonely = Placement::new(puzzle.grid(), vec![0, 1], vec![0, 1]).unwrap();
        let shared = Placement::new(puzzle.grid(), vec![0, 1], vec![1, 0]).unwrap();
        let solution = resolve(&puzzle, vec![shared.clone(), lonely.clone()]).unwrap();

        let Solution::Ambiguous { candidates } = &solution else {
            panic!("expected an ambiguous outcome, got {solution}");
        };
        assert_eq!(candidates, &vec![
            Candidate { placement: lonely, murderer: None },
            Candidate { placement: shared, murderer: Some(0) },
        ]);
        assert_eq!(solution.placements().len(), 2);
        assert_eq!(solution.murderer(), None);
    }
}
