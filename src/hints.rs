use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use crate::clue::Clue;
use crate::placement::PersonId;
use crate::puzzle::Puzzle;

/// What the column search may assign to one person.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnDomain {
    /// Unrestricted.
    Any,
    /// Only this column.
    Pinned(usize),
    /// Conflicting or out-of-range pins: no column works.
    Empty,
}

impl ColumnDomain {
    /// Whether `col` is in the domain.
    pub fn allows(&self, col: usize) -> bool {
        match self {
            ColumnDomain::Any => true,
            ColumnDomain::Pinned(pinned) => *pinned == col,
            ColumnDomain::Empty => false,
        }
    }

    fn restrict_to(self, col: usize, size: usize) -> Self {
        match self {
            _ if col >= size => ColumnDomain::Empty,
            ColumnDomain::Any => ColumnDomain::Pinned(col),
            ColumnDomain::Pinned(pinned) if pinned == col => self,
            _ => ColumnDomain::Empty,
        }
    }
}

/// Search-space restrictions read off recognisable clue shapes before the search starts.
///
/// `above_person` / `below_person` become row precedences between two people, `at_column` collapses a
/// person's column domain. Every other clue contributes nothing here and is only checked as a filter.
/// Hints never remove a placement the clues themselves would accept.
#[derive(Clone, Debug)]
pub struct PruningHints {
    // edge upper -> lower: `upper` must occupy a smaller row index than `lower`
    precedence: DiGraphMap<PersonId, ()>,
    columns: Vec<ColumnDomain>,
}

impl PruningHints {
    /// Hints that restrict nothing.
    pub fn none(size: usize) -> Self {
        Self {
            precedence: DiGraphMap::new(),
            columns: vec![ColumnDomain::Any; size],
        }
    }

    /// Read the hints off `puzzle`'s clues.
    pub fn extract(puzzle: &Puzzle) -> Self {
        let size = puzzle.size();
        let mut hints = Self::none(size);

        for clue in puzzle.clues() {
            // ill-formed references are left to the clue filter
            if clue.people().iter().any(|p| *p >= size) {
                log::debug!("no pruning for {clue}: person out of range");
                continue;
            }
            match *clue {
                Clue::AbovePerson { person, target } => {
                    hints.precedence.add_edge(person, target, ());
                }
                Clue::BelowPerson { person, target } => {
                    hints.precedence.add_edge(target, person, ());
                }
                Clue::AtColumn { person, column } => {
                    hints.columns[person] = hints.columns[person].restrict_to(column, size);
                }
                _ => {}
            }
        }

        log::debug!(
            "extracted {} row precedences and {} column pins{}",
            hints.precedence.edge_count(),
            hints.columns.iter().filter(|d| **d != ColumnDomain::Any).count(),
            if hints.is_contradictory() { " (contradictory)" } else { "" }
        );

        hints
    }

    /// True if no placement can satisfy the hinted clues: the precedences form a cycle
    /// or some person has no legal column.
    pub fn is_contradictory(&self) -> bool {
        is_cyclic_directed(&self.precedence) || self.columns.contains(&ColumnDomain::Empty)
    }

    /// Row precedences as `(upper, lower)` pairs.
    pub fn precedences(&self) -> impl Iterator<Item = (PersonId, PersonId)> + '_ {
        self.precedence.all_edges().map(|(upper, lower, _)| (upper, lower))
    }

    /// Whether a complete `row_order` respects every row precedence.
    pub fn row_order_allows(&self, row_order: &[PersonId]) -> bool {
        let mut row_of = vec![usize::MAX; row_order.len()];
        for (row, &person) in row_order.iter().enumerate() {
            if let Some(slot) = row_of.get_mut(person) {
                *slot = row;
            }
        }
        self.precedences()
            .all(|(upper, lower)| matches!((row_of.get(upper), row_of.get(lower)), (Some(u), Some(l)) if u < l))
    }

    /// Whether `person` may take the next free row, given who already sits above.
    ///
    /// Rows fill top-down, so this holds when everyone required above `person` is already placed.
    pub fn may_take_next_row(&self, person: PersonId, placed: &[bool]) -> bool {
        !self.precedence.contains_node(person)
            || self.precedence
                .neighbors_directed(person, Direction::Incoming)
                .all(|upper| placed.get(upper).copied().unwrap_or(false))
    }

    /// The columns `person` may take; `Any` for an unknown id.
    pub fn column_domain(&self, person: PersonId) -> ColumnDomain {
        self.columns.get(person).copied().unwrap_or(ColumnDomain::Any)
    }

    /// Whether `person` may take column `col`.
    pub fn allows_column(&self, person: PersonId, col: usize) -> bool {
        self.column_domain(person).allows(col)
    }

    /// Whether any `at_column` clue restricted a domain.
    pub fn has_column_pins(&self) -> bool {
        self.columns.iter().any(|d| *d != ColumnDomain::Any)
    }
}
