use itertools::{Either, Itertools};
use rayon::prelude::*;

use crate::hints::{ColumnDomain, PruningHints};
use crate::placement::PersonId;

use super::{Progress, Search, SearchResult};

/// `n!`, saturating.
fn factorial(n: usize) -> u64 {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k)).unwrap_or(u64::MAX)
}

/// Column permutations for `row_order` that respect the pinned column domains.
///
/// Pinned rows keep their column; the remaining columns are permuted over the remaining rows.
/// Yields nothing when two people on this row order are pinned to the same column.
pub(super) fn column_perms(hints: &PruningHints, row_order: &[PersonId]) -> impl Iterator<Item = Vec<usize>> {
    let n = row_order.len();
    let mut fixed = vec![None; n];
    let mut taken = vec![false; n];
    let mut feasible = true;

    for (row, &person) in row_order.iter().enumerate() {
        match hints.column_domain(person) {
            ColumnDomain::Any => {}
            ColumnDomain::Pinned(col) if col < n && !taken[col] => {
                fixed[row] = Some(col);
                taken[col] = true;
            }
            _ => feasible = false,
        }
    }

    if !feasible {
        return Either::Left(std::iter::empty());
    }

    let free_rows: Vec<usize> = (0..n).filter(|row| fixed[*row].is_none()).collect();
    let free_cols: Vec<usize> = (0..n).filter(|col| !taken[*col]).collect();
    let k = free_cols.len();

    Either::Right(free_cols.into_iter().permutations(k).map(move |perm| {
        let mut col_perm: Vec<usize> = fixed.iter().map(|col| col.unwrap_or(0)).collect();
        for (&row, col) in free_rows.iter().zip(perm) {
            col_perm[row] = col;
        }
        col_perm
    }))
}

fn expand_row_order(search: &Search<'_>, row_order: Vec<PersonId>) -> SearchResult {
    let mut result = SearchResult::default();
    result.stats.nodes_expanded += 1;
    for col_perm in column_perms(&search.hints, &row_order) {
        search.finalize(row_order.clone(), col_perm, &mut result);
    }
    result
}

/// Try every row order that survives the precedence filter against every admissible column permutation.
pub(super) fn run(search: &Search<'_>, progress: &dyn Progress) -> SearchResult {
    let n = search.puzzle.size();
    progress.set_total(factorial(n));

    let row_orders = (0..n).permutations(n).filter(|row_order| {
        let allowed = search.hints.row_order_allows(row_order);
        if !allowed {
            progress.advance(1);
        }
        allowed
    });

    let expand = |row_order: Vec<PersonId>| {
        let result = expand_row_order(search, row_order);
        progress.advance(1);
        result
    };

    if search.options.parallel {
        row_orders.par_bridge()
            .map(expand)
            .reduce(SearchResult::default, SearchResult::merge)
    } else {
        row_orders.map(expand).fold(SearchResult::default(), SearchResult::merge)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::GridBuilder;
    use crate::clue::Clue;
    use crate::location::Location;
    use crate::puzzle::Puzzle;

    use super::*;

    fn puzzle(clues: Vec<Clue>) -> Puzzle {
        let mut builder = GridBuilder::with_dims(3, 3);
        for row in 0..3 {
            for col in 0..3 {
                builder.add_cell(Location(row, col), "hall", []);
            }
        }
        let people = ["A", "B", "C"].iter().map(|p| p.to_string()).collect();
        Puzzle::new(builder.build().unwrap(), people, "C", clues).unwrap()
    }

    #[test]
    fn unpinned_columns_give_every_permutation() {
        let hints = PruningHints::none(3);
        assert_eq!(column_perms(&hints, &[0, 1, 2]).count(), 6);
    }

    #[test]
    fn pinned_columns_stay_put() {
        let hints = PruningHints::extract(&puzzle(vec![Clue::AtColumn { person: 1, column: 2 }]));
        let perms: Vec<_> = column_perms(&hints, &[1, 0, 2]).collect();
        assert_eq!(perms, vec![vec![2, 0, 1], vec![2, 1, 0]]);

        let perms: Vec<_> = column_perms(&hints, &[0, 2, 1]).collect();
        assert_eq!(perms, vec![vec![0, 1, 2], vec![1, 0, 2]]);
    }

    #[test]
    fn shared_pins_yield_nothing() {
        let hints = PruningHints::extract(&puzzle(vec![
            Clue::AtColumn { person: 0, column: 1 },
            Clue::AtColumn { person: 2, column: 1 },
        ]));
        assert_eq!(column_perms(&hints, &[0, 1, 2]).count(), 0);
    }

    #[test]
    fn fully_pinned_rows_give_one_permutation() {
        let hints = PruningHints::extract(&puzzle(vec![
            Clue::AtColumn { person: 0, column: 1 },
            Clue::AtColumn { person: 1, column: 2 },
            Clue::AtColumn { person: 2, column: 0 },
        ]));
        assert_eq!(column_perms(&hints, &[2, 1, 0]).collect::<Vec<_>>(), vec![vec![0, 2, 1]]);
    }

    #[test]
    fn factorial_saturates() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(30), u64::MAX);
    }
}
