use std::path::PathBuf;

use strum::VariantArray;

use murdoku::loader::load_puzzle;
use murdoku::solver::{solve, SolveOptions, Strategy};
use murdoku::{Location, Puzzle, Solution};

fn fixture(name: &str) -> Puzzle {
    let _ = env_logger::builder().is_test(true).try_init();
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name].iter().collect();
    load_puzzle(&path).unwrap_or_else(|e| panic!("cannot load {}: {e}", path.display()))
}

fn every_configuration() -> Vec<(Strategy, SolveOptions)> {
    let mut configurations = Vec::new();
    for strategy in Strategy::VARIANTS {
        for pruning in [true, false] {
            for parallel in [false, true] {
                configurations.push((*strategy, SolveOptions { verbose: false, pruning, parallel }));
            }
        }
    }
    configurations
}

#[test]
fn manor_has_a_unique_murderer() {
    let puzzle = fixture("manor.json");
    let axel = puzzle.person_id("Axel").unwrap();

    for (strategy, options) in every_configuration() {
        let report = solve(&puzzle, strategy, &options).unwrap();
        assert_eq!(report.solution.murderer(), Some(axel), "{strategy} with {options:?}");

        let placement = report.solution.placement().unwrap();
        assert_eq!(placement.position_of(axel), Some(Location(0, 1)));
        assert_eq!(puzzle.render(placement), ".A.#
D#.#
..C.
#.#B
");
    }
}

#[test]
fn manor_description_lists_everyone() {
    let puzzle = fixture("manor.json");
    let report = solve(&puzzle, Strategy::Backtracking, &SolveOptions::default()).unwrap();
    let placement = report.solution.placement().unwrap();
    assert_eq!(puzzle.describe(placement), vec![
        "Axel       B0  room=kitchen  (empty)".to_owned(),
        "Bella      D3  room=bedroom  (bed)".to_owned(),
        "Cora       C2  room=hall  (empty)".to_owned(),
        "Dan        A1  room=kitchen  (carpet)".to_owned(),
    ]);
}

#[test]
fn open_manor_stays_ambiguous_despite_one_murderer() {
    let puzzle = fixture("manor_open.json");
    let axel = puzzle.person_id("Axel").unwrap();

    for (strategy, options) in every_configuration() {
        let report = solve(&puzzle, strategy, &options).unwrap();
        let Solution::Ambiguous { candidates } = &report.solution else {
            panic!("{strategy} with {options:?}: expected an ambiguous outcome, got {}", report.solution);
        };
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|candidate| candidate.murderer == Some(axel)));
    }
}

#[test]
fn gallery_has_a_unique_murderer() {
    let puzzle = fixture("gallery.json");
    let ann = puzzle.person_id("Ann").unwrap();
    let eve = puzzle.person_id("Eve").unwrap();

    let mut reports = Vec::new();
    for (strategy, options) in every_configuration() {
        let report = solve(&puzzle, strategy, &options).unwrap();
        assert_eq!(report.solution.murderer(), Some(ann), "{strategy} with {options:?}");
        reports.push(report);
    }

    let placement = reports[0].solution.placement().unwrap();
    assert_eq!(placement.position_of(eve), Some(Location(3, 1)));
    assert!(reports.iter().all(|report| report.solution == reports[0].solution));
}

#[test]
fn gallery_backtracking_builds_less() {
    let puzzle = fixture("gallery.json");
    let options = SolveOptions::default();
    let backtracking = solve(&puzzle, Strategy::Backtracking, &options).unwrap();
    let exhaustive = solve(&puzzle, Strategy::Exhaustive, &options).unwrap();
    assert_eq!(backtracking.solution, exhaustive.solution);
    assert!(backtracking.stats.placements_built < exhaustive.stats.placements_built);
    assert!(exhaustive.stats.rejected_by_geometry > 0);
}
