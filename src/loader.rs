//! Reading puzzles from JSON.
//!
//! ```json
//! {
//!   "grid": {"rows": 2, "cols": 2, "cells": [{"row": 0, "col": 0, "room": "hall", "objects": ["window"]}, ...]},
//!   "people": ["Axel", "Bella"],
//!   "victim": "Bella",
//!   "clues": [{"type": "on_object", "person": "Axel", "object": "window"}]
//! }
//! ```
//!
//! Coordinates missing from `cells` become void cells.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::builder::{BuilderInvalidReason, GridBuilder};
use crate::location::Location;
use crate::object::ObjectKind;
use crate::puzzle::{Puzzle, PuzzleError};
use crate::registry::{build_clue, ClueError, ClueSpec, Roster};

/// Everything that can go wrong between a path and a validated [`Puzzle`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The path given.
        path: PathBuf,
        /// The underlying failure.
        source: std::io::Error,
    },
    /// The text is not JSON of the expected shape.
    #[error("malformed puzzle file: {0}")]
    Json(#[from] serde_json::Error),
    /// A cell names an object that does not exist.
    #[error("unknown object {name:?} at {location}; valid objects: {}", valid.join(", "))]
    UnknownObject {
        /// The cell naming it.
        location: Location,
        /// The name given.
        name: String,
        /// Every object name.
        valid: Vec<&'static str>,
    },
    /// The grid builder rejected the cells.
    #[error("invalid grid: {0:?}")]
    InvalidGrid(Vec<BuilderInvalidReason>),
    /// A clue could not be built.
    #[error("clue #{index}: {source}")]
    Clue {
        /// Position of the clue in the file.
        index: usize,
        /// Why it failed.
        source: ClueError,
    },
    /// The assembled puzzle is inconsistent.
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

#[derive(Debug, Deserialize)]
struct PuzzleFile {
    grid: GridSpec,
    people: Vec<String>,
    victim: String,
    #[serde(default)]
    clues: Vec<ClueSpec>,
}

#[derive(Debug, Deserialize)]
struct GridSpec {
    rows: usize,
    cols: usize,
    cells: Vec<CellSpec>,
}

#[derive(Debug, Deserialize)]
struct CellSpec {
    row: usize,
    col: usize,
    room: String,
    #[serde(default)]
    objects: Vec<String>,
}

fn parse_objects(location: Location, names: &[String]) -> Result<Vec<ObjectKind>, LoadError> {
    names.iter()
        .map(|name| {
            ObjectKind::from_str(name).map_err(|_| LoadError::UnknownObject {
                location,
                name: name.clone(),
                valid: ObjectKind::names(),
            })
        })
        .collect()
}

fn build_puzzle(file: PuzzleFile) -> Result<Puzzle, LoadError> {
    // before the builder allocates anything
    let (people, rows, cols) = (file.people.len(), file.grid.rows, file.grid.cols);
    if rows != people || cols != people {
        return Err(PuzzleError::SizeMismatch { people, rows, cols }.into());
    }

    let mut builder = GridBuilder::with_dims(file.grid.rows, file.grid.cols);
    for cell in &file.grid.cells {
        let location = Location(cell.row, cell.col);
        builder.add_cell(location, cell.room.as_str(), parse_objects(location, &cell.objects)?);
    }
    let grid = builder.build().map_err(|reasons| LoadError::InvalidGrid(reasons.clone()))?;

    let roster = Roster::new(&file.people);
    let clues = file.clues.iter()
        .enumerate()
        .map(|(index, spec)| build_clue(spec, &roster).map_err(|source| LoadError::Clue { index, source }))
        .collect::<Result<Vec<_>, _>>()?;

    let puzzle = Puzzle::new(grid, file.people, &file.victim, clues)?;
    log::debug!(
        "loaded {}x{} puzzle with {} people and {} clues",
        puzzle.grid().rows(),
        puzzle.grid().cols(),
        puzzle.size(),
        puzzle.clues().len()
    );
    Ok(puzzle)
}

/// Parse and validate a puzzle from JSON text.
pub fn parse_puzzle(json: &str) -> Result<Puzzle, LoadError> {
    build_puzzle(serde_json::from_str(json)?)
}

/// Read, parse and validate the puzzle file at `path`.
pub fn load_puzzle(path: impl AsRef<Path>) -> Result<Puzzle, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_owned(), source })?;
    parse_puzzle(&json)
}
