//! Loader for domination links files
//!
//! Each line describes one solution in the form `id,[x, y],[dominated, dominated, ...]`.
//! Brackets and spaces are stripped before splitting the line on commas, leaving
//! the id, both objective values and then any number of dominated ids.

use crate::common::data_structures::DominanceSet;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or resolving dominance data
#[derive(Error, Debug)]
pub enum DominanceError {
    #[error("Failed to read dominance file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: expected at least 3 fields (id, x, y), found {found}")]
    MissingFields { line: usize, found: usize },

    #[error("Line {line}: '{value}' is not a valid objective value")]
    InvalidNumber { line: usize, value: String },

    #[error("Line {line}: solution id is empty")]
    EmptyId { line: usize },

    #[error("Line {line}: solution id '{id}' appears more than once")]
    DuplicateId { line: usize, id: String },

    #[error("Solution '{from}' dominates unknown solution '{id}'")]
    UnknownId { from: String, id: String },

    #[error("At least 2 solutions are needed to standardise objective values")]
    NotEnoughSolutions,

    #[error("Objective values on the {0} axis have zero deviation")]
    ZeroDeviation(&'static str),
}

type Result<T> = core::result::Result<T, DominanceError>;

/// Characters removed from every line before it is split into fields
const STRIPPED_CHARS: [char; 3] = ['[', ']', ' '];

/// Parses a domination links file from disk
pub fn parse_dominance_file(file_path: &Path) -> Result<DominanceSet> {
    let file = File::open(file_path)?;
    parse_dominance_data(BufReader::new(file))
}

/// Parses domination links from any buffered reader
///
/// Blank lines are skipped and do not consume a solution index.
pub fn parse_dominance_data<R: BufRead>(reader: R) -> Result<DominanceSet> {
    let mut set = DominanceSet::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        let cleaned: String = line
            .trim_end_matches(['\r', '\n'])
            .chars()
            .filter(|c| !STRIPPED_CHARS.contains(c))
            .collect();
        if cleaned.is_empty() {
            continue;
        }

        let fields: Vec<&str> = cleaned.split(',').collect();
        if fields.len() < 3 {
            return Err(DominanceError::MissingFields {
                line: line_number,
                found: fields.len(),
            });
        }

        let id = fields[0];
        if id.is_empty() {
            return Err(DominanceError::EmptyId { line: line_number });
        }

        let x = parse_objective(fields[1], line_number)?;
        let y = parse_objective(fields[2], line_number)?;

        // A solution without children serialises as `[]`, which leaves a blank token.
        let dominated: Vec<String> = fields[3..]
            .iter()
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();

        match set.ids.entry(id.to_string()) {
            Entry::Occupied(_) => {
                return Err(DominanceError::DuplicateId {
                    line: line_number,
                    id: id.to_string(),
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(set.x.len());
            }
        }

        set.x.push(x);
        set.y.push(y);
        set.dominates.push(dominated);
    }

    Ok(set)
}

fn parse_objective(value: &str, line: usize) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| DominanceError::InvalidNumber {
            line,
            value: value.to_string(),
        })
}
