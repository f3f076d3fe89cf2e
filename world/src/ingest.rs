//! Grid-literal ingestion.
//!
//! Each row is written on its own line as a bracketed, comma-separated list
//! of integers, e.g. `[0, 1, 0]`. Anything outside the outermost brackets of
//! a line is ignored and lines without brackets are skipped, so nested
//! literals such as `[[0, 1],` followed by `[1, 0]]` parse as two rows.

use std::num::ParseIntError;

use maze_crawler_core::GridError;
use thiserror::Error;

use crate::Grid;

/// Errors that can occur while parsing a grid literal.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A cell could not be parsed as an integer.
    #[error("line {line}: '{token}' is not an integer cell code")]
    InvalidCell {
        /// One-based line number of the offending row.
        line: usize,
        /// Token that failed to parse.
        token: String,
        /// Underlying integer parsing failure.
        #[source]
        source: ParseIntError,
    },
    /// The parsed rows do not form a valid grid.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}

/// Parses a grid literal into a validated [`Grid`].
pub fn parse_grid(text: &str) -> Result<Grid, ParseError> {
    let mut rows = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let Some(body) = bracketed(line) else {
            continue;
        };

        let mut row = Vec::new();
        for token in body.split(',') {
            let token = token.trim_matches(|c: char| c.is_whitespace() || c == '[' || c == ']');
            if token.is_empty() {
                continue;
            }

            let value = token.parse::<i32>().map_err(|source| ParseError::InvalidCell {
                line: index + 1,
                token: token.to_owned(),
                source,
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    Ok(Grid::from_rows(rows)?)
}

fn bracketed(line: &str) -> Option<&str> {
    let start = line.find('[')?;
    let end = line.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&line[start + 1..end])
}
