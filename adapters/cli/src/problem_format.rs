//! Line-based problem instance parser.
//!
//! The format is a sequence of whitespace-separated integer lines:
//!
//! ```text
//! rows columns altitudes
//! targets radius balloons turns
//! launch_row launch_column
//! target_row target_column        (one line per target)
//! row_delta column_delta ...      (rows lines per altitude, one pair per column)
//! ```
//!
//! Blank lines are ignored.

use std::{iter::Enumerate, str::Lines};

use loon_core::{
    GridCell, GridDimensions, MissionParameters, ProblemInstance, WindVector,
};
use thiserror::Error;

/// Errors that can occur while reading a problem instance.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseError {
    /// The input ended before every section was read.
    #[error("input ended before the {section}")]
    UnexpectedEnd {
        /// Section that was expected next.
        section: &'static str,
    },
    /// A line held the wrong number of values.
    #[error("line {line}: expected {expected} values for the {section}, found {found}")]
    WrongArity {
        /// One-based line number.
        line: usize,
        /// Section being read.
        section: &'static str,
        /// Number of values the section requires.
        expected: usize,
        /// Number of values present on the line.
        found: usize,
    },
    /// A token was not an integer.
    #[error("line {line}: `{token}` is not an integer")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// A value fell outside the range its section allows.
    #[error("line {line}: {value} is out of range for the {section}")]
    OutOfRange {
        /// One-based line number.
        line: usize,
        /// Section being read.
        section: &'static str,
        /// Offending value.
        value: i64,
    },
}

/// Parses a complete problem instance.
pub(crate) fn parse(text: &str) -> Result<ProblemInstance, ParseError> {
    let mut reader = LineReader::new(text);

    let (line, header) = reader.values(3, "grid header")?;
    let rows = positive(line, "grid header", header[0])?;
    let columns = positive(line, "grid header", header[1])?;
    let altitudes = positive(line, "grid header", header[2])?;
    let dimensions = GridDimensions::new(rows, columns, altitudes);

    let (line, mission) = reader.values(4, "mission header")?;
    let target_count = unsigned(line, "mission header", mission[0])?;
    let mission = MissionParameters::new(
        unsigned(line, "mission header", mission[1])?,
        unsigned(line, "mission header", mission[2])?,
        unsigned(line, "mission header", mission[3])?,
    );

    let launch = reader.cell(dimensions, "launch site")?;
    let targets = (0..target_count)
        .map(|_| reader.cell(dimensions, "target list"))
        .collect::<Result<Vec<_>, _>>()?;

    let pairs = columns as usize;
    let mut winds = Vec::with_capacity(dimensions.cell_count() * altitudes as usize);
    for _ in 0..altitudes {
        for _ in 0..rows {
            let (line, values) = reader.values(pairs * 2, "wind field")?;
            for pair in values.chunks_exact(2) {
                winds.push(WindVector::new(
                    signed(line, "wind field", pair[0])?,
                    signed(line, "wind field", pair[1])?,
                ));
            }
        }
    }

    Ok(ProblemInstance::new(
        dimensions, mission, launch, targets, winds,
    ))
}

struct LineReader<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }

    /// Reads the next non-blank line, which must hold exactly `expected` integers.
    fn values(
        &mut self,
        expected: usize,
        section: &'static str,
    ) -> Result<(usize, Vec<i64>), ParseError> {
        let (index, content) = self
            .lines
            .by_ref()
            .find(|(_, content)| !content.trim().is_empty())
            .ok_or(ParseError::UnexpectedEnd { section })?;
        let line = index + 1;

        let values = content
            .split_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
                    line,
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != expected {
            return Err(ParseError::WrongArity {
                line,
                section,
                expected,
                found: values.len(),
            });
        }
        Ok((line, values))
    }

    fn cell(
        &mut self,
        dimensions: GridDimensions,
        section: &'static str,
    ) -> Result<GridCell, ParseError> {
        let (line, values) = self.values(2, section)?;
        let row = unsigned(line, section, values[0])?;
        let column = unsigned(line, section, values[1])?;
        if row >= dimensions.rows() {
            return Err(ParseError::OutOfRange {
                line,
                section,
                value: values[0],
            });
        }
        if column >= dimensions.columns() {
            return Err(ParseError::OutOfRange {
                line,
                section,
                value: values[1],
            });
        }
        Ok(GridCell::new(row, column))
    }
}

fn unsigned(line: usize, section: &'static str, value: i64) -> Result<u32, ParseError> {
    u32::try_from(value).map_err(|_| ParseError::OutOfRange {
        line,
        section,
        value,
    })
}

fn positive(line: usize, section: &'static str, value: i64) -> Result<u32, ParseError> {
    match unsigned(line, section, value)? {
        0 => Err(ParseError::OutOfRange {
            line,
            section,
            value,
        }),
        value => Ok(value),
    }
}

fn signed(line: usize, section: &'static str, value: i64) -> Result<i32, ParseError> {
    i32::try_from(value).map_err(|_| ParseError::OutOfRange {
        line,
        section,
        value,
    })
}
