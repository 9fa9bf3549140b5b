use crate::cell::Coord;
use std::fmt;

/// Errors raised while building a level or looking up cells
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// Wall matrix does not match the configured grid size
    MalformedLevel {
        expected_cols: i32,
        expected_rows: i32,
        detail: String,
    },
    /// A configured coordinate (start or destination) is outside the grid
    InvalidCoordinate { what: &'static str, coord: Coord },
    /// Start and destination were configured on the same cell
    EndpointsCoincide(Coord),
    /// Runtime lookup outside [0, cols) x [0, rows)
    OutOfBounds(Coord),
    /// Failed to read a level file
    Io(String),
    /// Failed to parse a level file
    Parse(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::MalformedLevel {
                expected_cols,
                expected_rows,
                detail,
            } => write!(
                f,
                "malformed level (expected {expected_cols}x{expected_rows}): {detail}"
            ),
            LevelError::InvalidCoordinate { what, coord } => {
                write!(f, "{what} coordinate {coord} is outside the grid")
            }
            LevelError::EndpointsCoincide(coord) => {
                write!(f, "start and destination both placed at {coord}")
            }
            LevelError::OutOfBounds(coord) => write!(f, "cell {coord} is out of bounds"),
            LevelError::Io(msg) => write!(f, "failed to read level: {msg}"),
            LevelError::Parse(msg) => write!(f, "failed to parse level: {msg}"),
        }
    }
}

impl std::error::Error for LevelError {}
