use crate::cell::{Coord, DisplayState};
use crate::error::LevelError;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Initial wall layout of a level.
///
/// `walls[x][y]` is true where a wall stands. This is the JSON layout used by
/// level files: `{"walls": [[false, true, ...], ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub walls: Vec<Vec<bool>>,
}

impl LevelData {
    pub fn blank(cols: usize, rows: usize) -> Self {
        LevelData {
            walls: vec![vec![false; rows]; cols],
        }
    }

    pub fn cols(&self) -> usize {
        self.walls.len()
    }

    /// Height of the first column; ragged matrices are caught by `Grid::new`
    pub fn rows(&self) -> usize {
        self.walls.first().map_or(0, Vec::len)
    }

    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        serde_json::from_str(json).map_err(|e| LevelError::Parse(e.to_string()))
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| LevelError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Parse a text layout: one line per row, one character per cell.
    ///
    /// Format:
    /// - ■ or #: wall
    /// - □, ., space: free cell
    /// - s, d, o, ~: free cell (start/destination/explored/preview markers
    ///   written by [`to_ascii`] are informational only)
    pub fn parse_ascii(text: &str) -> Result<Self, LevelError> {
        let lines: Vec<Vec<char>> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map_or(0, Vec::len);
        let malformed = |detail: String| LevelError::MalformedLevel {
            expected_cols: cols as i32,
            expected_rows: rows as i32,
            detail,
        };

        if rows == 0 || cols == 0 {
            return Err(malformed("layout is empty".to_string()));
        }

        let mut level = Self::blank(cols, rows);
        for (y, line) in lines.iter().enumerate() {
            if line.len() != cols {
                return Err(malformed(format!("row {} has {} cells", y, line.len())));
            }
            for (x, &ch) in line.iter().enumerate() {
                level.walls[x][y] = match ch {
                    '■' | '#' => true,
                    '□' | '.' | ' ' | 's' | 'd' | 'o' | '~' => false,
                    other => {
                        let at = Coord::new(x as i32, y as i32);
                        return Err(malformed(format!("unknown character '{}' at {}", other, at)));
                    }
                };
            }
        }
        Ok(level)
    }
}

/// Walls currently standing in `grid`, as level data
impl From<&Grid> for LevelData {
    fn from(grid: &Grid) -> Self {
        let mut level = LevelData::blank(grid.cols() as usize, grid.rows() as usize);
        for cell in grid.cells() {
            level.walls[cell.x() as usize][cell.y() as usize] = cell.is_wall();
        }
        level
    }
}

/// Render the grid as text, one line per row
pub fn to_ascii(grid: &Grid) -> String {
    let mut result = String::new();

    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let symbol = match grid.cell(Coord::new(x, y)).map(|c| c.display_state()) {
                Some(DisplayState::Wall) => '■',
                Some(DisplayState::Start) => 's',
                Some(DisplayState::Destination) => 'd',
                Some(DisplayState::Explored) => 'o',
                Some(DisplayState::Preview) => '~',
                Some(DisplayState::Empty) | None => '□',
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_column_major() {
        let json = r#"{"walls": [[false, true], [false, false], [true, false]]}"#;
        let level = LevelData::from_json_str(json).unwrap();
        assert_eq!(level.cols(), 3);
        assert_eq!(level.rows(), 2);
        assert!(level.walls[0][1]);
        assert!(level.walls[2][0]);
    }

    #[test]
    fn json_without_walls_key_fails() {
        let err = LevelData::from_json_str(r#"{"cells": []}"#).unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LevelData::load_json("no/such/level.json").unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }

    #[test]
    fn ascii_rows_map_to_y() {
        let level = LevelData::parse_ascii("s■□\n□□#\n").unwrap();
        assert_eq!((level.cols(), level.rows()), (3, 2));
        assert!(level.walls[1][0]);
        assert!(level.walls[2][1]);
        assert!(!level.walls[0][0]);
    }

    #[test]
    fn ascii_keeps_rows_written_with_spaces() {
        let level = LevelData::parse_ascii("#.#\n   \n.#.\n").unwrap();
        assert_eq!((level.cols(), level.rows()), (3, 3));
        assert!(level.walls[0][0]);
        assert!((0..3).all(|x| !level.walls[x][1]));
        assert!(level.walls[1][2]);
    }

    #[test]
    fn ascii_accepts_crlf_line_endings() {
        let level = LevelData::parse_ascii("#.\r\n.#\r\n").unwrap();
        assert_eq!((level.cols(), level.rows()), (2, 2));
        assert!(level.walls[1][1]);
    }

    #[test]
    fn ascii_rejects_ragged_rows() {
        let err = LevelData::parse_ascii("...\n..\n").unwrap_err();
        assert!(matches!(err, LevelError::MalformedLevel { .. }));
    }

    #[test]
    fn ascii_rejects_unknown_characters() {
        assert!(LevelData::parse_ascii("..x\n...\n").is_err());
        assert!(LevelData::parse_ascii("\n\n").is_err());
    }
}
