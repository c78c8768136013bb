use thiserror::Error;

use crate::board::Board;
use crate::board::InvalidBoardError;

pub struct Pattern {
    pub name: &'static str,
    pub height: usize,
    pub width: usize,

    /// Live cells as `(row, col)`
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "blinker",
        height: 3,
        width: 3,
        cells: &[(1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "glider",
        height: 4,
        width: 3,
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "block",
        height: 4,
        width: 4,
        cells: &[(1, 1), (1, 2), (2, 1), (2, 2)],
    },
    Pattern {
        name: "toad",
        height: 4,
        width: 4,
        cells: &[(1, 1), (1, 2), (1, 3), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "beacon",
        height: 4,
        width: 4,
        cells: &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
    },
];

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Unknown pattern \"{got}\", expected one of {}", names().join(", "))]
    Unknown { got: String },

    #[error("Pattern \"{name}\" is invalid: {source}")]
    Invalid {
        name: &'static str,
        source: InvalidBoardError,
    },
}

impl Pattern {
    /// Lay the pattern out on a board of its own size.
    pub fn board(&self) -> Result<Board, InvalidBoardError> {
        let mut board = Board::dead(self.height, self.width)?;

        for &(row, col) in self.cells {
            board.set(row, col, true);
        }

        Ok(board)
    }
}

/// Names of the built-in patterns
pub fn names() -> Vec<&'static str> {
    PATTERNS.iter().map(|p| p.name).collect()
}

/// Look up a built-in pattern by name, ignoring case.
pub fn find(name: &str) -> Result<&'static Pattern, PatternError> {
    PATTERNS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| PatternError::Unknown {
            got: name.to_string(),
        })
}

/// The board of the built-in pattern called `name`.
pub fn board(name: &str) -> Result<Board, PatternError> {
    let pattern = find(name)?;

    pattern.board().map_err(|source| PatternError::Invalid {
        name: pattern.name,
        source,
    })
}
