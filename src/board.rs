use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidBoardError {
    #[error("Board has no rows")]
    Empty,

    #[error("Board rows have no cells")]
    EmptyRow,

    #[error("Row {row} has {got} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("A {height}x{width} board is too large to allocate")]
    TooLarge { height: usize, width: usize },

    #[error("Cell ({row}, {col}) is {value}, expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },
}

/// A rectangular grid of cells at one point in time.
///
/// Cells are stored row-major, `true` meaning alive. Every constructor checks that the grid is
/// non-empty and rectangular, so a `Board` always has `height * width` cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<bool>,

    /// Number of columns (`m`)
    width: usize,

    /// Number of rows (`n`)
    height: usize,
}

impl Board {
    /// Create an all-dead board of the given size.
    pub fn dead(height: usize, width: usize) -> Result<Self, InvalidBoardError> {
        if height == 0 {
            return Err(InvalidBoardError::Empty);
        }

        if width == 0 {
            return Err(InvalidBoardError::EmptyRow);
        }

        let len = width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(InvalidBoardError::TooLarge { height, width })?;

        Ok(Self {
            cells: vec![false; len],
            width,
            height,
        })
    }

    /// Build a board from rows of `0` (dead) and `1` (alive).
    ///
    /// The width is taken from the first row. Any other row of a different length is rejected
    /// rather than clipped or padded.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, InvalidBoardError> {
        let width = check_shape(&rows)?;

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    value => return Err(InvalidBoardError::InvalidCell { row, col, value }),
                }
            }
        }

        Ok(Self {
            cells,
            width,
            height: rows.len(),
        })
    }

    /// Like [`Board::from_rows`], for rows that are already booleans.
    pub fn from_bools(rows: Vec<Vec<bool>>) -> Result<Self, InvalidBoardError> {
        let width = check_shape(&rows)?;
        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// State of the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.height || col >= self.width {
            return None;
        }

        Some(self.cells[self.index(row, col)])
    }

    /// Whether the cell is alive. Positions off the board are dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    /// Set a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is off the board.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(row < self.height, "row is out of bounds");
        assert!(col < self.width, "col is out of bounds");

        let i = self.index(row, col);
        self.cells[i] = alive;
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.width)
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Convert back into rows of `0` and `1`.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|&c| u8::from(c)).collect())
            .collect()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = InvalidBoardError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

/// Returns the common row length, or why there isn't one.
fn check_shape<T>(rows: &[Vec<T>]) -> Result<usize, InvalidBoardError> {
    let Some(first) = rows.first() else {
        return Err(InvalidBoardError::Empty);
    };

    let expected = first.len();
    if expected == 0 {
        return Err(InvalidBoardError::EmptyRow);
    }

    for (row, cells) in rows.iter().enumerate().skip(1) {
        if cells.len() != expected {
            return Err(InvalidBoardError::Ragged {
                row,
                expected,
                got: cells.len(),
            });
        }
    }

    Ok(expected)
}
