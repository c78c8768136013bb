use thiserror::Error;

use crate::board::Board;
use crate::board::InvalidBoardError;
use crate::parse_util;

#[derive(Debug, Error)]
pub enum PlaintextError {
    #[error("Unrecognized cell '{got}' on line {line}")]
    UnrecognizedCell { line: usize, got: char },

    #[error("Invalid board: {0}")]
    Board(#[from] InvalidBoardError),
}

/// Read a board drawn as text, one line per row.
///
/// `O`, `*`, `#` and `1` are alive, `.` and `0` are dead. Whitespace between cells is ignored,
/// so `0 1 0` and `.O.` describe the same row. Lines starting with `!` are comments and blank
/// lines are skipped.
///
/// Rows are not padded: every row must have the same number of cells.
///
/// See: https://conwaylife.com/wiki/Plaintext
pub fn read_plaintext(mut bytes: &[u8]) -> Result<Board, PlaintextError> {
    let mut rows = Vec::new();
    let mut line_no = 0;

    while !bytes.is_empty() {
        let (line, rest) = parse_util::take_line(bytes);
        bytes = rest;
        line_no += 1;

        if line.starts_with(b"!") {
            continue;
        }

        let mut row = Vec::with_capacity(line.len());
        for &b in line {
            match b {
                b'O' | b'o' | b'*' | b'#' | b'1' => row.push(true),
                b'.' | b'0' => row.push(false),
                w if w.is_ascii_whitespace() => {}
                got => {
                    return Err(PlaintextError::UnrecognizedCell {
                        line: line_no,
                        got: got as char,
                    });
                }
            }
        }

        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(Board::from_bools(rows)?)
}
