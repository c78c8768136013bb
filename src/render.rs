use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use thiserror::Error;

use crate::board::Board;
use crate::camera::Camera;

/// Printed once the last generation has been shown
pub const END_OF_LIFE: &str = "End of Life";

/// How a board is turned into text. Every style writes one line per row of output, each ending
/// in `\n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderStyle {
    /// `[0, 1, 0]` per row
    #[default]
    List,

    /// `.O.` per row, as in plaintext `.cells` files
    Cells,

    /// 2x4 cells per braille character
    Braille,
}

#[derive(Debug, Error)]
#[error("Unknown render style \"{got}\", expected one of list, cells, braille")]
pub struct RenderStyleError {
    got: String,
}

impl FromStr for RenderStyle {
    type Err = RenderStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Ok(Self::List),
            "cells" => Ok(Self::Cells),
            "braille" => Ok(Self::Braille),
            _ => Err(RenderStyleError { got: s.to_string() }),
        }
    }
}

/// Render `board` in the given style.
pub fn render(board: &Board, style: RenderStyle) -> String {
    match style {
        RenderStyle::List => render_list(board),
        RenderStyle::Cells => board.to_string(),
        RenderStyle::Braille => {
            let mut cam = Camera::for_board(board);
            cam.draw(board);
            cam.render().to_string()
        }
    }
}

/// The line shown above each board
pub fn generation_header(generation: u64) -> String {
    format!("generation {generation}")
}

fn render_list(board: &Board) -> String {
    // "[" + "0, " per cell + "]\n", minus the trailing ", "
    let mut out = String::with_capacity(board.height() * (3 * board.width() + 1));

    for row in board.rows() {
        out.push('[');
        for (i, &alive) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push(if alive { '1' } else { '0' });
        }
        out.push_str("]\n");
    }

    out
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                f.write_char(if alive { 'O' } else { '.' })?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RenderStyle;

    #[test]
    fn parse_style() {
        assert_eq!("list".parse::<RenderStyle>().unwrap(), RenderStyle::List);
        assert_eq!("Cells".parse::<RenderStyle>().unwrap(), RenderStyle::Cells);
        assert_eq!(
            "BRAILLE".parse::<RenderStyle>().unwrap(),
            RenderStyle::Braille
        );
        assert!("ascii".parse::<RenderStyle>().is_err());
    }

    #[test]
    fn header() {
        assert_eq!(super::generation_header(3), "generation 3");
    }
}
