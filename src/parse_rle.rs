use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::board::Board;
use crate::board::InvalidBoardError;
use crate::generation;
use crate::parse_util;
use crate::parse_util::ConvertError;
use crate::parse_util::ParseError;

pub struct RleFile<'a> {
    pub name: Option<&'a [u8]>,
    pub author: Option<&'a [u8]>,
    pub comments: Vec<&'a [u8]>,
    pub board: Board,
}

#[derive(Debug, Error)]
pub enum RleError {
    #[error("Comment line error: {0}")]
    CommentLine(#[from] RleCommentLineError),

    #[error("Header line error: {0}")]
    HeaderLine(#[from] RleHeaderLineError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] RleEncodingError),

    #[error("Invalid board: {0}")]
    Board(#[from] InvalidBoardError),
}

/// Parse the RLE file format into a [`Board`] sized by the header line.
///
/// Only the B3/S23 rule is accepted.
///
/// See: https://conwaylife.com/wiki/Run_Length_Encoded
pub fn read_rle(mut bytes: &'_ [u8]) -> Result<RleFile<'_>, RleError> {
    let mut name = None;
    let mut author = None;
    let mut comments = Vec::new();

    // Parse as many comment lines as possible
    loop {
        bytes = parse_util::take_ws(bytes);

        let (Some(line), rest) = read_line_comment(bytes)? else {
            break;
        };

        match line {
            RleCommentLine::Comment { text } => comments.push(text),
            RleCommentLine::Name { name: n } => {
                if name.is_some() {
                    warn!("RLE file name already defined. Using latest");
                }

                name = Some(n);
            }
            RleCommentLine::Author { author: a } => {
                if author.is_some() {
                    warn!("RLE author already defined. Using latest");
                }

                author = Some(a);
            }
            RleCommentLine::Ignored { kind } => {
                debug!(kind = %(kind as char), "ignoring RLE comment line");
            }
        }

        bytes = rest;
    }

    let (RleHeaderLine { width, height }, bytes) = read_line_header(bytes)?;

    let mut board = Board::dead(height, width)?;
    read_encoding(bytes, &mut board)?;

    Ok(RleFile {
        name,
        author,
        comments,
        board,
    })
}

enum RleCommentLine<'a> {
    Comment { text: &'a [u8] },
    Name { name: &'a [u8] },
    Author { author: &'a [u8] },

    /// Offsets (`#P`, `#R`) and other lines that don't mean anything on a bounded board
    Ignored { kind: u8 },
}

#[derive(Debug, Error)]
pub enum RleCommentLineError {
    #[error("No comment type")]
    NoType,

    #[error("Empty name line")]
    EmptyName,

    #[error("Empty author line")]
    EmptyAuthor,

    #[error("Invalid rule: {0}")]
    InvalidRule(#[from] RuleError),

    #[error("Invalid comment type, found '{got}'")]
    InvalidType { got: char },
}

/// Attempt to parse a comment line, otherwise leaves `bytes` as-is.
fn read_line_comment(
    bytes: &'_ [u8],
) -> Result<(Option<RleCommentLine<'_>>, &'_ [u8]), RleCommentLineError> {
    let Ok(bytes) = parse_util::expect(b'#', bytes) else {
        return Ok((None, bytes));
    };

    let (Some(b), bytes) = parse_util::take_1(bytes) else {
        return Err(RleCommentLineError::NoType);
    };

    let bytes = parse_util::take_blank(bytes);
    let (text, bytes) = parse_util::take_line(bytes);

    let line = match b {
        b'C' | b'c' => RleCommentLine::Comment { text },

        b'N' => {
            if text.is_empty() {
                return Err(RleCommentLineError::EmptyName);
            }

            RleCommentLine::Name { name: text }
        }

        b'O' => {
            if text.is_empty() {
                return Err(RleCommentLineError::EmptyAuthor);
            }

            RleCommentLine::Author { author: text }
        }

        // Pattern rules, written survival/birth
        b'r' => {
            check_rule(text)?;

            RleCommentLine::Ignored { kind: b }
        }

        b'P' | b'R' => RleCommentLine::Ignored { kind: b },

        b => return Err(RleCommentLineError::InvalidType { got: b as char }),
    };

    Ok((Some(line), bytes))
}

struct RleHeaderLine {
    width: usize,
    height: usize,
}

#[derive(Debug, Error)]
pub enum RleHeaderLineError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Expected x dimension, found end of input")]
    NoX,

    #[error("Failed to parse x dimension: {0}")]
    ParseX(#[source] ConvertError),

    #[error("Expected y dimension, found end of input")]
    NoY,

    #[error("Failed to parse y dimension: {0}")]
    ParseY(#[source] ConvertError),

    #[error("Invalid token: expected ',' or '\\n', found '{got}'")]
    InvalidToken { got: char },

    #[error("Invalid rule: {0}")]
    InvalidRule(#[from] RuleError),
}

/// Parse `x = W, y = H[, rule = R]`
fn read_line_header(bytes: &[u8]) -> Result<(RleHeaderLine, &[u8]), RleHeaderLineError> {
    let bytes = parse_util::expect(b'x', bytes)?;
    let bytes = parse_util::take_blank(bytes);
    let bytes = parse_util::expect(b'=', bytes)?;

    let (Some(x_bytes), bytes) = parse_util::take_until(b',', bytes) else {
        return Err(RleHeaderLineError::NoX);
    };
    let width = parse_util::convert(x_bytes).map_err(RleHeaderLineError::ParseX)?;

    let bytes = parse_util::expect(b',', bytes)?;
    let bytes = parse_util::take_blank(bytes);
    let bytes = parse_util::expect(b'y', bytes)?;
    let bytes = parse_util::take_blank(bytes);
    let bytes = parse_util::expect(b'=', bytes)?;

    // The height can be terminated with either `,` or a line break.
    let p = |b| b == b',' || b == b'\n';
    let (Some(y_bytes), bytes) = parse_util::take_until_fn(p, bytes) else {
        return Err(RleHeaderLineError::NoY);
    };
    let height = parse_util::convert(y_bytes).map_err(RleHeaderLineError::ParseY)?;

    let header = RleHeaderLine { width, height };

    match parse_util::take_1(bytes) {
        (None, bytes) | (Some(b'\n'), bytes) => Ok((header, bytes)),
        (Some(b','), bytes) => {
            let bytes = parse_util::take_blank(bytes);
            let bytes = parse_util::expect_slice(b"rule", bytes)?;
            let bytes = parse_util::take_blank(bytes);
            let bytes = parse_util::expect(b'=', bytes)?;
            let bytes = parse_util::take_blank(bytes);

            let (rule, bytes) = parse_util::take_line(bytes);
            check_rule(rule.trim_ascii())?;

            Ok((header, bytes))
        }
        (Some(b), _) => Err(RleHeaderLineError::InvalidToken { got: b as char }),
    }
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Unsupported rule \"{got}\", only B3/S23 is simulated")]
    UnsupportedRule { got: String },

    #[error("Malformed rule \"{got}\"")]
    Malformed { got: String },
}

/// Accept `B3/S23` (any case) or the survival/birth form `23/3`.
fn check_rule(rule: &[u8]) -> Result<(), RuleError> {
    let malformed = || RuleError::Malformed {
        got: String::from_utf8_lossy(rule).to_string(),
    };

    let (Some(left), rest) = parse_util::take_until(b'/', rule) else {
        return Err(malformed());
    };
    let right = parse_util::expect(b'/', rest).map_err(|_| malformed())?;

    let (births, survivals) = match (left.first(), right.first()) {
        (Some(b'b' | b'B'), Some(b's' | b'S')) => (&left[1..], &right[1..]),
        _ => (right, left),
    };

    let births = bytes_to_mask(births).ok_or_else(malformed)?;
    let survivals = bytes_to_mask(survivals).ok_or_else(malformed)?;

    if births != generation::BIRTHS || survivals != generation::SURVIVALS {
        return Err(RuleError::UnsupportedRule {
            got: String::from_utf8_lossy(rule).to_string(),
        });
    }

    Ok(())
}

/// Convert the human readable neighbor counts to a packed bit representation
fn bytes_to_mask(bytes: &[u8]) -> Option<u16> {
    let mut n = 0;

    for &b in bytes {
        if !(b'0'..=b'8').contains(&b) {
            return None;
        }

        n |= 1 << (b - b'0');
    }

    Some(n)
}

#[derive(Debug, Error)]
pub enum RleEncodingError {
    #[error("Unexpected EOF, expected '!'")]
    UnexpectedEof,

    #[error("Failed to convert run length: {0}")]
    RunLength(#[from] ConvertError),

    #[error("Cell ({row}, {col}) is outside the {width}x{height} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    #[error("Run of {rep} cells runs past the end of the board")]
    RunTooLong { rep: usize },

    #[error("Unrecognized byte: 0x{got:0X}")]
    UnrecognizedByte { got: u8 },
}

fn read_encoding(mut bytes: &[u8], board: &mut Board) -> Result<(), RleEncodingError> {
    let mut rep: usize = 1;

    let (mut row, mut col): (usize, usize) = (0, 0);

    loop {
        let Some(b) = parse_util::peek_1(bytes) else {
            return Err(RleEncodingError::UnexpectedEof);
        };

        match b {
            w if w.is_ascii_whitespace() => {
                let (_, rest) = parse_util::take_1(bytes);
                bytes = rest;
            }

            // End of input
            b'!' => break,

            // Dead cell
            b'b' => {
                let (_, rest) = parse_util::take_1(bytes);
                bytes = rest;

                col = col
                    .checked_add(rep)
                    .ok_or(RleEncodingError::RunTooLong { rep })?;

                rep = 1;
            }

            // Live cell
            b'o' => {
                let (_, rest) = parse_util::take_1(bytes);
                bytes = rest;

                let end = col
                    .checked_add(rep)
                    .ok_or(RleEncodingError::RunTooLong { rep })?;

                if row >= board.height() || end > board.width() {
                    return Err(RleEncodingError::OutOfBounds {
                        row,
                        col: end.saturating_sub(1),
                        width: board.width(),
                        height: board.height(),
                    });
                }

                for i in 0..rep {
                    board.set(row, col + i, true);
                }

                col = end;

                rep = 1;
            }

            // End of line
            b'$' => {
                let (_, rest) = parse_util::take_1(bytes);
                bytes = rest;

                row = row
                    .checked_add(rep)
                    .ok_or(RleEncodingError::RunTooLong { rep })?;
                col = 0;

                rep = 1;
            }

            n if n.is_ascii_digit() => {
                let (Some(n), rest) = parse_util::take_until_fn(|b| !b.is_ascii_digit(), bytes)
                else {
                    unreachable!("We peeked and found a digit")
                };
                bytes = rest;

                rep = parse_util::convert(n)?;
            }

            b => return Err(RleEncodingError::UnrecognizedByte { got: b }),
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::InvalidBoardError;
    use super::RleEncodingError;
    use super::RleError;
    use super::RleHeaderLineError;
    use super::RuleError;

    #[test]
    fn read_header() {
        let bytes = b"x = 3, y = 2\n";
        let (header, rest) = super::read_line_header(bytes.as_slice()).unwrap();

        assert_eq!((header.width, header.height), (3, 2));
        assert!(rest.is_empty());
    }

    #[test]
    fn read_header_with_rule() {
        let bytes = b"x = 3, y = 3, rule = B3/S23\nbo$";
        let (header, rest) = super::read_line_header(bytes.as_slice()).unwrap();

        assert_eq!((header.width, header.height), (3, 3));
        assert_eq!(rest, b"bo$");
    }

    #[test]
    fn rules() {
        assert!(super::check_rule(b"B3/S23").is_ok());
        assert!(super::check_rule(b"b3/s32").is_ok());
        assert!(super::check_rule(b"23/3").is_ok());
        assert!(matches!(
            super::check_rule(b"B36/S23"),
            Err(RuleError::UnsupportedRule { .. })
        ));
        assert!(matches!(
            super::check_rule(b"B3S23"),
            Err(RuleError::Malformed { .. })
        ));
    }

    #[test]
    fn glider() {
        let rle = b"#N Glider\n#O Richard K. Guy\n#C The smallest spaceship\nx = 3, y = 3, rule = B3/S23\nbob$2bo$3o!\n";
        let file = super::read_rle(rle).unwrap();

        assert_eq!(file.name, Some(b"Glider".as_slice()));
        assert_eq!(file.author, Some(b"Richard K. Guy".as_slice()));
        assert_eq!(file.comments, vec![b"The smallest spaceship".as_slice()]);
        assert_eq!(
            file.board.to_rows(),
            vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]
        );
    }

    #[test]
    fn multi_row_skip() {
        let file = super::read_rle(b"x = 2, y = 3\no2$bo!").unwrap();

        assert_eq!(file.board.to_rows(), vec![vec![1, 0], vec![0, 0], vec![0, 1]]);
    }

    #[test]
    fn cells_outside_header_are_rejected() {
        let res = super::read_rle(b"x = 2, y = 1\n3o!");

        assert!(matches!(
            res,
            Err(RleError::Encoding(RleEncodingError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn huge_dead_run() {
        let res = super::read_rle(b"x = 2, y = 1\nb18446744073709551615b!");

        assert!(matches!(
            res,
            Err(RleError::Encoding(RleEncodingError::RunTooLong { .. }))
        ));
    }

    #[test]
    fn huge_live_run() {
        let res = super::read_rle(b"x = 2, y = 1\nb18446744073709551615o!");

        assert!(matches!(
            res,
            Err(RleError::Encoding(RleEncodingError::RunTooLong { .. }))
        ));
    }

    #[test]
    fn huge_row_skip() {
        let res = super::read_rle(b"x = 2, y = 1\n$18446744073709551615$o!");

        assert!(matches!(
            res,
            Err(RleError::Encoding(RleEncodingError::RunTooLong { .. }))
        ));
    }

    #[test]
    fn huge_header() {
        let res = super::read_rle(b"x = 4294967296, y = 4294967297\n!");

        assert!(matches!(
            res,
            Err(RleError::Board(InvalidBoardError::TooLarge { .. }))
        ));
    }

    #[test]
    fn missing_terminator() {
        let res = super::read_rle(b"x = 1, y = 1\no");

        assert!(matches!(
            res,
            Err(RleError::Encoding(RleEncodingError::UnexpectedEof))
        ));
    }

    #[test]
    fn missing_header() {
        let res = super::read_rle(b"#N nothing\nbo!");

        assert!(matches!(
            res,
            Err(RleError::HeaderLine(RleHeaderLineError::ParseError(_)))
        ));
    }
}
