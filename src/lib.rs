//! Conway's Game of Life (B3/S23) on a bounded board.

pub mod board;
pub mod camera;
pub mod driver;
pub mod generation;
pub mod parse_rle;
pub mod patterns;
pub mod plaintext;
pub mod render;

mod parse_util;

pub use board::Board;
pub use board::InvalidBoardError;
pub use driver::RunConfig;
pub use generation::compute_next;
