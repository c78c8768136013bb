use std::convert::Infallible;

use tracing::debug;
use tracing::info;

use crate::board::Board;

/// Number of generations reported when the caller doesn't say otherwise
pub const DEFAULT_GENERATIONS: u32 = 10;

/// Index given to the initial board when the caller doesn't say otherwise
pub const DEFAULT_FIRST_GENERATION: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// How many boards to report, the initial one included
    pub generations: u32,

    /// Index reported alongside the initial board. Purely presentational, so it wraps around to
    /// `0` after `u64::MAX` instead of failing the run.
    pub first_generation: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: DEFAULT_GENERATIONS,
            first_generation: DEFAULT_FIRST_GENERATION,
        }
    }
}

impl RunConfig {
    pub fn generations(mut self, generations: u32) -> Self {
        self.generations = generations;
        self
    }

    pub fn first_generation(mut self, first_generation: u64) -> Self {
        self.first_generation = first_generation;
        self
    }
}

/// Step `initial` forward, handing every board to `on_generation` before it is replaced by its
/// successor. Returns the last board reported.
///
/// A `generations` of `0` still reports the initial board once.
pub fn run<F>(initial: Board, config: RunConfig, mut on_generation: F) -> Board
where
    F: FnMut(&Board, u64),
{
    let res: Result<Board, Infallible> = try_run(initial, config, |board, generation| {
        on_generation(board, generation);
        Ok(())
    });

    match res {
        Ok(board) => board,
        Err(e) => match e {},
    }
}

/// Like [`run`], but stops at the first error returned by `on_generation`.
pub fn try_run<F, E>(initial: Board, config: RunConfig, mut on_generation: F) -> Result<Board, E>
where
    F: FnMut(&Board, u64) -> Result<(), E>,
{
    let total = config.generations.max(1);
    let mut board = initial;
    let mut generation = config.first_generation;

    for remaining in (0..total).rev() {
        debug!(generation, population = board.population(), "generation");
        on_generation(&board, generation)?;

        if remaining == 0 {
            break;
        }

        board = board.next();
        generation = generation.wrapping_add(1);
    }

    info!(generation, "end of life");

    Ok(board)
}
