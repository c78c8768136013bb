use crate::board::Board;

/// Neighbor offsets as `(row, col)`, going clockwise from the west.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
];

/// # Representation
/// Bit `k` is set when `k` live neighbors lead to a live cell.
/// ```notrust
/// births:    0000_0000_0000_1000   (b3)
/// survivals: 0000_0000_0000_1100   (s23)
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
pub(crate) const BIRTHS: u16 = 0b1000;
pub(crate) const SURVIVALS: u16 = 0b1100;

/// Compute the next generation of `board`.
///
/// Every cell is computed from the input board only, so the result does not depend on the order
/// cells are visited in. The grid has hard edges: neighbors that would fall off the board are not
/// counted, nothing wraps around.
pub fn compute_next(board: &Board) -> Board {
    let (n, m) = (board.height(), board.width());

    let next: Vec<Vec<bool>> = (0..n)
        .map(|r| {
            (0..m)
                .map(|c| next_state(board.is_alive(r, c), live_neighbors(board, r, c)))
                .collect()
        })
        .collect();

    // Same shape as a valid board, so this cannot fail
    match Board::from_bools(next) {
        Ok(next) => next,
        Err(e) => unreachable!("successor of a valid board is valid: {e}"),
    }
}

/// Count the live cells among the (up to) 8 in-bounds neighbors of `(row, col)`.
pub fn live_neighbors(board: &Board, row: usize, col: usize) -> u8 {
    let mut count = 0;

    for (dr, dc) in NEIGHBOR_OFFSETS {
        let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };

        if board.is_alive(r, c) {
            count += 1;
        }
    }

    count
}

/// B3/S23
fn next_state(alive: bool, neighbors: u8) -> bool {
    let n = 1u16 << neighbors;

    if alive {
        n & SURVIVALS == n
    } else {
        n & BIRTHS == n
    }
}

impl Board {
    /// The next generation of this board. See [`compute_next`].
    pub fn next(&self) -> Board {
        compute_next(self)
    }
}
