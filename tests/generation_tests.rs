use std::collections::HashSet;

use game_of_life::Board;
use game_of_life::compute_next;
use game_of_life::generation::live_neighbors;
use proptest::prelude::*;

fn board(rows: &[&[u8]]) -> Board {
    Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

fn arb_board() -> impl Strategy<Value = Board> {
    (1usize..12, 1usize..12)
        .prop_flat_map(|(n, m)| prop::collection::vec(prop::collection::vec(any::<bool>(), m), n))
        .prop_map(|rows| Board::from_bools(rows).unwrap())
}

fn live_set(board: &Board) -> HashSet<(isize, isize)> {
    let mut out = HashSet::new();
    for (r, row) in board.rows().enumerate() {
        for (c, &alive) in row.iter().enumerate() {
            if alive {
                out.insert((r as isize, c as isize));
            }
        }
    }
    out
}

/// Same rules over a set of live cells, clipped to `n` rows and `m` columns afterwards
fn step_naive(board: &Board) -> HashSet<(isize, isize)> {
    let cells = live_set(board);
    let (n, m) = (board.height() as isize, board.width() as isize);
    let mut next = HashSet::new();

    for r in 0..n {
        for c in 0..m {
            let mut neighbors = 0;
            for dr in -1..=1 {
                for dc in -1..=1 {
                    if (dr, dc) != (0, 0) && cells.contains(&(r + dr, c + dc)) {
                        neighbors += 1;
                    }
                }
            }

            let alive = cells.contains(&(r, c));
            if (alive && (neighbors == 2 || neighbors == 3)) || (!alive && neighbors == 3) {
                next.insert((r, c));
            }
        }
    }

    next
}

fn transpose(board: &Board) -> Board {
    let rows = (0..board.width())
        .map(|c| (0..board.height()).map(|r| board.is_alive(r, c)).collect())
        .collect();

    Board::from_bools(rows).unwrap()
}

#[test]
fn blinker_oscillates() {
    let horizontal = board(&[&[0, 0, 0], &[1, 1, 1], &[0, 0, 0]]);
    let vertical = board(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]]);

    let next = compute_next(&horizontal);
    assert_eq!(next, vertical);
    assert_eq!(compute_next(&next), horizontal);
}

#[test]
fn block_is_stable() {
    let block = board(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]]);

    assert_eq!(compute_next(&block), block);
}

#[test]
fn block_in_corner_is_stable() {
    let block = board(&[&[1, 1], &[1, 1]]);

    assert_eq!(compute_next(&block), block);
}

#[test]
fn corner_cell_has_no_wraparound() {
    // On a torus (0, 0) would see the three live cells on the far edges and be born
    let b = board(&[&[0, 0, 1], &[0, 0, 0], &[1, 0, 1]]);

    assert_eq!(live_neighbors(&b, 0, 0), 0);
    assert!(!compute_next(&b).is_alive(0, 0));
}

#[test]
fn corner_cell_counts_in_bounds_neighbors() {
    let b = board(&[&[1, 1, 0], &[1, 1, 0], &[0, 0, 0]]);

    assert_eq!(live_neighbors(&b, 0, 0), 3);
    assert!(compute_next(&b).is_alive(0, 0));
}

#[test]
fn overcrowded_cell_dies() {
    let b = board(&[&[1, 1, 1], &[1, 1, 1], &[0, 0, 0]]);
    let next = compute_next(&b);

    assert_eq!(live_neighbors(&b, 1, 1), 5);
    assert!(!next.is_alive(1, 1));
    assert!(next.is_alive(0, 0));
    assert!(next.is_alive(2, 1));
}

#[test]
fn input_is_left_untouched() {
    let b = board(&[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]);
    let copy = b.clone();

    let first = compute_next(&b);
    let second = compute_next(&b);

    assert_eq!(b, copy);
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn prop_dimensions_preserved(b in arb_board()) {
        let next = compute_next(&b);

        prop_assert_eq!(next.height(), b.height());
        prop_assert_eq!(next.width(), b.width());
    }

    #[test]
    fn prop_deterministic(b in arb_board()) {
        let copy = b.clone();

        prop_assert_eq!(compute_next(&b), compute_next(&b));
        prop_assert_eq!(b, copy);
    }

    #[test]
    fn prop_all_dead_stays_dead(n in 1usize..20, m in 1usize..20) {
        let b = Board::dead(n, m).unwrap();

        prop_assert_eq!(compute_next(&b).population(), 0);
    }

    #[test]
    fn prop_isolated_cell_dies(n in 1usize..20, m in 1usize..20, r in 0usize..20, c in 0usize..20) {
        let mut b = Board::dead(n, m).unwrap();
        b.set(r % n, c % m, true);

        prop_assert_eq!(compute_next(&b).population(), 0);
    }

    #[test]
    fn prop_matches_naive(b in arb_board()) {
        prop_assert_eq!(live_set(&compute_next(&b)), step_naive(&b));
    }

    #[test]
    fn prop_commutes_with_transpose(b in arb_board()) {
        prop_assert_eq!(transpose(&compute_next(&b)), compute_next(&transpose(&b)));
    }
}
