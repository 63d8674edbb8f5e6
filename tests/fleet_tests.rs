use seabattle::prelude::*;
use seabattle::{BoardError, MAX_BOARD_ATTEMPTS, TOTAL_SHIP_CELLS};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

fn assert_rule_valid(board: &Board) {
    let mut sizes: Vec<u8> = board.ships().iter().map(|s| s.size()).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(sizes, vec![4, 3, 3, 2, 2, 2, 1, 1, 1, 1]);
    assert_eq!(board.count(CellStatus::Ship), TOTAL_SHIP_CELLS);
    assert!(board.shots_fired().is_empty());

    for ship in board.ships() {
        let coords = ship.coords();
        let straight = coords.iter().all(|c| c.x == coords[0].x)
            || coords.iter().all(|c| c.y == coords[0].y);
        assert!(straight, "ship {:?} is not in a line", ship.id());
        for pair in coords.windows(2) {
            assert_eq!(pair[0].chebyshev(pair[1]), 1, "ship {:?} has a gap", ship.id());
        }
    }

    for (i, a) in board.ships().iter().enumerate() {
        for b in board.ships().iter().skip(i + 1) {
            assert_ne!(a.id(), b.id());
            for ca in a.coords() {
                for cb in b.coords() {
                    assert!(ca.chebyshev(*cb) > 1, "ships {:?} and {:?} touch", a.id(), b.id());
                }
            }
        }
    }
}

#[test]
fn test_random_board_is_valid() {
    for seed in 0..200 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = generate_random_board(&mut rng).expect("fleet always fits on 10x10");
        assert_rule_valid(&board);
    }
}

#[test]
fn test_random_board_is_reproducible() {
    let a = generate_random_board(&mut SmallRng::seed_from_u64(99)).unwrap();
    let b = generate_random_board(&mut SmallRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}

/// Always yields zero, so every ship is anchored at (0, 0).
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[test]
fn test_unplaceable_fleet_is_fatal() {
    assert_eq!(
        generate_random_board(&mut ZeroRng),
        Err(BoardError::FleetGenerationExhausted {
            attempts: MAX_BOARD_ATTEMPTS
        })
    );
}
