// Hunt/target move selection for the scripted opponent.

use alloc::vec::Vec;

use rand::Rng;

use crate::core::board::Board;
use crate::core::common::{CellStatus, Coordinate};

/// Pick the scripted opponent's next target on `board`.
///
/// While any cell is `Hit` (damaged, not yet sunk) the target is drawn
/// uniformly from the unfired orthogonal neighbours of all such cells. A cell
/// bordering two hits appears twice and is twice as likely. Otherwise the
/// target is drawn uniformly from all unfired cells. Returns `None` only when
/// every cell has been fired upon.
pub fn choose_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Coordinate> {
    let frontier: Vec<Coordinate> = Coordinate::all()
        .filter(|&at| board.status(at) == Some(CellStatus::Hit))
        .flat_map(|hit| hit.orthogonal())
        .filter(|&n| !board.is_fired(n))
        .collect();
    if let Some(at) = pick(&frontier, rng) {
        return Some(at);
    }

    // Uniform over unfired cells, the same distribution as rejection sampling
    // but bounded on a nearly full board.
    let open: Vec<Coordinate> = Coordinate::all().filter(|&at| !board.is_fired(at)).collect();
    pick(&open, rng)
}

fn pick<R: Rng + ?Sized>(cells: &[Coordinate], rng: &mut R) -> Option<Coordinate> {
    if cells.is_empty() {
        None
    } else {
        Some(cells[rng.random_range(0..cells.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ship::Orientation;
    use crate::core::shot::apply_shot;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn targets_neighbours_of_a_hit() {
        let (board, _) = Board::new()
            .with_ship(Coordinate::new(4, 4), 3, Orientation::Horizontal)
            .unwrap();
        let (board, _) = apply_shot(&board, Coordinate::new(5, 4));
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let at = choose_move(&board, &mut rng).unwrap();
            assert_eq!(at.chebyshev(Coordinate::new(5, 4)), 1);
            assert!(at.x == 5 || at.y == 4);
        }
    }

    #[test]
    fn empty_board_yields_some_cell() {
        let mut rng = SmallRng::seed_from_u64(1);
        let at = choose_move(&Board::new(), &mut rng).unwrap();
        assert!(at.is_valid());
    }
}
