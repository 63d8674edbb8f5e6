//! Random fleet layout.

use rand::Rng;

use crate::core::board::Board;
use crate::core::common::{BoardError, Coordinate};
use crate::core::config::{BOARD_SIZE, MAX_BOARD_ATTEMPTS, MAX_PLACEMENT_ATTEMPTS, PLACEMENT_ORDER};
use crate::core::ship::Orientation;

/// Generate a rule-valid board holding the full fleet.
///
/// Ships are placed largest first. Each ship gets up to
/// [`MAX_PLACEMENT_ATTEMPTS`] random anchors; if one runs out the whole layout
/// is discarded and generation starts over from an empty board. After
/// [`MAX_BOARD_ATTEMPTS`] restarts the configuration is treated as
/// unsatisfiable.
pub fn generate_random_board<R: Rng + ?Sized>(rng: &mut R) -> Result<Board, BoardError> {
    for _ in 0..MAX_BOARD_ATTEMPTS {
        if let Some(board) = try_generate(rng) {
            return Ok(board);
        }
    }
    Err(BoardError::FleetGenerationExhausted {
        attempts: MAX_BOARD_ATTEMPTS,
    })
}

fn try_generate<R: Rng + ?Sized>(rng: &mut R) -> Option<Board> {
    let mut board = Board::new();
    for &size in PLACEMENT_ORDER.iter() {
        board = place_randomly(rng, &board, size)?;
    }
    Some(board)
}

fn place_randomly<R: Rng + ?Sized>(rng: &mut R, board: &Board, size: u8) -> Option<Board> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orientation = if rng.random_bool(0.5) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        let anchor = Coordinate::new(
            rng.random_range(0..BOARD_SIZE),
            rng.random_range(0..BOARD_SIZE),
        );
        if let Some((next, _)) = board.with_ship(anchor, size, orientation) {
            return Some(next);
        }
    }
    None
}
