//! Shot resolution.
//!
//! Two entry points share one set of grid rules. [`apply_shot`] is run by the
//! defender against its own board and decides the outcome from the ships it
//! owns. [`apply_remote_outcome`] is run by the attacker against its view of
//! the opponent's board and replays an outcome reported by the defender. Both
//! go through [`reveal_sunk`] so the two grids stay identical.

use alloc::vec::Vec;

use crate::core::board::{Board, Grid};
use crate::core::common::{CellStatus, Coordinate, ShotOutcome};

/// Fire at `at` on the defender's own board.
///
/// Out-of-bounds or already resolved targets return
/// [`ShotOutcome::AlreadyShot`] with the board unchanged. Every other call
/// records exactly one entry in the fired list.
pub fn apply_shot(board: &Board, at: Coordinate) -> (Board, ShotOutcome) {
    match board.status(at) {
        Some(CellStatus::Empty) => {
            let mut next = board.clone();
            *next.cell_mut(at) = CellStatus::Miss;
            next.shots.push(at);
            (next, ShotOutcome::Miss)
        }
        Some(CellStatus::Ship) => {
            let mut next = board.clone();
            *next.cell_mut(at) = CellStatus::Hit;
            next.shots.push(at);
            let sunk = next
                .ships
                .iter_mut()
                .find(|ship| ship.occupies(at))
                .and_then(|ship| {
                    ship.register_hit();
                    ship.is_sunk().then(|| ship.coords().to_vec())
                });
            match sunk {
                Some(coords) => {
                    reveal_sunk(&mut next.grid, &coords);
                    (next, ShotOutcome::Sunk(coords))
                }
                None => (next, ShotOutcome::Hit),
            }
        }
        _ => (board.clone(), ShotOutcome::AlreadyShot),
    }
}

/// Replay an outcome reported by the defender onto the attacker's view.
///
/// Targets that are out of bounds or already resolved in the view, and
/// [`ShotOutcome::AlreadyShot`] itself, leave the view unchanged. A sink with
/// an empty coordinate list only marks the target cell. Reported ship cells
/// that are off the board or already `Miss` in the view are skipped.
pub fn apply_remote_outcome(board: &Board, at: Coordinate, outcome: &ShotOutcome) -> Board {
    if board.is_fired(at) || !outcome.is_resolved() {
        return board.clone();
    }
    let mut next = board.clone();
    next.shots.push(at);
    match outcome {
        ShotOutcome::Miss => *next.cell_mut(at) = CellStatus::Miss,
        ShotOutcome::Hit => *next.cell_mut(at) = CellStatus::Hit,
        ShotOutcome::Sunk(coords) => {
            *next.cell_mut(at) = CellStatus::Sunk;
            // a reported cell the view already shows as water stays water
            let coords: Vec<Coordinate> = coords
                .iter()
                .copied()
                .filter(|&c| c.is_valid() && board.status(c) != Some(CellStatus::Miss))
                .collect();
            reveal_sunk(&mut next.grid, &coords);
        }
        ShotOutcome::AlreadyShot => {}
    }
    next
}

/// Mark every cell of a sunk ship `Sunk` and every empty cell around it `Miss`.
/// No other ship can touch a sunk one, so its whole perimeter is water.
fn reveal_sunk(grid: &mut Grid, coords: &[Coordinate]) {
    for at in coords.iter() {
        grid[at.y as usize][at.x as usize] = CellStatus::Sunk;
    }
    for at in coords.iter() {
        for n in at.surrounding() {
            let cell = &mut grid[n.y as usize][n.x as usize];
            if *cell == CellStatus::Empty {
                *cell = CellStatus::Miss;
            }
        }
    }
}
