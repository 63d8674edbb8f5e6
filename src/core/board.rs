//! Board state: a 10×10 grid of cell statuses, the ships placed on it and the
//! shots fired against it.

use alloc::vec::Vec;
use core::fmt;

use crate::core::common::{CellStatus, Coordinate};
use crate::core::config::{BOARD_SIZE, NUM_SHIPS, PLACEMENT_ORDER, TOTAL_SHIP_CELLS};
use crate::core::ship::{Orientation, Ship, ShipId};

const N: usize = BOARD_SIZE as usize;

/// Row-major grid, indexed `grid[y][x]`.
pub type Grid = [[CellStatus; N]; N];

/// One side's board. Updates produce new values; a `Board` is never shared
/// while being modified.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) ships: Vec<Ship>,
    pub(crate) shots: Vec<Coordinate>,
}

impl Board {
    /// An empty board with no ships and no shots.
    pub fn new() -> Self {
        Board {
            grid: [[CellStatus::Empty; N]; N],
            ships: Vec::new(),
            shots: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Coordinates fired upon, in firing order.
    pub fn shots_fired(&self) -> &[Coordinate] {
        &self.shots
    }

    /// Status at `at`, or `None` when out of bounds.
    pub fn status(&self, at: Coordinate) -> Option<CellStatus> {
        at.is_valid()
            .then(|| self.grid[at.y as usize][at.x as usize])
    }

    /// Whether a shot has already resolved on `at`. Out-of-bounds cells count
    /// as resolved since they can never be fired upon.
    pub fn is_fired(&self, at: Coordinate) -> bool {
        self.status(at).map_or(true, CellStatus::is_fired)
    }

    /// Number of cells in the given state.
    pub fn count(&self, status: CellStatus) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == status)
            .count()
    }

    /// Number of `Hit` or `Sunk` cells. Only the grid is consulted so the
    /// result is the same on an authoritative board and on a remote view.
    pub fn damaged_cells(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_damaged())
            .count()
    }

    /// A board has lost once every fleet cell is damaged.
    pub fn is_defeated(&self) -> bool {
        self.damaged_cells() >= TOTAL_SHIP_CELLS
    }

    /// Whether all ten ships have been placed.
    pub fn fleet_complete(&self) -> bool {
        self.ships.len() >= NUM_SHIPS
    }

    /// Size of the next ship in placement order, `None` once the fleet is
    /// complete.
    pub fn next_ship_size(&self) -> Option<u8> {
        PLACEMENT_ORDER.get(self.ships.len()).copied()
    }

    /// Place a ship, returning the new board and the ship's identity, or
    /// `None` if the placement is rejected.
    pub fn with_ship(
        &self,
        anchor: Coordinate,
        size: u8,
        orientation: Orientation,
    ) -> Option<(Board, ShipId)> {
        let (grid, ship) = place_ship(&self.grid, &self.ships, anchor, size, orientation)?;
        let id = ship.id();
        let mut ships = self.ships.clone();
        ships.push(ship);
        Some((
            Board {
                grid,
                ships,
                shots: self.shots.clone(),
            },
            id,
        ))
    }

    pub(crate) fn cell_mut(&mut self, at: Coordinate) -> &mut CellStatus {
        &mut self.grid[at.y as usize][at.x as usize]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.grid.iter() {
            f.write_str("  ")?;
            for cell in row.iter() {
                let ch = match cell {
                    CellStatus::Empty => '.',
                    CellStatus::Ship => 'S',
                    CellStatus::Hit => 'X',
                    CellStatus::Miss => 'o',
                    CellStatus::Sunk => '#',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ships: {}, shots: {:?}\n}}", self.ships.len(), self.shots)
    }
}

/// Whether a ship of `size` anchored at `anchor` fits: every cell in bounds,
/// empty, and with no occupied cell among its eight neighbours.
pub fn is_valid_placement(grid: &Grid, anchor: Coordinate, size: u8, orientation: Orientation) -> bool {
    if size == 0 {
        return false;
    }
    (0..size).all(|i| match orientation.cell(anchor, i) {
        Some(at) => {
            let clear = |c: Coordinate| grid[c.y as usize][c.x as usize] == CellStatus::Empty;
            clear(at) && at.surrounding().all(clear)
        }
        None => false,
    })
}

/// Place a ship on a copy of `grid`. Returns `None`, leaving the inputs
/// untouched, if the placement is invalid.
pub fn place_ship(
    grid: &Grid,
    ships: &[Ship],
    anchor: Coordinate,
    size: u8,
    orientation: Orientation,
) -> Option<(Grid, Ship)> {
    if !is_valid_placement(grid, anchor, size, orientation) {
        return None;
    }
    let coords: Vec<Coordinate> = (0..size)
        .filter_map(|i| orientation.cell(anchor, i))
        .collect();
    let mut next = *grid;
    for at in coords.iter() {
        next[at.y as usize][at.x as usize] = CellStatus::Ship;
    }
    let id = ShipId(ships.iter().map(|s| s.id().0 + 1).max().unwrap_or(0));
    Some((next, Ship::new(id, coords)))
}

/// Cells a ship would cover for placement feedback, and whether it may be
/// placed there. The list stops at the first cell off the board.
pub fn placement_preview(
    board: &Board,
    anchor: Coordinate,
    size: u8,
    orientation: Orientation,
) -> (Vec<Coordinate>, bool) {
    let mut coords = Vec::with_capacity(size as usize);
    for i in 0..size {
        match orientation.cell(anchor, i) {
            Some(at) => coords.push(at),
            None => return (coords, false),
        }
    }
    let valid = is_valid_placement(&board.grid, anchor, size, orientation);
    (coords, valid)
}
