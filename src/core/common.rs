//! Common types for the engine: coordinates, cell states, shot outcomes and
//! board errors.

use alloc::vec::Vec;

use crate::core::config::BOARD_SIZE;

const N: i16 = BOARD_SIZE as i16;

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const SURROUNDING: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A cell address on the board. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

impl Coordinate {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Whether both components lie in `[0, BOARD_SIZE)`.
    pub fn is_valid(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// The coordinate shifted by `(dx, dy)`, or `None` if that leaves the board.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Coordinate> {
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        if (0..N).contains(&x) && (0..N).contains(&y) {
            Some(Coordinate::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// In-bounds 8-neighbourhood, excluding the cell itself.
    pub fn surrounding(self) -> impl Iterator<Item = Coordinate> {
        SURROUNDING
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// In-bounds orthogonal neighbours.
    pub fn orthogonal(self) -> impl Iterator<Item = Coordinate> {
        ORTHOGONAL
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Chebyshev distance between two coordinates.
    pub fn chebyshev(self, other: Coordinate) -> u8 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Every coordinate on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coordinate::new(x, y)))
    }
}

impl core::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of a single grid cell.
///
/// Cells only move forward: `Empty -> Ship -> Hit -> Sunk` or `Empty -> Miss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStatus {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
    Sunk,
}

impl CellStatus {
    /// Whether a shot has resolved on this cell.
    pub fn is_fired(self) -> bool {
        matches!(self, CellStatus::Hit | CellStatus::Miss | CellStatus::Sunk)
    }

    /// Whether the cell counts towards the loss threshold.
    pub fn is_damaged(self) -> bool {
        matches!(self, CellStatus::Hit | CellStatus::Sunk)
    }
}

/// Result of resolving a shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotOutcome {
    /// A ship cell was hit and the ship is still afloat.
    Hit,
    /// The shot landed in water.
    Miss,
    /// The shot sank a ship; carries every coordinate the ship occupied.
    Sunk(Vec<Coordinate>),
    /// The target was out of bounds or already resolved. Nothing changed.
    AlreadyShot,
}

impl ShotOutcome {
    /// Hits and sinks grant the shooter another shot.
    pub fn keeps_turn(&self) -> bool {
        matches!(self, ShotOutcome::Hit | ShotOutcome::Sunk(_))
    }

    /// Whether the shot changed the board.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ShotOutcome::AlreadyShot)
    }
}

/// Errors returned by board construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Random fleet generation restarted too many times. The fleet cannot be
    /// laid out on this board.
    FleetGenerationExhausted { attempts: usize },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::FleetGenerationExhausted { attempts } => write!(
                f,
                "Unable to generate a fleet layout after {} attempts",
                attempts
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
