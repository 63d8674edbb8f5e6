use core::time::Duration;

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 10;

/// Russian-rules fleet as `(size, count)` pairs, largest first.
pub const FLEET: [(u8, usize); 4] = [(4, 1), (3, 2), (2, 3), (1, 4)];

/// Number of ships in a complete fleet.
pub const NUM_SHIPS: usize = 1 + 2 + 3 + 4;

/// Order in which ships are placed, both manually and by the generator.
pub const PLACEMENT_ORDER: [u8; NUM_SHIPS] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Total number of ship cells in the fleet. A board with this many damaged
/// cells has lost.
pub const TOTAL_SHIP_CELLS: usize = 4 + 2 * 3 + 3 * 2 + 4;

/// Random anchor samples tried per ship before the whole layout is discarded.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Whole-board generation restarts before giving up as a configuration error.
pub const MAX_BOARD_ATTEMPTS: usize = 100;

/// Pause before the scripted opponent fires.
pub const OPPONENT_MOVE_DELAY: Duration = Duration::from_millis(800);
