//! Core sea battle engine (no_std compatible)
//!
//! Board model, fleet generation, shot resolution, the scripted opponent and
//! the match state machine. Nothing in here performs I/O; every operation is a
//! synchronous step over owned values.

pub mod ai;
pub mod board;
pub mod common;
pub mod config;
pub mod fleet;
pub mod game;
pub mod ship;
pub mod shot;

// Re-export commonly used types
pub use ai::choose_move;
pub use board::{is_valid_placement, place_ship, placement_preview, Board, Grid};
pub use common::{BoardError, CellStatus, Coordinate, ShotOutcome};
pub use config::*;
pub use fleet::generate_random_board;
pub use game::{Match, MatchError, MatchResult, Phase, Side};
pub use ship::{Orientation, Ship, ShipId};
pub use shot::{apply_remote_outcome, apply_shot};
