//! Session event loops.
//!
//! A session owns one [`Match`](crate::core::Match) and feeds it discrete
//! events one at a time: local commands from the front end, timer ticks for
//! the scripted opponent, and messages from a remote peer. After every event
//! the session publishes a snapshot of the match for rendering.

use core::time::Duration;

use crate::core::{Coordinate, Orientation, Side, OPPONENT_MOVE_DELAY};

pub mod peer;
pub mod solo;

pub use peer::PeerSession;
pub use solo::SoloSession;

/// Input from the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the next ship of the fleet.
    Place {
        at: Coordinate,
        orientation: Orientation,
    },
    /// Lay out the whole fleet at random.
    Randomize,
    /// Finish placement.
    Ready,
    /// Fire at the opponent's board.
    Fire(Coordinate),
    /// Start over with empty boards.
    PlayAgain,
    /// Leave the session.
    Quit,
}

/// Session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Side that moves first in every match of the session.
    pub first_turn: Side,
    /// Pause before each scripted-opponent shot.
    pub opponent_delay: Duration,
}

impl SessionConfig {
    /// Playing against the scripted opponent: the player moves first.
    pub fn solo() -> Self {
        Self {
            first_turn: Side::Local,
            opponent_delay: OPPONENT_MOVE_DELAY,
        }
    }

    /// Hosting a peer match: the host moves first.
    pub fn host() -> Self {
        Self {
            first_turn: Side::Local,
            opponent_delay: Duration::ZERO,
        }
    }

    /// Joining a peer match: the host moves first.
    pub fn guest() -> Self {
        Self {
            first_turn: Side::Opponent,
            opponent_delay: Duration::ZERO,
        }
    }

    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay = delay;
        self
    }
}
