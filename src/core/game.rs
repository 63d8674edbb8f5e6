//! Match controller: phases, readiness, turn order and win detection.
//!
//! A [`Match`] is owned by exactly one session. The local board is always
//! authoritative. The opponent board is authoritative against a scripted
//! opponent and a view rebuilt from reported outcomes against a remote peer.

use rand::Rng;

use crate::core::board::Board;
use crate::core::common::{BoardError, Coordinate, ShotOutcome};
use crate::core::fleet::generate_random_board;
use crate::core::ship::{Orientation, ShipId};
use crate::core::shot::{apply_remote_outcome, apply_shot};

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Placement,
    Playing,
    GameOver,
}

/// One of the two sides of a match, from the local point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Local,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Local => Side::Opponent,
            Side::Opponent => Side::Local,
        }
    }
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// A side sank the whole opposing fleet.
    Winner(Side),
    /// The match was cut short (connection lost) with no winner.
    Aborted,
}

/// Errors from driving a [`Match`] out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Operation is not allowed in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// It is the other side's turn.
    NotYourTurn(Side),
    /// Readiness requires all ten ships to be placed.
    FleetIncomplete,
    /// All ten ships are already placed.
    FleetComplete,
    /// A reported outcome cannot be applied (e.g. `AlreadyShot`).
    UnreportableOutcome,
    /// A shot is already awaiting its result.
    ShotPending,
    /// The target has already been resolved.
    AlreadyFired(Coordinate),
    /// Board construction failed.
    Board(BoardError),
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl core::fmt::Display for MatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchError::WrongPhase { expected, actual } => {
                write!(f, "Expected phase {:?}, match is in {:?}", expected, actual)
            }
            MatchError::NotYourTurn(side) => write!(f, "It is not {:?}'s turn", side),
            MatchError::FleetIncomplete => write!(f, "Not all ships have been placed"),
            MatchError::FleetComplete => write!(f, "All ships are already placed"),
            MatchError::UnreportableOutcome => write!(f, "Outcome cannot be reported"),
            MatchError::ShotPending => write!(f, "Previous shot has not been resolved yet"),
            MatchError::AlreadyFired(at) => write!(f, "Cell {} was already fired upon", at),
            MatchError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

/// State of one match between the local side and its opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    local: Board,
    opponent: Board,
    phase: Phase,
    first_turn: Side,
    turn: Side,
    local_ready: bool,
    opponent_ready: bool,
    result: Option<MatchResult>,
}

impl Match {
    /// A new match in the placement phase. `first_turn` moves first once
    /// play begins, and again after every reset.
    pub fn new(first_turn: Side) -> Self {
        Self {
            local: Board::new(),
            opponent: Board::new(),
            phase: Phase::Placement,
            first_turn,
            turn: first_turn,
            local_ready: false,
            opponent_ready: false,
            result: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    pub fn winner(&self) -> Option<Side> {
        match self.result {
            Some(MatchResult::Winner(side)) => Some(side),
            _ => None,
        }
    }

    pub fn local_board(&self) -> &Board {
        &self.local
    }

    pub fn opponent_board(&self) -> &Board {
        &self.opponent
    }

    pub fn is_ready(&self, side: Side) -> bool {
        match side {
            Side::Local => self.local_ready,
            Side::Opponent => self.opponent_ready,
        }
    }

    /// Size of the next local ship to place, `None` once the fleet is complete.
    pub fn next_ship_size(&self) -> Option<u8> {
        self.local.next_ship_size()
    }

    /// Place the next local ship. `Ok(None)` is a silently rejected placement
    /// and leaves placement progress where it was.
    pub fn place_local(
        &mut self,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<Option<ShipId>, MatchError> {
        self.expect_phase(Phase::Placement)?;
        let size = self.next_ship_size().ok_or(MatchError::FleetComplete)?;
        Ok(self
            .local
            .with_ship(anchor, size, orientation)
            .map(|(board, id)| {
                self.local = board;
                id
            }))
    }

    /// Replace the local layout with a randomly generated full fleet.
    pub fn randomize_local<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), MatchError> {
        self.expect_phase(Phase::Placement)?;
        self.local = generate_random_board(rng)?;
        Ok(())
    }

    /// Install the scripted opponent's fleet and mark it ready.
    pub fn set_opponent_fleet(&mut self, board: Board) -> Result<(), MatchError> {
        self.expect_phase(Phase::Placement)?;
        if !board.fleet_complete() {
            return Err(MatchError::FleetIncomplete);
        }
        self.opponent = board;
        self.mark_ready(Side::Opponent)
    }

    /// Signal that `side` has finished placement. Play begins once both sides
    /// are ready. The opponent's readiness is taken on trust.
    pub fn mark_ready(&mut self, side: Side) -> Result<(), MatchError> {
        self.expect_phase(Phase::Placement)?;
        match side {
            Side::Local => {
                if !self.local.fleet_complete() {
                    return Err(MatchError::FleetIncomplete);
                }
                self.local_ready = true;
            }
            Side::Opponent => self.opponent_ready = true,
        }
        if self.local_ready && self.opponent_ready {
            self.phase = Phase::Playing;
            self.turn = self.first_turn;
        }
        Ok(())
    }

    /// Check that `shooter` may fire at `at` now: play is on, it is their
    /// turn, and the target is on the board and not yet resolved.
    pub fn validate_shot(&self, shooter: Side, at: Coordinate) -> Result<(), MatchError> {
        self.expect_turn(shooter)?;
        if self.board(shooter.other()).is_fired(at) {
            return Err(MatchError::AlreadyFired(at));
        }
        Ok(())
    }

    /// Resolve a shot by `shooter` against the board this match holds
    /// authoritatively for the other side.
    ///
    /// `AlreadyShot` leaves the match untouched. Otherwise a miss passes the
    /// turn and the target board is checked for defeat.
    pub fn fire(&mut self, shooter: Side, at: Coordinate) -> Result<ShotOutcome, MatchError> {
        self.expect_turn(shooter)?;
        let target = self.board_mut(shooter.other());
        let (next, outcome) = apply_shot(target, at);
        if outcome.is_resolved() {
            *target = next;
            self.after_shot(shooter, &outcome);
        }
        Ok(outcome)
    }

    /// Apply an outcome reported by the remote defender for a local shot.
    pub fn record_remote_outcome(
        &mut self,
        at: Coordinate,
        outcome: &ShotOutcome,
    ) -> Result<(), MatchError> {
        self.expect_turn(Side::Local)?;
        if !outcome.is_resolved() {
            return Err(MatchError::UnreportableOutcome);
        }
        if self.opponent.is_fired(at) {
            return Err(MatchError::AlreadyFired(at));
        }
        self.opponent = apply_remote_outcome(&self.opponent, at, outcome);
        self.after_shot(Side::Local, outcome);
        Ok(())
    }

    /// End the match with no winner. A finished match keeps its result.
    pub fn abort(&mut self) {
        if self.phase != Phase::GameOver {
            self.phase = Phase::GameOver;
            self.result = Some(MatchResult::Aborted);
        }
    }

    /// Return to a fresh placement phase with empty boards.
    pub fn reset(&mut self) {
        *self = Match::new(self.first_turn);
    }

    fn after_shot(&mut self, shooter: Side, outcome: &ShotOutcome) {
        if self.board(shooter.other()).is_defeated() {
            self.phase = Phase::GameOver;
            self.result = Some(MatchResult::Winner(shooter));
        } else if !outcome.keeps_turn() {
            self.turn = shooter.other();
        }
    }

    fn board(&self, side: Side) -> &Board {
        match side {
            Side::Local => &self.local,
            Side::Opponent => &self.opponent,
        }
    }

    fn board_mut(&mut self, side: Side) -> &mut Board {
        match side {
            Side::Local => &mut self.local,
            Side::Opponent => &mut self.opponent,
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), MatchError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(MatchError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn expect_turn(&self, side: Side) -> Result<(), MatchError> {
        self.expect_phase(Phase::Playing)?;
        if self.turn == side {
            Ok(())
        } else {
            Err(MatchError::NotYourTurn(side))
        }
    }
}
