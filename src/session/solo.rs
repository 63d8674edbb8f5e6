use core::time::Duration;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

use crate::core::{
    choose_move, generate_random_board, Coordinate, Match, MatchError, MatchResult, Phase,
    ShotOutcome, Side,
};
use crate::session::{Command, SessionConfig};

/// Match controller for a game against the scripted opponent.
///
/// Both boards are authoritative. The opponent's fleet is generated when the
/// player signals ready, and each opponent shot fires after a fixed delay. The
/// delay is cosmetic: a reset or a new match drops any pending shot.
pub struct SoloSession {
    game: Match,
    rng: SmallRng,
    opponent_delay: Duration,
    opponent_due: Option<Instant>,
}

impl SoloSession {
    pub fn new(config: SessionConfig, rng: SmallRng) -> Self {
        Self {
            game: Match::new(config.first_turn),
            rng,
            opponent_delay: config.opponent_delay,
            opponent_due: None,
        }
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Whether an opponent shot is scheduled.
    pub fn opponent_move_pending(&self) -> bool {
        self.opponent_due.is_some()
    }

    /// Apply one local command. `Quit` is handled by [`SoloSession::run`] and
    /// is a no-op here.
    pub fn handle_command(&mut self, cmd: Command) -> Result<(), MatchError> {
        match cmd {
            Command::Place { at, orientation } => {
                self.game.place_local(at, orientation)?;
            }
            Command::Randomize => self.game.randomize_local(&mut self.rng)?,
            Command::Ready => {
                self.game.mark_ready(Side::Local)?;
                let fleet = generate_random_board(&mut self.rng)?;
                self.game.set_opponent_fleet(fleet)?;
                info!("[SoloSession] match started, {:?} moves first", self.game.turn());
                self.schedule_opponent();
            }
            Command::Fire(at) => {
                let outcome = self.game.fire(Side::Local, at)?;
                debug!("[SoloSession] player fired at {}: {:?}", at, outcome);
                self.log_result();
                self.schedule_opponent();
            }
            Command::PlayAgain => {
                self.game.reset();
                self.opponent_due = None;
            }
            Command::Quit => {}
        }
        Ok(())
    }

    /// Take the scripted opponent's shot now, if it is its turn. Schedules the
    /// next one when the shot keeps the turn.
    pub fn opponent_move(&mut self) -> Option<(Coordinate, ShotOutcome)> {
        self.opponent_due = None;
        if self.game.phase() != Phase::Playing || self.game.turn() != Side::Opponent {
            return None;
        }
        let at = choose_move(self.game.local_board(), &mut self.rng)?;
        let outcome = match self.game.fire(Side::Opponent, at) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("[SoloSession] opponent shot at {} rejected: {}", at, e);
                return None;
            }
        };
        debug!("[SoloSession] opponent fired at {}: {:?}", at, outcome);
        self.log_result();
        self.schedule_opponent();
        Some((at, outcome))
    }

    /// Run until the player quits, publishing a match snapshot after every
    /// event.
    pub async fn run(
        &mut self,
        mut commands: mpsc::Receiver<Command>,
        snapshots: watch::Sender<Match>,
    ) -> Option<MatchResult> {
        snapshots.send_replace(self.game.clone());
        loop {
            let due = self.opponent_due;
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    None | Some(Command::Quit) => break,
                    Some(cmd) => {
                        if let Err(e) = self.handle_command(cmd) {
                            warn!("[SoloSession] command {:?} rejected: {}", cmd, e);
                        }
                    }
                },
                _ = wait_until(due) => {
                    self.opponent_move();
                }
            }
            snapshots.send_replace(self.game.clone());
        }
        self.game.result()
    }

    fn schedule_opponent(&mut self) {
        if self.game.phase() == Phase::Playing && self.game.turn() == Side::Opponent {
            self.opponent_due = Some(Instant::now() + self.opponent_delay);
        }
    }

    fn log_result(&self) {
        if let Some(MatchResult::Winner(side)) = self.game.result() {
            info!("[SoloSession] game over, winner: {:?}", side);
        }
    }
}

async fn wait_until(due: Option<Instant>) {
    match due {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
