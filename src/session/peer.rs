use log::{debug, info, warn};
use rand::rngs::SmallRng;
use tokio::sync::{mpsc, watch};

use crate::core::{Coordinate, Match, MatchError, MatchResult, Phase, Side};
use crate::protocol::Message;
use crate::session::{Command, SessionConfig};
use crate::transport::{Transport, TransportEvent};

/// Match controller for a game against a remote peer.
///
/// The local board is authoritative: inbound `SHOT`s are resolved here and
/// answered with `SHOT_RESULT`. The opponent board is a view rebuilt only from
/// the peer's `SHOT_RESULT`s. Losing the connection aborts the match.
pub struct PeerSession<T: Transport> {
    game: Match,
    transport: T,
    rng: SmallRng,
    pending_shot: Option<Coordinate>,
    connected: bool,
    closed: bool,
}

impl<T: Transport> PeerSession<T> {
    pub fn new(transport: T, config: SessionConfig, rng: SmallRng) -> Self {
        Self {
            game: Match::new(config.first_turn),
            transport,
            rng,
            pending_shot: None,
            connected: false,
            closed: false,
        }
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Whether the transport has opened and not yet closed.
    pub fn is_connected(&self) -> bool {
        self.connected && !self.closed
    }

    /// Local shot sent and still waiting for its `SHOT_RESULT`.
    pub fn pending_shot(&self) -> Option<Coordinate> {
        self.pending_shot
    }

    /// Apply one local command. Rejected commands leave the session as it was.
    pub async fn handle_command(&mut self, cmd: Command) -> Result<(), MatchError> {
        match cmd {
            Command::Place { at, orientation } => {
                self.game.place_local(at, orientation)?;
            }
            Command::Randomize => self.game.randomize_local(&mut self.rng)?,
            Command::Ready => {
                self.game.mark_ready(Side::Local)?;
                self.send(Message::Ready).await;
                self.log_phase();
            }
            Command::Fire(at) => {
                self.game.validate_shot(Side::Local, at)?;
                if self.pending_shot.is_some() {
                    return Err(MatchError::ShotPending);
                }
                self.pending_shot = Some(at);
                self.send(Message::shot(at)).await;
            }
            Command::PlayAgain => {
                self.reset();
                self.send(Message::PlayAgain).await;
            }
            Command::Quit => self.disconnect().await,
        }
        Ok(())
    }

    /// Apply one transport event.
    pub async fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Open => {
                info!("[PeerSession] connection open");
                self.connected = true;
                self.send(Message::Hello).await;
            }
            TransportEvent::Data(msg) => self.handle_message(msg).await,
            TransportEvent::Close => {
                info!("[PeerSession] connection closed by peer");
                self.on_closed();
            }
            TransportEvent::Error(e) => {
                warn!("[PeerSession] transport error: {}", e);
                self.disconnect().await;
            }
        }
    }

    /// Wait for and apply the next transport event. Returns `false` once the
    /// connection is gone.
    pub async fn pump(&mut self) -> bool {
        match self.transport.next_event().await {
            Some(event) => self.handle_event(event).await,
            None => self.on_closed(),
        }
        !self.closed
    }

    /// Close the connection and abort the match.
    pub async fn disconnect(&mut self) {
        if !self.closed {
            self.transport.close().await;
        }
        self.on_closed();
    }

    /// Run until the player quits or the connection ends, publishing a match
    /// snapshot after every event.
    pub async fn run(
        &mut self,
        mut commands: mpsc::Receiver<Command>,
        snapshots: watch::Sender<Match>,
    ) -> Option<MatchResult> {
        snapshots.send_replace(self.game.clone());
        while !self.closed {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(cmd) => {
                        if let Err(e) = self.handle_command(cmd).await {
                            warn!("[PeerSession] command {:?} rejected: {}", cmd, e);
                        }
                    }
                    None => self.disconnect().await,
                },
                event = self.transport.next_event() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => self.on_closed(),
                },
            }
            snapshots.send_replace(self.game.clone());
        }
        self.game.result()
    }

    async fn handle_message(&mut self, msg: Message) {
        debug!("[PeerSession] received {:?}", msg);
        match msg {
            Message::Hello => debug!("[PeerSession] peer said hello"),
            Message::Ready => match self.game.mark_ready(Side::Opponent) {
                Ok(()) => self.log_phase(),
                Err(e) => warn!("[PeerSession] ignoring READY: {}", e),
            },
            Message::Shot { x, y } => {
                let at = Coordinate::new(x, y);
                let outcome = match self.game.fire(Side::Opponent, at) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!("[PeerSession] ignoring SHOT at {}: {}", at, e);
                        return;
                    }
                };
                match Message::shot_result(at, &outcome) {
                    Some(reply) => self.send(reply).await,
                    None => debug!("[PeerSession] dropping duplicate SHOT at {}", at),
                }
                self.log_result();
            }
            Message::ShotResult {
                x,
                y,
                result,
                sunk_ship_coords,
            } => {
                let at = Coordinate::new(x, y);
                if self.pending_shot != Some(at) {
                    warn!(
                        "[PeerSession] ignoring SHOT_RESULT for {}, pending shot is {:?}",
                        at, self.pending_shot
                    );
                    return;
                }
                self.pending_shot = None;
                let outcome = result.into_outcome(sunk_ship_coords);
                if let Err(e) = self.game.record_remote_outcome(at, &outcome) {
                    warn!("[PeerSession] ignoring SHOT_RESULT for {}: {}", at, e);
                    return;
                }
                self.log_result();
            }
            Message::PlayAgain => {
                info!("[PeerSession] peer asked to play again");
                self.reset();
            }
        }
    }

    async fn send(&mut self, msg: Message) {
        if self.closed {
            return;
        }
        debug!("[PeerSession] sending {:?}", msg);
        if let Err(e) = self.transport.send(msg).await {
            warn!("[PeerSession] send failed: {}", e);
            self.disconnect().await;
        }
    }

    fn reset(&mut self) {
        self.game.reset();
        self.pending_shot = None;
    }

    fn on_closed(&mut self) {
        self.closed = true;
        self.pending_shot = None;
        self.game.abort();
    }

    fn log_phase(&self) {
        if self.game.phase() == Phase::Playing {
            info!(
                "[PeerSession] both sides ready, {:?} moves first",
                self.game.turn()
            );
        }
    }

    fn log_result(&self) {
        if let Some(MatchResult::Winner(side)) = self.game.result() {
            info!("[PeerSession] game over, winner: {:?}", side);
        }
    }
}
