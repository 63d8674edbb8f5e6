//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    apply_remote_outcome, apply_shot, choose_move, generate_random_board, Board, CellStatus,
    Coordinate, Match, MatchResult, Orientation, Phase, ShotOutcome, Side,
};

pub use crate::session::{Command, PeerSession, SessionConfig, SoloSession};
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
