//! Peer wire protocol.
//!
//! Messages are JSON objects tagged by `type`:
//!
//! ```text
//! {"type":"HELLO"}
//! {"type":"READY"}
//! {"type":"SHOT","x":3,"y":7}
//! {"type":"SHOT_RESULT","x":3,"y":7,"result":"sunk","sunkShipCoords":[{"x":3,"y":7}]}
//! {"type":"PLAY_AGAIN"}
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Coordinate, ShotOutcome};

/// Outcome of a shot as reported on the wire. There is no `alreadyShot`: a
/// defender drops duplicate shots instead of answering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    Hit,
    Miss,
    Sunk,
}

/// Messages exchanged between two peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Sent by each side as soon as the connection opens.
    Hello,
    /// Sender has placed its whole fleet.
    Ready,
    /// Sender fires at the receiver's board.
    Shot { x: u8, y: u8 },
    /// Defender's resolution of a previous `Shot`.
    ShotResult {
        x: u8,
        y: u8,
        result: ShotResult,
        #[serde(
            rename = "sunkShipCoords",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        sunk_ship_coords: Option<Vec<Coordinate>>,
    },
    /// Reset both sides to a fresh placement phase.
    PlayAgain,
}

impl Message {
    pub fn shot(at: Coordinate) -> Self {
        Message::Shot { x: at.x, y: at.y }
    }

    /// The `ShotResult` answering a shot at `at`, or `None` for
    /// [`ShotOutcome::AlreadyShot`], which must never be transmitted.
    pub fn shot_result(at: Coordinate, outcome: &ShotOutcome) -> Option<Self> {
        let (result, sunk_ship_coords) = match outcome {
            ShotOutcome::Hit => (ShotResult::Hit, None),
            ShotOutcome::Miss => (ShotResult::Miss, None),
            ShotOutcome::Sunk(coords) => (ShotResult::Sunk, Some(coords.clone())),
            ShotOutcome::AlreadyShot => return None,
        };
        Some(Message::ShotResult {
            x: at.x,
            y: at.y,
            result,
            sunk_ship_coords,
        })
    }

    /// Serialize to the JSON wire form.
    pub fn encode(&self) -> anyhow::Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))
    }

    /// Parse the JSON wire form.
    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
    }
}

impl ShotResult {
    /// Rebuild the engine outcome from a wire result. A sink reported without
    /// coordinates carries an empty list.
    pub fn into_outcome(self, sunk_ship_coords: Option<Vec<Coordinate>>) -> ShotOutcome {
        match self {
            ShotResult::Hit => ShotOutcome::Hit,
            ShotResult::Miss => ShotOutcome::Miss,
            ShotResult::Sunk => ShotOutcome::Sunk(sunk_ship_coords.unwrap_or_default()),
        }
    }
}
