//! Persisted game snapshots.
//!
//! A snapshot is the session state plus a format version and a timestamp,
//! stored as JSON. Loading validates the whole snapshot before anything in
//! the session is replaced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::SnapshotError;
use crate::game_state::chess_types::{PieceKind, Side};
use crate::session::game_session::{GameSession, SessionState};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: SessionState,
}

impl GameSnapshot {
    pub fn capture(state: &SessionState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            state: state.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes and validates.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let state = &self.state;
        for side in [Side::Dogs, Side::Cats] {
            let kings = state
                .board
                .pieces_of(side)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(corrupt(format!("{side:?} has {kings} kings")));
            }
        }

        if let Some((square, _)) = state
            .board
            .pieces()
            .find(|(sq, piece)| piece.kind == PieceKind::Pawn && (sq.row() == 0 || sq.row() == 7))
        {
            return Err(corrupt(format!("pawn on back rank at {square}")));
        }

        if let Some(target) = state.en_passant {
            // The pawn that just double-stepped belongs to the side not to move.
            let mover = state.side_to_move.opposite();
            let pawn_ok = state
                .board
                .get(target.pawn_square)
                .is_some_and(|p| p.is(PieceKind::Pawn, mover));
            let behind = target
                .pawn_square
                .offset(-mover.pawn_direction(), 0)
                .is_some_and(|sq| sq == target.capture_square);
            if !pawn_ok || !behind || !state.board.is_empty_at(target.capture_square) {
                return Err(corrupt(format!(
                    "en-passant target {} does not match the board",
                    target.capture_square
                )));
            }
        }

        match state.position_history.last() {
            Some(last) if *last == state.board.signature() => Ok(()),
            Some(_) => Err(corrupt("position history does not end with the board".into())),
            None => Err(corrupt("position history is empty".into())),
        }
    }
}

fn corrupt(reason: String) -> SnapshotError {
    SnapshotError::Corrupt(reason)
}

impl GameSession {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self.state())
    }

    pub fn save(&self) -> Result<String, SnapshotError> {
        self.snapshot().to_json()
    }

    /// Replaces the game with the snapshot in `json`. On any error the
    /// session is left exactly as it was.
    pub fn load(&mut self, json: &str) -> Result<(), SnapshotError> {
        let snapshot = GameSnapshot::from_json(json).inspect_err(|err| {
            warn!(%err, "rejecting snapshot");
        })?;
        self.replace_state(snapshot.state);
        Ok(())
    }
}
