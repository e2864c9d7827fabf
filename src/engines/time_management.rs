//! Outer time ceiling for bot moves.
//!
//! The search keeps to its own soft budget. This module is the second tier:
//! the engine runs on a worker thread and the caller waits at most the outer
//! ceiling for its answer. A late engine is abandoned (there is no way to
//! cancel it) and a random legal move is played instead; a panicking or
//! misbehaving engine yields the first legal move. Either way the turn is
//! never blocked.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::engines::engine_bot::BotEngine;
use crate::engines::engine_trait::{BotConfig, Engine};
use crate::game_state::board::Position;
use crate::game_state::chess_types::Side;
use crate::move_generation::legal_move_filter::legal_moves;
use crate::moves::move_descriptions::ChessMove;

/// Runs `engine` on its own thread and waits at most `ceiling` for it.
///
/// Returns `None` only when `side` has no legal move.
pub fn select_with_ceiling<R: Rng + ?Sized>(
    mut engine: Box<dyn Engine>,
    position: &Position,
    side: Side,
    ceiling: Duration,
    rng: &mut R,
) -> Option<ChessMove> {
    let legal = legal_moves(position, side);
    if legal.is_empty() {
        debug!(?side, "no legal move for bot");
        return None;
    }

    let (tx, rx) = mpsc::channel();
    let snapshot = *position;
    let spawned = thread::Builder::new()
        .name("pawprint-search".to_owned())
        .spawn(move || {
            let out = engine.choose_move(&snapshot, side);
            // The receiver is gone if the ceiling already passed.
            let _ = tx.send(out.best_move);
        });
    if let Err(err) = spawned {
        warn!(%err, "could not spawn search thread, playing first legal move");
        return legal.first().copied();
    }

    match rx.recv_timeout(ceiling) {
        Ok(Some(mv)) if legal.contains(&mv) => Some(mv),
        Ok(Some(mv)) => {
            warn!(?mv, "engine returned an illegal move, playing first legal move");
            legal.first().copied()
        }
        Ok(None) => {
            warn!("engine returned no move although legal moves exist");
            legal.first().copied()
        }
        Err(RecvTimeoutError::Timeout) => {
            warn!(
                ceiling_ms = ceiling.as_millis() as u64,
                "search exceeded outer ceiling, playing a random legal move"
            );
            legal.choose(rng).copied()
        }
        Err(RecvTimeoutError::Disconnected) => {
            warn!("search thread died, playing first legal move");
            legal.first().copied()
        }
    }
}

/// The bot's move for `side` under `config`, bounded by its outer ceiling.
pub fn select_bot_move(position: &Position, side: Side, config: &BotConfig) -> Option<ChessMove> {
    select_with_ceiling(
        Box::new(BotEngine::new(*config)),
        position,
        side,
        config.outer_ceiling(),
        &mut rand::rng(),
    )
}
