//! Uniformly random legal mover.
//!
//! Used as the outer-ceiling fallback, as a weak sparring partner in the
//! match harness, and for diagnostics.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::board::Position;
use crate::game_state::chess_types::Side;
use crate::move_generation::legal_move_filter::legal_moves;
use crate::moves::move_descriptions::ChessMove;

/// A uniformly chosen legal move, or `None` if `side` cannot move.
pub fn random_legal_move<R: Rng + ?Sized>(
    position: &Position,
    side: Side,
    rng: &mut R,
) -> Option<ChessMove> {
    legal_moves(position, side).choose(rng).copied()
}

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Pawprint Random"
    }

    fn choose_move(&mut self, position: &Position, side: Side) -> EngineOutput {
        let moves = legal_moves(position, side);
        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine legal_moves {}", moves.len()));
        out.best_move = moves.choose(&mut self.rng).copied();
        out
    }
}
