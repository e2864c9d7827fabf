//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other through a
//! `GameSession`, with an optional seeded random opening prefix.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::engines::engine_random::random_legal_move;
use crate::engines::engine_trait::Engine;
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceKind, Side};
use crate::move_generation::game_status::GameStatus;
use crate::moves::move_descriptions::ChessMove;
use crate::session::game_session::{GameSession, SessionConfig, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    DogsWinCheckmate,
    CatsWinCheckmate,
    DrawStalemate,
    DrawRepetition,
    DrawFiftyMove,
    DrawInsufficientMaterial,
    DrawMaxPlies,
}

impl MatchOutcome {
    /// Outcome for a terminal `status` with `side_to_move` on move.
    fn from_status(status: GameStatus, side_to_move: Side) -> Option<Self> {
        Some(match status {
            GameStatus::Checkmate => match side_to_move {
                Side::Dogs => MatchOutcome::CatsWinCheckmate,
                Side::Cats => MatchOutcome::DogsWinCheckmate,
            },
            GameStatus::Stalemate => MatchOutcome::DrawStalemate,
            GameStatus::DrawRepetition => MatchOutcome::DrawRepetition,
            GameStatus::DrawFiftyMove => MatchOutcome::DrawFiftyMove,
            GameStatus::DrawInsufficientMaterial => MatchOutcome::DrawInsufficientMaterial,
            GameStatus::Ongoing | GameStatus::Check => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Random moves played before the engines take over.
    pub opening_plies: u8,
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_plies: 0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub plies: u32,
    pub notation: Vec<String>,
    pub final_state: SessionState,
    pub dogs_total_time_ns: u128,
    pub cats_total_time_ns: u128,
}

/// Play one game between `dogs` and `cats` from the starting position.
pub fn play_bot_match(
    dogs: &mut dyn Engine,
    cats: &mut dyn Engine,
    config: MatchConfig,
) -> ChessResult<MatchResult> {
    dogs.new_game();
    cats.new_game();

    let mut session = GameSession::new(SessionConfig::default());
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut plies = 0u32;
    let mut dogs_total_time_ns = 0u128;
    let mut cats_total_time_ns = 0u128;

    let outcome = loop {
        let side = session.side_to_move();
        if let Some(outcome) = MatchOutcome::from_status(session.status(), side) {
            break outcome;
        }
        if plies >= u32::from(config.max_plies) {
            break MatchOutcome::DrawMaxPlies;
        }

        let position = session.position();
        let chosen = if plies < u32::from(config.opening_plies) {
            random_legal_move(&position, side, &mut rng)
        } else {
            let started = Instant::now();
            let out = match side {
                Side::Dogs => dogs.choose_move(&position, side),
                Side::Cats => cats.choose_move(&position, side),
            };
            let elapsed_ns = started.elapsed().as_nanos();
            match side {
                Side::Dogs => dogs_total_time_ns = dogs_total_time_ns.saturating_add(elapsed_ns),
                Side::Cats => cats_total_time_ns = cats_total_time_ns.saturating_add(elapsed_ns),
            }
            out.best_move
                .or_else(|| random_legal_move(&position, side, &mut rng))
        };

        let Some(mv) = chosen else {
            // Only reachable on a terminal position, which was handled above.
            return Err(ChessError::GameOver);
        };
        play(&mut session, mv)?;
        plies += 1;
    };

    info!(?outcome, plies, "match finished");

    let final_state = session.state().clone();
    Ok(MatchResult {
        outcome,
        plies,
        notation: final_state.move_notation.clone(),
        final_state,
        dogs_total_time_ns,
        cats_total_time_ns,
    })
}

fn play(session: &mut GameSession, mv: ChessMove) -> ChessResult<()> {
    let outcome = session.make_move(mv.from, mv.to)?;
    if outcome.promotion_pending {
        session.promote(mv.promotion.unwrap_or(PieceKind::Queen))?;
    }
    Ok(())
}
