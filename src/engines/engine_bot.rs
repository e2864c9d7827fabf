//! The playing bot: alpha-beta search plus personality and difficulty.
//!
//! The search ranks every root move. Personality adds a flat bonus per root
//! move on top of the search score, then difficulty decides whether the top
//! move is played or a random pick from the top few.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engines::engine_trait::{BotConfig, Difficulty, Engine, EngineOutput, Personality};
use crate::errors::ConfigError;
use crate::game_state::board::{Board, Position};
use crate::game_state::chess_rules::piece_value;
use crate::game_state::chess_types::{Side, Square};
use crate::move_generation::legal_move_apply::apply_chess_move;
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::move_descriptions::ChessMove;
use crate::search::alpha_beta::{search_best_move, ScoredMove};
use crate::search::board_scoring::{BoardScorer, MaterialPositionalScorer};

const CAPTURE_BONUS: i32 = 50;
const NEIGHBOUR_BONUS: i32 = 12;

pub struct BotEngine<S: BoardScorer = MaterialPositionalScorer> {
    config: BotConfig,
    scorer: S,
    rng: StdRng,
}

impl BotEngine<MaterialPositionalScorer> {
    pub fn new(config: BotConfig) -> Self {
        Self::with_scorer(config, MaterialPositionalScorer, StdRng::from_rng(&mut rand::rng()))
    }

    /// Reproducible difficulty sampling.
    pub fn with_seed(config: BotConfig, seed: u64) -> Self {
        Self::with_scorer(config, MaterialPositionalScorer, StdRng::seed_from_u64(seed))
    }
}

impl<S: BoardScorer> BotEngine<S> {
    pub fn with_scorer(config: BotConfig, scorer: S, rng: StdRng) -> Self {
        Self { config, scorer, rng }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }
}

/// Root bonus for `mv` under `personality`.
pub fn personality_bonus(
    personality: Personality,
    position: &Position,
    side: Side,
    mv: ChessMove,
) -> i32 {
    match personality {
        Personality::Balanced => 0,
        Personality::Aggressive => {
            let result = apply_chess_move(position, mv);
            result
                .captured_piece
                .map(|victim| CAPTURE_BONUS + piece_value(victim.kind) / 10)
                .unwrap_or(0)
        }
        Personality::Defensive => {
            let result = apply_chess_move(position, mv);
            NEIGHBOUR_BONUS * friendly_neighbours(result.board(), mv.to, side)
        }
    }
}

fn friendly_neighbours(board: &Board, square: Square, side: Side) -> i32 {
    KING_OFFSETS
        .iter()
        .filter_map(|(dr, dc)| square.offset(*dr, *dc))
        .filter(|sq| board.get(*sq).is_some_and(|p| p.side == side))
        .count() as i32
}

/// Picks from moves already sorted best first.
pub fn pick_by_difficulty<R: Rng + ?Sized>(
    ranked: &[ScoredMove],
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<ChessMove> {
    let best = ranked.first()?;
    match difficulty.deviation() {
        Some((probability, top_n)) if rng.random_bool(probability) => {
            let pool = &ranked[..top_n.min(ranked.len())];
            pool.choose(rng).map(|scored| scored.mv)
        }
        _ => Some(best.mv),
    }
}

impl<S: BoardScorer> Engine for BotEngine<S> {
    fn name(&self) -> &str {
        "Pawprint Bot"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        self.config.set_option(name, value)
    }

    fn choose_move(&mut self, position: &Position, side: Side) -> EngineOutput {
        let result = search_best_move(position, side, &self.scorer, self.config.search_config());

        let mut ranked: Vec<ScoredMove> = result
            .root_moves
            .iter()
            .map(|scored| ScoredMove {
                mv: scored.mv,
                score: scored.score
                    + personality_bonus(self.config.personality, position, side, scored.mv),
            })
            .collect();
        // Stable: equal scores keep generation order.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        let picked =
            pick_by_difficulty(&ranked, self.config.difficulty, &mut self.rng).or(result.best_move);

        debug!(
            ?side,
            difficulty = ?self.config.difficulty,
            personality = ?self.config.personality,
            candidates = ranked.len(),
            "bot picked {:?}",
            picked
        );

        let mut out = EngineOutput {
            best_move: picked,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} nodes {} time {} score cp {}",
            result.reached_depth, result.nodes, result.elapsed_ms, result.best_score
        ));
        if result.timed_out {
            out.info_lines
                .push("info string bot_engine soft_budget_expired".to_owned());
        }
        out
    }
}
