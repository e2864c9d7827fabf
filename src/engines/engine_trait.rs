//! Engine abstraction layer used by the session and the match harness.
//!
//! Defines the bot configuration and output payload so different move
//! pickers (search bot, random mover, test doubles) can be selected at
//! runtime behind a single trait interface.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::game_state::board::Position;
use crate::game_state::chess_types::Side;
use crate::moves::move_descriptions::ChessMove;
use crate::search::alpha_beta::SearchConfig;

/// How far the bot may stray from its top-scored move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn default_depth(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Probability of picking among the top `n` instead of the best move,
    /// and that `n`. `None` means the best move is always played.
    pub const fn deviation(self) -> Option<(f64, usize)> {
        match self {
            Difficulty::Easy => Some((0.7, 5)),
            Difficulty::Medium => Some((0.4, 3)),
            Difficulty::Hard => None,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(invalid("Difficulty", value)),
        }
    }
}

/// Additive root-move bonuses layered over the search score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Personality {
    #[default]
    Balanced,
    /// Rewards captures.
    Aggressive,
    /// Rewards landing next to friendly pieces.
    Defensive,
}

impl FromStr for Personality {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Personality::Balanced),
            "aggressive" => Ok(Personality::Aggressive),
            "defensive" => Ok(Personality::Defensive),
            _ => Err(invalid("Personality", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub difficulty: Difficulty,
    pub personality: Personality,
    /// Overrides the difficulty's default depth.
    pub max_depth: Option<u8>,
    /// Soft budget the search checks itself against.
    pub time_budget_ms: u64,
    /// The hard ceiling at the call site is this many soft budgets.
    pub outer_ceiling_factor: u32,
    pub deep_move_limit: Option<usize>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

impl BotConfig {
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            personality: Personality::Balanced,
            max_depth: None,
            time_budget_ms: 3_000,
            outer_ceiling_factor: 10,
            deep_move_limit: Some(12),
        }
    }

    pub fn depth(&self) -> u8 {
        self.max_depth
            .unwrap_or_else(|| self.difficulty.default_depth())
            .max(1)
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    pub fn outer_ceiling(&self) -> Duration {
        self.time_budget()
            .saturating_mul(self.outer_ceiling_factor.max(1))
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth(),
            time_budget: self.time_budget(),
            deep_move_limit: self.deep_move_limit,
        }
    }

    /// Applies a textual option. Names are case-insensitive.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "difficulty" => self.difficulty = value.parse()?,
            "personality" => self.personality = value.parse()?,
            "depth" => {
                let depth: u8 = value.trim().parse().map_err(|_| invalid(name, value))?;
                if depth == 0 {
                    return Err(invalid(name, value));
                }
                self.max_depth = Some(depth);
            }
            "movetimems" => {
                self.time_budget_ms = value.trim().parse().map_err(|_| invalid(name, value))?;
            }
            "deepmovelimit" => {
                let value = value.trim();
                self.deep_move_limit = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.parse().map_err(|_| invalid(name, value))?)
                };
            }
            _ => return Err(ConfigError::UnknownOption(name.to_owned())),
        }
        Ok(())
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Picks a move for `side`. `best_move` is `None` only when `side` has
    /// no legal move.
    fn choose_move(&mut self, position: &Position, side: Side) -> EngineOutput;
}
