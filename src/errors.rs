//! Error types for the orchestrator-facing operations.
//!
//! Rules queries (`is_legal_move`, `is_in_check`, ...) are total and answer
//! with plain values. Only operations that change session state or parse
//! external input report failures through these enums.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Side, Square};

/// Represents all possible failures of a requested game action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Algebraic coordinate could not be parsed.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraic(String),

    /// The origin square is empty.
    #[error("no piece at {0}")]
    NoPieceAtSquare(Square),

    /// The origin square holds a piece of the other side.
    #[error("piece at {square} does not belong to {side:?}")]
    WrongSide { square: Square, side: Side },

    /// The legality filter rejected the move.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// Promotion requested on a square without a pawn on its far rank, or to a
    /// piece type a pawn cannot become.
    #[error("cannot promote at {square} to {kind:?}")]
    InvalidPromotion { square: Square, kind: PieceKind },

    /// A promotion choice is outstanding; nothing else may happen first.
    #[error("a promotion at {0} must be resolved first")]
    PromotionPending(Square),

    /// `promote` was called with no promotion outstanding.
    #[error("no promotion is pending")]
    NoPromotionPending,

    /// The side has no special-ability charges left.
    #[error("{0:?} has no ability charges left")]
    NoAbilityCharges(Side),

    /// Ability target must be an empty square.
    #[error("ability target {0} is occupied")]
    AbilityTargetOccupied(Square),

    /// No opposing piece can be lured onto the target.
    #[error("no piece can be lured to {0}")]
    NothingToLure(Square),

    /// The lure would leave the user's own king attacked.
    #[error("luring a piece to {0} would expose the king")]
    AbilityExposesKing(Square),

    /// A bot reply was computed for a position that has since changed.
    #[error("bot reply for generation {reply} is stale (current {current})")]
    StaleBotReply { reply: u64, current: u64 },

    /// The game already ended.
    #[error("the game is over")]
    GameOver,

    /// Nothing left to undo or redo.
    #[error("no history to {0}")]
    NoHistory(&'static str),
}

/// Failures while decoding or validating a persisted snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

/// Failures while applying a textual bot option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Result type alias for game actions.
pub type ChessResult<T> = Result<T, ChessError>;
