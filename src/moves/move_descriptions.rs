//! Move requests and move outcomes.
//!
//! A `ChessMove` is what a player (or the bot) asks for; a `MoveResult` is
//! what the executor reports back after applying it.

use serde::{Deserialize, Serialize};

use crate::game_state::board::{Board, Position};
use crate::game_state::chess_types::{Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    /// Piece chosen for a pawn reaching its far rank.
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Resulting board together with the en-passant target the move created.
    pub position: Position,
    pub captured_piece: Option<Piece>,
    pub is_castling: bool,
    pub is_en_passant: bool,
    /// Set when a pawn reached its far rank; the pawn is still a pawn until
    /// `promote` is called.
    pub is_promotion: bool,
    pub promotion_square: Option<Square>,
}

impl MoveResult {
    /// A result that changes nothing except expiring the en-passant target.
    pub(crate) fn unchanged(position: &Position) -> Self {
        Self {
            position: Position::from_board(position.board),
            captured_piece: None,
            is_castling: false,
            is_en_passant: false,
            is_promotion: false,
            promotion_square: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.position.board
    }
}
