//! Canonical rule constants.
//!
//! Static literals used by setup, draw detection and evaluation.

use crate::game_state::chess_types::PieceKind;

/// Back-rank layout from file a to file h, identical for both sides.
pub const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Half-moves without a capture or pawn move that draw the game.
pub const FIFTY_MOVE_HALF_MOVES: u32 = 100;

/// Minimum history length before a threefold repetition can be claimed.
pub const MIN_REPETITION_HISTORY: usize = 5;

/// Occurrences of one position signature that draw the game.
pub const REPETITION_COUNT: usize = 3;

/// King lands on this file when castling toward the h-file rook.
pub const KINGSIDE_KING_FILE: u8 = 6;
pub const KINGSIDE_ROOK_FILE: u8 = 5;
/// King lands on this file when castling toward the a-file rook.
pub const QUEENSIDE_KING_FILE: u8 = 2;
pub const QUEENSIDE_ROOK_FILE: u8 = 3;

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}
