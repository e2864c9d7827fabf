//! Pseudo-legal destination dispatch.
//!
//! Nothing in here consults check status. The legality filter calls into
//! these rules, so they must stay free of any legality recursion.

use crate::game_state::board::Position;
use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::pawn_moves::pawn_moves;
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

/// Destinations the piece on `from` may reach by its movement pattern,
/// ignoring whether the mover's king would be left in check. Empty when
/// `from` is empty.
pub fn pseudo_legal_moves(position: &Position, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    if let Some(piece) = position.board.get(from) {
        push_pseudo_legal_moves(position, from, piece, &mut out);
    }
    out
}

pub(crate) fn push_pseudo_legal_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    out: &mut Vec<Square>,
) {
    let board = &position.board;
    match piece.kind {
        PieceKind::Pawn => pawn_moves(position, from, piece.side, piece.has_moved, out),
        PieceKind::Knight => knight_moves(board, from, piece.side, out),
        PieceKind::Bishop => bishop_moves(board, from, piece.side, out),
        PieceKind::Rook => rook_moves(board, from, piece.side, out),
        PieceKind::Queen => queen_moves(board, from, piece.side, out),
        PieceKind::King => king_moves(board, from, piece.side, out),
    }
}
