//! Move execution.
//!
//! `apply_move` is a pure function of the incoming position (board plus the
//! live en-passant target) and the requested squares. The en-passant target
//! for the next ply travels out inside the returned `Position`; callers that
//! undo or redo restore it from their saved positions.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::{Board, EnPassantTarget, Position};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::move_generation::castling::{can_castle, castle_landing_squares};
use crate::moves::move_descriptions::{ChessMove, MoveResult};
use crate::moves::pawn_moves::is_en_passant_capture;

/// Applies the move `from -> to` and reports what happened.
///
/// Expects a move the legality filter accepted. For anything else the result
/// is still well formed: an empty origin, or a king stepping onto its own rook
/// without castling rights, yields the unchanged board.
pub fn apply_move(position: &Position, from: Square, to: Square) -> MoveResult {
    let mut board = position.board;
    let Some(piece) = board.get(from) else {
        return MoveResult::unchanged(position);
    };

    if let Some(target) = board.get(to) {
        if target.side == piece.side {
            if piece.kind == PieceKind::King && target.kind == PieceKind::Rook {
                return apply_castle(position, from, to);
            }
            return MoveResult::unchanged(position);
        }
    }

    let mut captured_piece = None;
    let mut is_en_passant = false;

    if piece.kind == PieceKind::Pawn && is_en_passant_capture(position, from, to, piece.side) {
        if let Some(target) = position.en_passant {
            captured_piece = board.take(target.pawn_square);
            is_en_passant = true;
        }
    } else {
        captured_piece = board.get(to);
    }

    board.set(from, None);
    board.set(to, Some(piece.after_move()));

    let is_double_step = piece.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2;
    let en_passant = if is_double_step {
        Square::new((from.row() + to.row()) / 2, from.col()).map(|capture_square| {
            EnPassantTarget {
                pawn_square: to,
                capture_square,
            }
        })
    } else {
        None
    };

    let is_promotion = piece.kind == PieceKind::Pawn && to.row() == piece.side.promotion_row();

    MoveResult {
        position: Position { board, en_passant },
        captured_piece,
        is_castling: false,
        is_en_passant,
        is_promotion,
        promotion_square: is_promotion.then_some(to),
    }
}

fn apply_castle(position: &Position, king_from: Square, rook_from: Square) -> MoveResult {
    let mut board = position.board;
    if !can_castle(&board, king_from, rook_from) {
        return MoveResult::unchanged(position);
    }
    let Some((king_to, rook_to)) = castle_landing_squares(king_from, rook_from) else {
        return MoveResult::unchanged(position);
    };
    let (Some(king), Some(rook)) = (board.take(king_from), board.take(rook_from)) else {
        return MoveResult::unchanged(position);
    };
    board.set(king_to, Some(king.after_move()));
    board.set(rook_to, Some(rook.after_move()));

    MoveResult {
        position: Position::from_board(board),
        captured_piece: None,
        is_castling: true,
        is_en_passant: false,
        is_promotion: false,
        promotion_square: None,
    }
}

/// Replaces the pawn on `square` (which must stand on its far rank) with a
/// piece of `kind`, keeping its side and moved flag.
pub fn promote(board: &Board, square: Square, kind: PieceKind) -> ChessResult<Board> {
    let invalid = ChessError::InvalidPromotion { square, kind };
    let pawn = board.get(square).ok_or_else(|| invalid.clone())?;
    if pawn.kind != PieceKind::Pawn
        || square.row() != pawn.side.promotion_row()
        || !kind.is_promotion_choice()
    {
        return Err(invalid);
    }

    let mut next = *board;
    next.set(square, Some(pawn.with_kind(kind)));
    Ok(next)
}

/// Executes a complete move request: the move itself plus, when the pawn
/// reaches its far rank, the promotion (queen unless the move names one).
pub fn apply_chess_move(position: &Position, mv: ChessMove) -> MoveResult {
    let mut result = apply_move(position, mv.from, mv.to);
    if let Some(square) = result.promotion_square {
        let kind = mv.promotion.unwrap_or(PieceKind::Queen);
        if let Ok(board) = promote(&result.position.board, square, kind) {
            result.position.board = board;
        }
    }
    result
}
