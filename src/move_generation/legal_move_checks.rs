//! Attack and check detection.
//!
//! These routines only look at raw piece movement patterns (pawns restricted
//! to their diagonals) and never call back into the legality filter.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Side, Square};
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

/// True iff a piece of `side` stands on `side`'s king square and at least one
/// opposing piece attacks it. A missing king is never in check.
#[inline]
pub fn is_in_check(board: &Board, side: Side) -> bool {
    let Some(king_sq) = board.king_square(side) else {
        return false;
    };
    is_square_attacked(board, king_sq, side.opposite())
}

/// Whether any piece of `attacker` attacks `square`.
///
/// Looks outward from the target square, which is equivalent to asking every
/// attacker for its attack set but touches far fewer squares.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Side) -> bool {
    // An attacking pawn sits one row behind the target, from its own view.
    let pawn_row_step = -attacker.pawn_direction();
    for d_col in [-1i8, 1] {
        if occupied_by(board, square.offset(pawn_row_step, d_col), PieceKind::Pawn, attacker) {
            return true;
        }
    }

    for (d_row, d_col) in KNIGHT_OFFSETS {
        if occupied_by(board, square.offset(d_row, d_col), PieceKind::Knight, attacker) {
            return true;
        }
    }

    for (d_row, d_col) in KING_OFFSETS {
        if occupied_by(board, square.offset(d_row, d_col), PieceKind::King, attacker) {
            return true;
        }
    }

    let diagonal = [PieceKind::Bishop, PieceKind::Queen];
    for (d_row, d_col) in BISHOP_DIRECTIONS {
        if first_hit_is(board, square, d_row, d_col, attacker, &diagonal) {
            return true;
        }
    }

    let straight = [PieceKind::Rook, PieceKind::Queen];
    for (d_row, d_col) in ROOK_DIRECTIONS {
        if first_hit_is(board, square, d_row, d_col, attacker, &straight) {
            return true;
        }
    }

    false
}

#[inline]
fn occupied_by(board: &Board, square: Option<Square>, kind: PieceKind, side: Side) -> bool {
    square
        .and_then(|sq| board.get(sq))
        .is_some_and(|piece| piece.is(kind, side))
}

fn first_hit_is(
    board: &Board,
    from: Square,
    d_row: i8,
    d_col: i8,
    side: Side,
    kinds: &[PieceKind],
) -> bool {
    let mut current = from;
    while let Some(next) = current.offset(d_row, d_col) {
        if let Some(piece) = board.get(next) {
            return piece.side == side && kinds.contains(&piece.kind);
        }
        current = next;
    }
    false
}
