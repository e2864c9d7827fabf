//! Pawn pushes, captures and en-passant captures.

use crate::game_state::board::Position;
use crate::game_state::chess_types::{PieceKind, Side, Square};

/// Pseudo-legal pawn destinations from `from` for a pawn of `side`.
pub fn pawn_moves(
    position: &Position,
    from: Square,
    side: Side,
    has_moved: bool,
    out: &mut Vec<Square>,
) {
    let board = &position.board;
    let dir = side.pawn_direction();

    if let Some(one_step) = from.offset(dir, 0) {
        if board.is_empty_at(one_step) {
            out.push(one_step);

            if !has_moved && from.row() == side.pawn_start_row() {
                if let Some(two_step) = one_step.offset(dir, 0) {
                    if board.is_empty_at(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for d_col in [-1i8, 1] {
        let Some(to) = from.offset(dir, d_col) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.side != side => out.push(to),
            Some(_) => {}
            None => {
                if is_en_passant_capture(position, from, to, side) {
                    out.push(to);
                }
            }
        }
    }
}

/// Whether a `side` pawn stepping diagonally from `from` to `to` captures the
/// pawn that just made a double step.
pub fn is_en_passant_capture(position: &Position, from: Square, to: Square, side: Side) -> bool {
    let Some(target) = position.en_passant else {
        return false;
    };
    if target.capture_square != to || from.col() == to.col() {
        return false;
    }
    // The victim sits beside the capturer, on the file it moves to.
    if target.pawn_square.row() != from.row() || target.pawn_square.col() != to.col() {
        return false;
    }
    matches!(
        position.board.get(target.pawn_square),
        Some(victim) if victim.is(PieceKind::Pawn, side.opposite())
    )
}
