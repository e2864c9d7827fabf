//! Castling, requested by moving the king onto one of its own rooks.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    KINGSIDE_KING_FILE, KINGSIDE_ROOK_FILE, QUEENSIDE_KING_FILE, QUEENSIDE_ROOK_FILE,
};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::move_generation::legal_move_checks::{is_in_check, is_square_attacked};

/// Where king and rook end up after castling from `king_from` toward
/// `rook_from`. `None` when the two squares are not on one row.
pub fn castle_landing_squares(king_from: Square, rook_from: Square) -> Option<(Square, Square)> {
    if king_from.row() != rook_from.row() || king_from.col() == rook_from.col() {
        return None;
    }
    let row = king_from.row();
    if rook_from.col() > king_from.col() {
        Some((
            Square::at(row, KINGSIDE_KING_FILE),
            Square::at(row, KINGSIDE_ROOK_FILE),
        ))
    } else {
        Some((
            Square::at(row, QUEENSIDE_KING_FILE),
            Square::at(row, QUEENSIDE_ROOK_FILE),
        ))
    }
}

/// Whether the king on `king_from` may castle with the rook on `rook_from`.
///
/// Requires an unmoved king and an unmoved rook of the same side on one row,
/// empty squares between them, landing squares free of other pieces, the king
/// not in check, and no attacked square on the king's path.
pub fn can_castle(board: &Board, king_from: Square, rook_from: Square) -> bool {
    let (Some(king), Some(rook)) = (board.get(king_from), board.get(rook_from)) else {
        return false;
    };
    if king.kind != PieceKind::King
        || rook.kind != PieceKind::Rook
        || king.side != rook.side
        || king.has_moved
        || rook.has_moved
    {
        return false;
    }
    let Some((king_to, rook_to)) = castle_landing_squares(king_from, rook_from) else {
        return false;
    };

    let row = king_from.row();
    let (low, high) = ordered(king_from.col(), rook_from.col());
    if ((low + 1)..high).any(|col| !board.is_empty_at(Square::at(row, col))) {
        return false;
    }
    for landing in [king_to, rook_to] {
        if landing != king_from && landing != rook_from && !board.is_empty_at(landing) {
            return false;
        }
    }

    if is_in_check(board, king.side) {
        return false;
    }

    // Every square the king crosses, including where it lands.
    let enemy = king.side.opposite();
    let step: i8 = if king_to.col() > king_from.col() { 1 } else { -1 };
    let mut current = king_from;
    while current != king_to {
        let Some(next) = current.offset(0, step) else {
            return false;
        };
        if is_square_attacked(board, next, enemy) {
            return false;
        }
        current = next;
    }

    true
}

/// Rooks the king on `king_from` could castle with right now.
pub fn castling_rook_squares(board: &Board, king_from: Square) -> Vec<Square> {
    let Some(king) = board.get(king_from) else {
        return Vec::new();
    };
    if king.kind != PieceKind::King || king.has_moved {
        return Vec::new();
    }
    (0..8u8)
        .map(|col| Square::at(king_from.row(), col))
        .filter(|sq| {
            board
                .get(*sq)
                .is_some_and(|piece| piece.is(PieceKind::Rook, king.side))
        })
        .filter(|sq| can_castle(board, king_from, *sq))
        .collect()
}

#[inline]
fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::{can_castle, castle_landing_squares, castling_rook_squares};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};

    const E1: Square = Square::at(7, 4);
    const H1: Square = Square::at(7, 7);
    const A1: Square = Square::at(7, 0);

    fn open_back_rank() -> Board {
        let mut board = Board::standard();
        for col in [1u8, 2, 3, 5, 6] {
            board.set(Square::at(7, col), None);
        }
        board
    }

    #[test]
    fn landing_squares_follow_castle_side() {
        assert_eq!(
            castle_landing_squares(E1, H1),
            Some((Square::at(7, 6), Square::at(7, 5)))
        );
        assert_eq!(
            castle_landing_squares(E1, A1),
            Some((Square::at(7, 2), Square::at(7, 3)))
        );
        assert_eq!(castle_landing_squares(E1, Square::at(6, 7)), None);
    }

    #[test]
    fn both_sides_available_with_open_rank() {
        let board = open_back_rank();
        assert!(can_castle(&board, E1, H1));
        assert!(can_castle(&board, E1, A1));
        assert_eq!(castling_rook_squares(&board, E1), vec![A1, H1]);
    }

    #[test]
    fn blocked_path_prevents_castling() {
        let board = Board::standard();
        assert!(!can_castle(&board, E1, H1));
        assert!(castling_rook_squares(&board, E1).is_empty());
    }

    #[test]
    fn moved_rook_prevents_castling() {
        let mut board = open_back_rank();
        board.set(H1, Some(Piece::new(PieceKind::Rook, Side::Dogs).after_move()));
        assert!(!can_castle(&board, E1, H1));
        assert!(can_castle(&board, E1, A1));
    }

    #[test]
    fn attacked_transit_square_prevents_castling() {
        // Cats rook on f8 with the f-pawns gone sweeps f1.
        let mut board = open_back_rank();
        board.set(Square::at(6, 5), None);
        board.set(Square::at(1, 5), None);
        board.set(Square::at(0, 5), Some(Piece::new(PieceKind::Rook, Side::Cats)));
        assert!(!can_castle(&board, E1, H1));
        assert!(can_castle(&board, E1, A1));
    }
}
