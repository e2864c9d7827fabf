//! Full legality: pseudo-legal movement plus "own king not left in check".
//!
//! Every candidate is played out with `apply_move` on a scratch copy and the
//! result inspected with the restricted attack routine, so legality depends
//! on check detection but never the other way round.

use crate::game_state::board::Position;
use crate::game_state::chess_types::{PieceKind, Side, Square};
use crate::move_generation::castling::{can_castle, castling_rook_squares};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::pseudo_legal::push_pseudo_legal_moves;
use crate::moves::move_descriptions::ChessMove;

/// Whether `side` may move the piece on `from` to `to`.
pub fn is_legal_move(position: &Position, from: Square, to: Square, side: Side) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = position.board.get(from) else {
        return false;
    };
    if piece.side != side {
        return false;
    }

    if let Some(target) = position.board.get(to) {
        if target.side == side {
            // A king moving onto its own rook is a castle request.
            return piece.kind == PieceKind::King
                && target.kind == PieceKind::Rook
                && can_castle(&position.board, from, to);
        }
        if target.kind == PieceKind::King {
            return false;
        }
    }

    let mut candidates = Vec::with_capacity(28);
    push_pseudo_legal_moves(position, from, piece, &mut candidates);
    if !candidates.contains(&to) {
        return false;
    }

    leaves_king_safe(position, from, to, side)
}

/// Legal destinations of the piece on `from`, sorted by row then column.
/// Castling shows up as the square of the rook to castle with.
pub fn legal_destinations(position: &Position, from: Square, side: Side) -> Vec<Square> {
    let Some(piece) = position.board.get(from) else {
        return Vec::new();
    };
    if piece.side != side {
        return Vec::new();
    }

    let mut candidates = Vec::with_capacity(28);
    push_pseudo_legal_moves(position, from, piece, &mut candidates);
    let mut out: Vec<Square> = candidates
        .into_iter()
        .filter(|to| {
            !position
                .board
                .get(*to)
                .is_some_and(|target| target.kind == PieceKind::King)
        })
        .filter(|to| leaves_king_safe(position, from, *to, side))
        .collect();

    if piece.kind == PieceKind::King {
        out.extend(castling_rook_squares(&position.board, from));
    }

    out.sort_unstable();
    out.dedup();
    out
}

/// Every legal move of `side` in generation order: origin ascending by row
/// then column, destinations likewise. Moves onto the far rank carry a
/// queen promotion.
pub fn legal_moves(position: &Position, side: Side) -> Vec<ChessMove> {
    let mut out = Vec::with_capacity(48);
    for (from, piece) in position.board.pieces_of(side) {
        for to in legal_destinations(position, from, side) {
            let promotes = piece.kind == PieceKind::Pawn && to.row() == side.promotion_row();
            out.push(if promotes {
                ChessMove::with_promotion(from, to, PieceKind::Queen)
            } else {
                ChessMove::new(from, to)
            });
        }
    }
    out
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(position: &Position, side: Side) -> bool {
    let mut candidates = Vec::with_capacity(28);
    for (from, piece) in position.board.pieces_of(side) {
        candidates.clear();
        push_pseudo_legal_moves(position, from, piece, &mut candidates);
        let found = candidates.iter().any(|to| {
            !position
                .board
                .get(*to)
                .is_some_and(|target| target.kind == PieceKind::King)
                && leaves_king_safe(position, from, *to, side)
        });
        if found {
            return true;
        }
    }
    // Castling never rescues a position with no other legal move: it needs
    // the king out of check and a free square next to it, which is already a
    // legal king step.
    false
}

#[inline]
fn leaves_king_safe(position: &Position, from: Square, to: Square, side: Side) -> bool {
    let next = apply_move(position, from, to);
    !is_in_check(&next.position.board, side)
}

#[cfg(test)]
mod tests {
    use super::{has_any_legal_move, is_legal_move, legal_destinations, legal_moves};
    use crate::game_state::board::{Board, Position};
    use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};

    #[test]
    fn start_position_has_twenty_legal_moves_each() {
        let position = Position::new_game();
        assert_eq!(legal_moves(&position, Side::Dogs).len(), 20);
        assert_eq!(legal_moves(&position, Side::Cats).len(), 20);
    }

    #[test]
    fn legal_moves_follow_generation_order() {
        let moves = legal_moves(&Position::new_game(), Side::Dogs);
        let keys: Vec<_> = moves.iter().map(|m| (m.from, m.to)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        // a2 pawn (row 6) comes before the knights on row 7.
        assert_eq!(moves[0].from, Square::at(6, 0));
    }

    #[test]
    fn wrong_side_and_same_square_are_rejected() {
        let position = Position::new_game();
        assert!(!is_legal_move(&position, Square::at(6, 4), Square::at(4, 4), Side::Cats));
        assert!(!is_legal_move(&position, Square::at(6, 4), Square::at(6, 4), Side::Dogs));
        assert!(!is_legal_move(&position, Square::at(4, 4), Square::at(3, 4), Side::Dogs));
        assert!(is_legal_move(&position, Square::at(6, 4), Square::at(4, 4), Side::Dogs));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // Dogs king e1, knight e2, cats rook e8.
        let board = Board::empty()
            .with(Square::at(7, 4), Piece::new(PieceKind::King, Side::Dogs))
            .with(Square::at(6, 4), Piece::new(PieceKind::Knight, Side::Dogs))
            .with(Square::at(0, 4), Piece::new(PieceKind::Rook, Side::Cats))
            .with(Square::at(0, 0), Piece::new(PieceKind::King, Side::Cats));
        let position = Position::from_board(board);
        assert!(legal_destinations(&position, Square::at(6, 4), Side::Dogs).is_empty());
        assert!(!is_legal_move(&position, Square::at(6, 4), Square::at(4, 5), Side::Dogs));
    }

    #[test]
    fn king_captures_are_never_legal() {
        // Dogs queen adjacent to an exposed cats king.
        let board = Board::empty()
            .with(Square::at(7, 4), Piece::new(PieceKind::King, Side::Dogs))
            .with(Square::at(1, 1), Piece::new(PieceKind::Queen, Side::Dogs))
            .with(Square::at(0, 0), Piece::new(PieceKind::King, Side::Cats));
        let position = Position::from_board(board);
        assert!(!is_legal_move(&position, Square::at(1, 1), Square::at(0, 0), Side::Dogs));
        assert!(!legal_destinations(&position, Square::at(1, 1), Side::Dogs)
            .contains(&Square::at(0, 0)));
    }

    #[test]
    fn castling_appears_as_rook_destination() {
        let mut board = Board::standard();
        board.set(Square::at(7, 5), None);
        board.set(Square::at(7, 6), None);
        let position = Position::from_board(board);
        let dests = legal_destinations(&position, Square::at(7, 4), Side::Dogs);
        assert_eq!(dests, vec![Square::at(7, 5), Square::at(7, 7)]);
        assert!(is_legal_move(&position, Square::at(7, 4), Square::at(7, 7), Side::Dogs));
        assert!(!is_legal_move(&position, Square::at(7, 4), Square::at(7, 0), Side::Dogs));
    }

    #[test]
    fn cornered_king_has_no_moves() {
        // Cats king a8 boxed in by dogs queen b6 and king c7: stalemate.
        let board = Board::empty()
            .with(Square::at(0, 0), Piece::new(PieceKind::King, Side::Cats))
            .with(Square::at(2, 1), Piece::new(PieceKind::Queen, Side::Dogs))
            .with(Square::at(1, 2), Piece::new(PieceKind::King, Side::Dogs));
        let position = Position::from_board(board);
        assert!(!has_any_legal_move(&position, Side::Cats));
        assert!(has_any_legal_move(&position, Side::Dogs));
    }
}
