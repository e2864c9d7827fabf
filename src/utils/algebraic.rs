//! Square conversions and move notation.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and board
//! squares, and writes the short algebraic text kept in the move list.
//! Rank 1 is the Dogs back rank (row 7), rank 8 the Cats back rank (row 0).

use crate::errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::move_descriptions::MoveResult;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessError> {
    let invalid = || ChessError::InvalidAlgebraic(square.to_owned());
    let bytes = square.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    Square::new(b'8' - rank, file - b'a').ok_or_else(invalid)
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Short algebraic text for a move already executed.
///
/// `board_before` is the board the move was played on. Check and mate
/// suffixes depend on the resulting game status and are appended by the
/// caller.
pub fn move_notation(
    board_before: &Board,
    from: Square,
    to: Square,
    result: &MoveResult,
    promotion: Option<PieceKind>,
) -> String {
    if result.is_castling {
        return if to.col() > from.col() {
            "O-O".to_owned()
        } else {
            "O-O-O".to_owned()
        };
    }

    let Some(piece) = board_before.get(from) else {
        return format!("{from}{to}");
    };
    let capture = result.captured_piece.is_some();

    let mut text = String::with_capacity(8);
    if piece.kind == PieceKind::Pawn {
        if capture {
            text.push(char::from(b'a' + from.col()));
        }
    } else {
        text.push(piece.kind.initial().to_ascii_uppercase());
    }
    if capture {
        text.push('x');
    }
    text.push_str(&square_to_algebraic(to));

    if let (true, Some(kind)) = (result.is_promotion, promotion) {
        text.push('=');
        text.push(kind.initial().to_ascii_uppercase());
    }
    if result.is_en_passant {
        text.push_str(" e.p.");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, move_notation, square_to_algebraic};
    use crate::game_state::board::{Board, EnPassantTarget, Position};
    use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};
    use crate::move_generation::legal_move_apply::apply_move;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), Square::at(7, 0));
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), Square::at(0, 7));
        assert_eq!(algebraic_to_square("E4").expect("E4 should parse"), Square::at(4, 4));
        assert_eq!(square_to_algebraic(Square::at(7, 0)), "a1");
        assert_eq!(square_to_algebraic(Square::at(4, 4)), "e4");
    }

    #[test]
    fn malformed_squares_are_rejected() {
        for bad in ["", "e", "e9", "i1", "e44", "4e"] {
            assert!(algebraic_to_square(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn notation_for_common_moves() {
        let start = Position::new_game();
        let e4 = apply_move(&start, Square::at(6, 4), Square::at(4, 4));
        assert_eq!(
            move_notation(&start.board, Square::at(6, 4), Square::at(4, 4), &e4, None),
            "e4"
        );

        let nf3 = apply_move(&start, Square::at(7, 6), Square::at(5, 5));
        assert_eq!(
            move_notation(&start.board, Square::at(7, 6), Square::at(5, 5), &nf3, None),
            "Nf3"
        );
    }

    #[test]
    fn notation_for_special_moves() {
        let mut board = Board::standard();
        board.set(Square::at(7, 5), None);
        board.set(Square::at(7, 6), None);
        let position = Position::from_board(board);
        let castle = apply_move(&position, Square::at(7, 4), Square::at(7, 7));
        assert_eq!(
            move_notation(&board, Square::at(7, 4), Square::at(7, 7), &castle, None),
            "O-O"
        );

        let board = Board::empty()
            .with(Square::at(3, 4), Piece::new(PieceKind::Pawn, Side::Dogs).after_move())
            .with(Square::at(3, 3), Piece::new(PieceKind::Pawn, Side::Cats).after_move());
        let position = Position {
            board,
            en_passant: Some(EnPassantTarget {
                pawn_square: Square::at(3, 3),
                capture_square: Square::at(2, 3),
            }),
        };
        let ep = apply_move(&position, Square::at(3, 4), Square::at(2, 3));
        assert_eq!(
            move_notation(&board, Square::at(3, 4), Square::at(2, 3), &ep, None),
            "exd6 e.p."
        );

        let board = Board::empty()
            .with(Square::at(1, 0), Piece::new(PieceKind::Pawn, Side::Dogs).after_move())
            .with(Square::at(0, 1), Piece::new(PieceKind::Rook, Side::Cats));
        let promo = apply_move(&Position::from_board(board), Square::at(1, 0), Square::at(0, 1));
        assert_eq!(
            move_notation(
                &board,
                Square::at(1, 0),
                Square::at(0, 1),
                &promo,
                Some(PieceKind::Knight)
            ),
            "axb8=N"
        );
    }
}
