//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and log output
//! in text environments. Rank 8 (the Cats back rank, row 0) is printed first.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Side, Square};

/// Render the board to a Unicode string for terminal output.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8u8 {
        let rank = char::from(b'8' - row);
        out.push(rank);
        out.push(' ');

        for col in 0..8u8 {
            match board.get(Square::at(row, col)) {
                Some(piece) => out.push(piece_to_unicode(piece.side, piece.kind)),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(side: Side, kind: PieceKind) -> char {
    match (side, kind) {
        (Side::Dogs, PieceKind::Pawn) => '♙',
        (Side::Dogs, PieceKind::Knight) => '♘',
        (Side::Dogs, PieceKind::Bishop) => '♗',
        (Side::Dogs, PieceKind::Rook) => '♖',
        (Side::Dogs, PieceKind::Queen) => '♕',
        (Side::Dogs, PieceKind::King) => '♔',
        (Side::Cats, PieceKind::Pawn) => '♟',
        (Side::Cats, PieceKind::Knight) => '♞',
        (Side::Cats, PieceKind::Bishop) => '♝',
        (Side::Cats, PieceKind::Rook) => '♜',
        (Side::Cats, PieceKind::Queen) => '♛',
        (Side::Cats, PieceKind::King) => '♚',
    }
}
