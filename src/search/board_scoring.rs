//! Pluggable board evaluation.
//!
//! Search delegates static scoring to `BoardScorer` so alternative heuristics
//! can be swapped without touching the search itself.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::piece_value;
use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `side`: positive is good for `side`.
    fn score(&self, board: &Board, side: Side) -> i32;
}

/// Pawn bonus by (row, col), seen from the Dogs side: row 0 is the rank the
/// pawn promotes on. Cats read it upside down.
pub const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

#[inline]
pub fn pawn_bonus(side: Side, square: Square) -> i32 {
    let row = match side {
        Side::Dogs => square.row(),
        Side::Cats => 7 - square.row(),
    };
    PAWN_TABLE[row as usize][square.col() as usize]
}

/// Material plus the pawn placement table.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialPositionalScorer;

impl MaterialPositionalScorer {
    #[inline]
    pub fn piece_score(square: Square, piece: Piece) -> i32 {
        let positional = if piece.kind == PieceKind::Pawn {
            pawn_bonus(piece.side, square)
        } else {
            0
        };
        piece_value(piece.kind) + positional
    }
}

impl BoardScorer for MaterialPositionalScorer {
    fn score(&self, board: &Board, side: Side) -> i32 {
        board
            .pieces()
            .map(|(square, piece)| {
                let value = Self::piece_score(square, piece);
                if piece.side == side {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

/// Material only; handy when a test needs scores free of placement noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, side: Side) -> i32 {
        board
            .pieces()
            .map(|(_, piece)| {
                let value = piece_value(piece.kind);
                if piece.side == side {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let board = Board::standard();
        assert_eq!(MaterialPositionalScorer.score(&board, Side::Dogs), 0);
        assert_eq!(MaterialPositionalScorer.score(&board, Side::Cats), 0);
    }

    #[test]
    fn pawn_table_is_mirrored_between_sides() {
        // e4 for dogs mirrors e5 for cats.
        assert_eq!(pawn_bonus(Side::Dogs, Square::at(4, 4)), 20);
        assert_eq!(pawn_bonus(Side::Cats, Square::at(3, 4)), 20);
        assert_eq!(
            pawn_bonus(Side::Dogs, Square::at(1, 0)),
            pawn_bonus(Side::Cats, Square::at(6, 0))
        );
    }

    #[test]
    fn extra_queen_shows_up_in_score() {
        let board = Board::standard()
            .with(Square::at(4, 4), Piece::new(PieceKind::Queen, Side::Cats));
        assert_eq!(MaterialScorer.score(&board, Side::Cats), 900);
        assert_eq!(MaterialScorer.score(&board, Side::Dogs), -900);
    }
}
