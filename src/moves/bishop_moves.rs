//! Diagonal sliders and the shared ray tracer used by rooks and queens.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Side, Square};

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub fn bishop_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for (d_row, d_col) in BISHOP_DIRECTIONS {
        trace_ray(board, from, side, d_row, d_col, out);
    }
}

/// Walks from `from` in one direction. Stops before a piece of `side`, stops
/// after (and includes) an enemy piece.
pub fn trace_ray(
    board: &Board,
    from: Square,
    side: Side,
    d_row: i8,
    d_col: i8,
    out: &mut Vec<Square>,
) {
    let mut current = from;
    while let Some(next) = current.offset(d_row, d_col) {
        match board.get(next) {
            None => out.push(next),
            Some(piece) => {
                if piece.side != side {
                    out.push(next);
                }
                break;
            }
        }
        current = next;
    }
}
