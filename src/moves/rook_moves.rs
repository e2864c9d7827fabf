use crate::game_state::board::Board;
use crate::game_state::chess_types::{Side, Square};
use crate::moves::bishop_moves::trace_ray;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

pub fn rook_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for (d_row, d_col) in ROOK_DIRECTIONS {
        trace_ray(board, from, side, d_row, d_col, out);
    }
}
