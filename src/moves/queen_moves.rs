use crate::game_state::board::Board;
use crate::game_state::chess_types::{Side, Square};
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::rook_moves::rook_moves;

#[inline]
pub fn queen_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    rook_moves(board, from, side, out);
    bishop_moves(board, from, side, out);
}
