//! Plain one-step king moves. Castling is not a king destination here; it is
//! resolved by `move_generation::castling` when the king targets its own rook.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Side, Square};
use crate::moves::knight_moves::push_offsets;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn king_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    push_offsets(board, from, side, &KING_OFFSETS, out);
}
