use crate::game_state::board::Board;
use crate::game_state::chess_types::{Side, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Pushes every knight destination from `from` that is on the board and not
/// held by a piece of `side`.
pub fn knight_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    push_offsets(board, from, side, &KNIGHT_OFFSETS, out);
}

pub(crate) fn push_offsets(
    board: &Board,
    from: Square,
    side: Side,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        match board.get(to) {
            Some(piece) if piece.side == side => {}
            _ => out.push(to),
        }
    }
}
