//! Board and position values.
//!
//! `Board` is a plain 8x8 grid of optional pieces. `Position` pairs a board
//! with the en-passant target that belongs to it, so the transient target can
//! never drift away from the board it describes. Both are replaced, never
//! edited, once handed to a caller: every rules operation takes `&Position`
//! and returns a fresh value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::BACK_RANK_LAYOUT;
use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};
use crate::utils::render_board::render_board;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting layout.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for side in [Side::Cats, Side::Dogs] {
            for (col, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
                board.set(
                    Square::at(side.back_rank(), col as u8),
                    Some(Piece::new(*kind, side)),
                );
                board.set(
                    Square::at(side.pawn_start_row(), col as u8),
                    Some(Piece::new(PieceKind::Pawn, side)),
                );
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row() as usize][square.col() as usize] = piece;
    }

    /// Removes and returns whatever stands on `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize].take()
    }

    /// Builder-style placement, handy for constructing test positions.
    #[inline]
    pub fn with(mut self, square: Square, piece: Piece) -> Self {
        self.set(square, Some(piece));
        self
    }

    #[inline]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Occupied squares in generation order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.side == side)
    }

    /// First king of `side` found by a board scan.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces_of(side)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Compact repetition key: two characters per square (side code plus
    /// piece initial, `--` for empty), rows joined by `/`.
    pub fn signature(&self) -> String {
        let mut out = String::with_capacity(8 * 17);
        for (row_idx, row) in self.squares.iter().enumerate() {
            if row_idx > 0 {
                out.push('/');
            }
            for cell in row {
                match cell {
                    Some(piece) => {
                        out.push(piece.side.signature_code());
                        out.push(piece.kind.initial());
                    }
                    None => out.push_str("--"),
                }
            }
        }
        out
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        f.write_str(&render_board(self))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

/// Set by a two-square pawn advance, valid for the opponent's very next ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnPassantTarget {
    /// Where the advanced pawn landed.
    pub pawn_square: Square,
    /// The square it skipped over, where a capturing pawn ends up.
    pub capture_square: Square,
}

/// A board plus the en-passant target created by the move that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub en_passant: Option<EnPassantTarget>,
}

impl Position {
    pub fn new_game() -> Self {
        Self::from_board(new_game())
    }

    /// Wraps a board with no en-passant target, as when loading a position.
    #[inline]
    pub const fn from_board(board: Board) -> Self {
        Self {
            board,
            en_passant: None,
        }
    }
}

/// Initializes the standard starting position.
pub fn new_game() -> Board {
    Board::standard()
}
