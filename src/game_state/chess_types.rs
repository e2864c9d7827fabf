//! Core value types shared by the rules engine and the bot.
//!
//! Everything here is `Copy`: boards are replaced wholesale on every ply, so
//! pieces and squares have to be cheap to duplicate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two factions. Dogs play the white pieces and move first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Dogs,
    Cats,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Dogs => Side::Cats,
            Side::Cats => Side::Dogs,
        }
    }

    /// Row step of a pawn advance.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Side::Dogs => -1,
            Side::Cats => 1,
        }
    }

    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Side::Dogs => 7,
            Side::Cats => 0,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Side::Dogs => 6,
            Side::Cats => 1,
        }
    }

    /// The far rank, where this side's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.opposite().back_rank()
    }

    /// First character of the per-square code in position signatures.
    #[inline]
    pub const fn signature_code(self) -> char {
        match self {
            Side::Dogs => 'd',
            Side::Cats => 'c',
        }
    }
}

/// Piece kind (side is stored separately on [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {

    /// Lowercase initial used in position signatures.
    #[inline]
    pub const fn initial(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Whether a pawn may promote to this kind.
    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Pawns, kings and rooks remember whether they have moved.
    #[inline]
    pub const fn tracks_first_move(self) -> bool {
        matches!(self, PieceKind::Pawn | PieceKind::King | PieceKind::Rook)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self {
            kind,
            side,
            has_moved: false,
        }
    }

    /// The same piece after it has made a move.
    #[inline]
    pub const fn after_move(self) -> Self {
        Self {
            has_moved: self.has_moved || self.kind.tracks_first_move(),
            ..self
        }
    }

    /// The same piece turned into another kind, as on promotion.
    #[inline]
    pub const fn with_kind(self, kind: PieceKind) -> Self {
        Self { kind, ..self }
    }

    #[inline]
    pub fn is(self, kind: PieceKind, side: Side) -> bool {
        self.kind == kind && self.side == side
    }
}

/// A board coordinate. Always on the board: the only constructors either
/// validate or panic on constant input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSquare", into = "RawSquare")]
pub struct Square {
    row: u8,
    col: u8,
}

#[derive(Serialize, Deserialize)]
struct RawSquare {
    row: u8,
    col: u8,
}

impl TryFrom<RawSquare> for Square {
    type Error = String;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.row, raw.col)
            .ok_or_else(|| format!("square ({}, {}) is off the board", raw.row, raw.col))
    }
}

impl From<Square> for RawSquare {
    fn from(square: Square) -> Self {
        RawSquare {
            row: square.row,
            col: square.col,
        }
    }
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Constructor for literal coordinates. Panics if `row` or `col` is not
    /// in `0..8`.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square out of bounds");
        Self { row, col }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The square `(row + d_row, col + d_col)`, if it is on the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Square colour as `(row + col) mod 2`.
    #[inline]
    pub const fn parity(self) -> u8 {
        (self.row + self.col) % 2
    }

    /// All 64 squares in generation order: ascending row, then column.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.col),
            char::from(b'8' - self.row)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_on_board() {
        let corner = Square::at(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Square::at(1, 1)));
        assert_eq!(Square::at(7, 7).offset(1, 0), None);
    }

    #[test]
    fn all_squares_follow_generation_order() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::at(0, 0));
        assert_eq!(squares[9], Square::at(1, 1));
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn display_uses_files_and_ranks() {
        assert_eq!(Square::at(7, 4).to_string(), "e1");
        assert_eq!(Square::at(0, 0).to_string(), "a8");
        assert_eq!(Square::at(4, 3).to_string(), "d4");
    }

    #[test]
    fn after_move_only_flags_tracked_kinds() {
        let knight = Piece::new(PieceKind::Knight, Side::Dogs).after_move();
        assert!(!knight.has_moved);
        let rook = Piece::new(PieceKind::Rook, Side::Cats).after_move();
        assert!(rook.has_moved);
    }

    #[test]
    fn off_board_square_fails_to_deserialize() {
        let parsed: Result<Square, _> = serde_json::from_str(r#"{"row":8,"col":0}"#);
        assert!(parsed.is_err());
        let ok: Square = serde_json::from_str(r#"{"row":3,"col":5}"#).expect("valid square");
        assert_eq!(ok, Square::at(3, 5));
    }
}
