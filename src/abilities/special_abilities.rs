//! The one-off special abilities: the Dogs' laser pointer and the Cats' bone.
//!
//! Using an ability is not a move. It teleports the opposing piece nearest
//! to an empty target square onto that square, consumes a charge and ends
//! the turn. The legal move generator and the search never see abilities.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Position;
use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};
use crate::move_generation::legal_move_checks::is_in_check;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    LaserPointer,
    Bone,
}

impl AbilityKind {
    pub const fn of(side: Side) -> Self {
        match side {
            Side::Dogs => AbilityKind::LaserPointer,
            Side::Cats => AbilityKind::Bone,
        }
    }
}

/// Charges left per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCharges {
    pub dogs: u8,
    pub cats: u8,
}

impl AbilityCharges {
    pub const fn new(per_side: u8) -> Self {
        Self {
            dogs: per_side,
            cats: per_side,
        }
    }

    pub const fn remaining(&self, side: Side) -> u8 {
        match side {
            Side::Dogs => self.dogs,
            Side::Cats => self.cats,
        }
    }

    pub fn consume(&mut self, side: Side) -> ChessResult<()> {
        let slot = match side {
            Side::Dogs => &mut self.dogs,
            Side::Cats => &mut self.cats,
        };
        *slot = slot.checked_sub(1).ok_or(ChessError::NoAbilityCharges(side))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityResult {
    pub kind: AbilityKind,
    pub lured_from: Square,
    pub lured_to: Square,
    pub piece: Piece,
    /// The new position; the en-passant target is always cleared.
    pub position: Position,
}

/// Opposing piece `side` would lure onto `target`: the nearest non-king by
/// squared distance, first in generation order on ties. Pawns are skipped
/// when `target` lies on either back rank.
pub fn lure_candidate(position: &Position, side: Side, target: Square) -> Option<(Square, Piece)> {
    let back_rank_target = target.row() == 0 || target.row() == 7;
    let mut best: Option<(i32, Square, Piece)> = None;

    for (square, piece) in position.board.pieces_of(side.opposite()) {
        if piece.kind == PieceKind::King || (back_rank_target && piece.kind == PieceKind::Pawn) {
            continue;
        }
        let d_row = i32::from(square.row()) - i32::from(target.row());
        let d_col = i32::from(square.col()) - i32::from(target.col());
        let distance = d_row * d_row + d_col * d_col;
        if best.is_none_or(|(closest, _, _)| distance < closest) {
            best = Some((distance, square, piece));
        }
    }

    best.map(|(_, square, piece)| (square, piece))
}

/// `side` uses its ability on `target`. Charges are the caller's business.
pub fn use_ability(position: &Position, side: Side, target: Square) -> ChessResult<AbilityResult> {
    if !position.board.is_empty_at(target) {
        return Err(ChessError::AbilityTargetOccupied(target));
    }
    let (from, piece) =
        lure_candidate(position, side, target).ok_or(ChessError::NothingToLure(target))?;

    let mut board = position.board;
    board.set(from, None);
    board.set(target, Some(piece));
    if is_in_check(&board, side) {
        return Err(ChessError::AbilityExposesKing(target));
    }

    let kind = AbilityKind::of(side);
    info!(?kind, ?side, %from, %target, "special ability used");

    Ok(AbilityResult {
        kind,
        lured_from: from,
        lured_to: target,
        piece,
        position: Position::from_board(board),
    })
}
