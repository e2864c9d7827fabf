//! End-of-game and draw detection.

use serde::{Deserialize, Serialize};

use crate::game_state::board::{Board, Position};
use crate::game_state::chess_rules::{
    FIFTY_MOVE_HALF_MOVES, MIN_REPETITION_HISTORY, REPETITION_COUNT,
};
use crate::game_state::chess_types::{PieceKind, Side};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_filter::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    DrawFiftyMove,
    DrawRepetition,
    DrawInsufficientMaterial,
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawFiftyMove
                | GameStatus::DrawRepetition
                | GameStatus::DrawInsufficientMaterial
        )
    }
}

pub fn is_checkmate(position: &Position, side: Side) -> bool {
    is_in_check(&position.board, side) && !has_any_legal_move(position, side)
}

pub fn is_stalemate(position: &Position, side: Side) -> bool {
    !is_in_check(&position.board, side) && !has_any_legal_move(position, side)
}

/// King vs king, king and one minor piece vs king, or king and bishop vs
/// king and bishop with both bishops on the same square colour.
pub fn has_insufficient_material(board: &Board) -> bool {
    let others: Vec<_> = board
        .pieces()
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .collect();

    match others.as_slice() {
        [] => true,
        [(_, piece)] => matches!(piece.kind, PieceKind::Knight | PieceKind::Bishop),
        [(sq_a, a), (sq_b, b)] => {
            a.kind == PieceKind::Bishop
                && b.kind == PieceKind::Bishop
                && a.side != b.side
                && sq_a.parity() == sq_b.parity()
        }
        _ => false,
    }
}

/// True iff the latest signature occurs at least three times in the whole
/// history. Needs at least five entries.
pub fn check_threefold_repetition<S: AsRef<str>>(position_signatures: &[S]) -> bool {
    if position_signatures.len() < MIN_REPETITION_HISTORY {
        return false;
    }
    let Some(latest) = position_signatures.last() else {
        return false;
    };
    let latest = latest.as_ref();
    position_signatures
        .iter()
        .filter(|sig| sig.as_ref() == latest)
        .count()
        >= REPETITION_COUNT
}

/// Half-move clock after a move: reset by captures and pawn moves.
#[inline]
pub fn next_half_move_clock(clock: u32, moved: PieceKind, captured: bool) -> u32 {
    if captured || moved == PieceKind::Pawn {
        0
    } else {
        clock.saturating_add(1)
    }
}

#[inline]
pub fn is_fifty_move_draw(half_move_clock: u32) -> bool {
    half_move_clock >= FIFTY_MOVE_HALF_MOVES
}

/// Status of the game with `side` to move.
///
/// Precedence: checkmate, stalemate, insufficient material, fifty-move rule,
/// repetition, check.
pub fn game_status<S: AsRef<str>>(
    position: &Position,
    side: Side,
    half_move_clock: u32,
    position_history: &[S],
) -> GameStatus {
    let in_check = is_in_check(&position.board, side);
    let can_move = has_any_legal_move(position, side);

    if !can_move {
        return if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }
    if has_insufficient_material(&position.board) {
        return GameStatus::DrawInsufficientMaterial;
    }
    if is_fifty_move_draw(half_move_clock) {
        return GameStatus::DrawFiftyMove;
    }
    if check_threefold_repetition(position_history) {
        return GameStatus::DrawRepetition;
    }
    if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, Square};

    fn kings() -> Board {
        Board::empty()
            .with(Square::at(7, 4), Piece::new(PieceKind::King, Side::Dogs))
            .with(Square::at(0, 4), Piece::new(PieceKind::King, Side::Cats))
    }

    #[test]
    fn insufficient_material_cases() {
        assert!(has_insufficient_material(&kings()));

        let knight = kings().with(Square::at(4, 4), Piece::new(PieceKind::Knight, Side::Dogs));
        assert!(has_insufficient_material(&knight));

        // c1 (7,2) and f8 (0,5) are both odd-parity squares.
        let same_colour = kings()
            .with(Square::at(7, 2), Piece::new(PieceKind::Bishop, Side::Dogs))
            .with(Square::at(0, 5), Piece::new(PieceKind::Bishop, Side::Cats));
        assert!(has_insufficient_material(&same_colour));

        let opposite_colour = kings()
            .with(Square::at(7, 2), Piece::new(PieceKind::Bishop, Side::Dogs))
            .with(Square::at(0, 2), Piece::new(PieceKind::Bishop, Side::Cats));
        assert!(!has_insufficient_material(&opposite_colour));

        let rook = kings().with(Square::at(4, 4), Piece::new(PieceKind::Rook, Side::Dogs));
        assert!(!has_insufficient_material(&rook));

        let pawn = kings().with(Square::at(4, 4), Piece::new(PieceKind::Pawn, Side::Cats));
        assert!(!has_insufficient_material(&pawn));

        assert!(!has_insufficient_material(&Board::standard()));
    }

    #[test]
    fn threefold_repetition_needs_three_occurrences() {
        let triple = ["A", "B", "A", "C", "A"];
        assert!(check_threefold_repetition(&triple));

        let double = ["A", "B", "A", "C", "D", "A"];
        assert!(!check_threefold_repetition(&double[..5]));
        assert!(check_threefold_repetition(&double));

        let only_two = ["A", "B", "C", "D", "A"];
        assert!(!check_threefold_repetition(&only_two));

        let short = ["A", "A", "A", "A"];
        assert!(!check_threefold_repetition(&short));
    }

    #[test]
    fn fifty_move_rule_counts_half_moves() {
        assert!(!is_fifty_move_draw(99));
        assert!(is_fifty_move_draw(100));

        assert_eq!(next_half_move_clock(98, PieceKind::Knight, false), 99);
        assert_eq!(next_half_move_clock(99, PieceKind::Knight, false), 100);
        assert_eq!(next_half_move_clock(99, PieceKind::Pawn, false), 0);
        assert_eq!(next_half_move_clock(99, PieceKind::Rook, true), 0);
    }

    #[test]
    fn rook_mate_flips_when_rook_is_removed() {
        // Back-rank mate: cats king g8 behind its own pawns, dogs rook on a8.
        let board = Board::empty()
            .with(Square::at(0, 6), Piece::new(PieceKind::King, Side::Cats))
            .with(Square::at(1, 5), Piece::new(PieceKind::Pawn, Side::Cats))
            .with(Square::at(1, 6), Piece::new(PieceKind::Pawn, Side::Cats))
            .with(Square::at(1, 7), Piece::new(PieceKind::Pawn, Side::Cats))
            .with(Square::at(0, 0), Piece::new(PieceKind::Rook, Side::Dogs))
            .with(Square::at(7, 4), Piece::new(PieceKind::King, Side::Dogs));
        let position = Position::from_board(board);
        assert!(is_checkmate(&position, Side::Cats));
        assert_eq!(
            game_status(&position, Side::Cats, 0, &[] as &[String]),
            GameStatus::Checkmate
        );

        let mut without_rook = board;
        without_rook.set(Square::at(0, 0), None);
        let position = Position::from_board(without_rook);
        assert!(!is_checkmate(&position, Side::Cats));
        assert_eq!(
            game_status(&position, Side::Cats, 0, &[] as &[String]),
            GameStatus::Ongoing
        );
    }

    #[test]
    fn status_reports_stalemate_and_draws() {
        let stalemate = Board::empty()
            .with(Square::at(0, 0), Piece::new(PieceKind::King, Side::Cats))
            .with(Square::at(2, 1), Piece::new(PieceKind::Queen, Side::Dogs))
            .with(Square::at(1, 2), Piece::new(PieceKind::King, Side::Dogs));
        let position = Position::from_board(stalemate);
        assert!(is_stalemate(&position, Side::Cats));
        assert_eq!(
            game_status(&position, Side::Cats, 0, &[] as &[String]),
            GameStatus::Stalemate
        );

        let bare = Position::from_board(kings());
        assert_eq!(
            game_status(&bare, Side::Dogs, 0, &[] as &[String]),
            GameStatus::DrawInsufficientMaterial
        );

        let start = Position::new_game();
        assert_eq!(
            game_status(&start, Side::Dogs, 100, &[] as &[String]),
            GameStatus::DrawFiftyMove
        );
        let sig = start.board.signature();
        let history = vec![sig.clone(), "x".into(), sig.clone(), "y".into(), sig];
        assert_eq!(
            game_status(&start, Side::Dogs, 4, &history),
            GameStatus::DrawRepetition
        );
        assert!(GameStatus::DrawRepetition.is_terminal());
        assert!(!GameStatus::Check.is_terminal());
    }

    #[test]
    fn only_non_mate_endings_are_draws() {
        assert!(GameStatus::Stalemate.is_draw());
        assert!(GameStatus::DrawInsufficientMaterial.is_draw());
        assert!(!GameStatus::Checkmate.is_draw());
        assert!(!GameStatus::Ongoing.is_draw());
    }
}
