use pawprint_chess::game_state::board::{Board, Position};
use pawprint_chess::game_state::chess_types::{Piece, PieceKind, Side, Square};
use pawprint_chess::move_generation::castling::can_castle;
use pawprint_chess::move_generation::game_status::{game_status, is_checkmate, GameStatus};
use pawprint_chess::move_generation::legal_move_apply::apply_move;
use pawprint_chess::move_generation::legal_move_checks::is_in_check;
use pawprint_chess::move_generation::legal_move_filter::{is_legal_move, legal_moves};
use pawprint_chess::move_generation::pseudo_legal::pseudo_legal_moves;
use pawprint_chess::utils::algebraic::algebraic_to_square;

fn sq(text: &str) -> Square {
    algebraic_to_square(text).expect("valid square")
}

fn play(position: Position, moves: &[(&str, &str)]) -> Position {
    moves.iter().fold(position, |position, (from, to)| {
        let side = position
            .board
            .get(sq(from))
            .map(|p| p.side)
            .expect("piece on origin");
        assert!(
            is_legal_move(&position, sq(from), sq(to), side),
            "{from}{to} should be legal"
        );
        apply_move(&position, sq(from), sq(to)).position
    })
}

#[test]
fn stale_en_passant_target_cannot_be_used() {
    let position = play(
        Position::new_game(),
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    assert!(position.en_passant.is_some());
    assert!(is_legal_move(&position, sq("e5"), sq("d6"), Side::Dogs));

    // Dogs spend the ply on something else instead.
    let position = play(position, &[("g1", "f3")]);
    assert_eq!(position.en_passant, None);
    let position = play(position, &[("a6", "a5")]);
    assert!(!is_legal_move(&position, sq("e5"), sq("d6"), Side::Dogs));
}

#[test]
fn rook_checkmate_flips_when_rook_removed() {
    let board = Board::empty()
        .with(sq("h8"), Piece::new(PieceKind::King, Side::Cats))
        .with(sq("g7"), Piece::new(PieceKind::Pawn, Side::Cats))
        .with(sq("h7"), Piece::new(PieceKind::Pawn, Side::Cats))
        .with(sq("d8"), Piece::new(PieceKind::Rook, Side::Dogs))
        .with(sq("g1"), Piece::new(PieceKind::King, Side::Dogs));
    let mated = Position::from_board(board);
    assert!(is_in_check(&mated.board, Side::Cats));
    assert!(is_checkmate(&mated, Side::Cats));
    assert!(legal_moves(&mated, Side::Cats).is_empty());

    let mut without_rook = board;
    without_rook.set(sq("d8"), None);
    let free = Position::from_board(without_rook);
    assert!(!is_in_check(&free.board, Side::Cats));
    assert!(!is_checkmate(&free, Side::Cats));
    assert_eq!(
        game_status(&free, Side::Cats, 0, &[free.board.signature()]),
        GameStatus::Ongoing
    );
}

fn castling_board() -> Board {
    let mut board = Board::standard();
    for square in ["f1", "g1", "b1", "c1", "d1"] {
        board.set(sq(square), None);
    }
    board
}

#[test]
fn castling_succeeds_on_both_wings() {
    let position = Position::from_board(castling_board());

    assert!(is_legal_move(&position, sq("e1"), sq("h1"), Side::Dogs));
    let kingside = apply_move(&position, sq("e1"), sq("h1"));
    assert!(kingside.is_castling);
    assert!(kingside.board().get(sq("g1")).is_some_and(|p| p.kind == PieceKind::King));
    assert!(kingside.board().get(sq("f1")).is_some_and(|p| p.kind == PieceKind::Rook));

    assert!(is_legal_move(&position, sq("e1"), sq("a1"), Side::Dogs));
    let queenside = apply_move(&position, sq("e1"), sq("a1"));
    assert!(queenside.is_castling);
    assert!(queenside.board().get(sq("c1")).is_some_and(|p| p.kind == PieceKind::King));
    assert!(queenside.board().get(sq("d1")).is_some_and(|p| p.kind == PieceKind::Rook));
    assert_eq!(queenside.position.en_passant, None);
}

#[test]
fn castling_fails_after_king_or_rook_moved() {
    let mut board = castling_board();
    let king = board.get(sq("e1")).expect("king");
    board.set(sq("e1"), Some(king.after_move()));
    assert!(!can_castle(&board, sq("e1"), sq("h1")));
    assert!(!can_castle(&board, sq("e1"), sq("a1")));

    let mut board = castling_board();
    let rook = board.get(sq("h1")).expect("rook");
    board.set(sq("h1"), Some(rook.after_move()));
    assert!(!can_castle(&board, sq("e1"), sq("h1")));
    assert!(can_castle(&board, sq("e1"), sq("a1")));

    // King walks away and back: the flag stays set.
    let position = play(
        Position::from_board(castling_board()),
        &[("e1", "f1"), ("a7", "a6"), ("f1", "e1"), ("a6", "a5")],
    );
    assert!(!is_legal_move(&position, sq("e1"), sq("h1"), Side::Dogs));
}

#[test]
fn castling_fails_through_attack_or_out_of_check() {
    let mut through_attack = castling_board();
    through_attack.set(sq("f2"), None);
    through_attack.set(sq("f5"), Some(Piece::new(PieceKind::Rook, Side::Cats)));
    assert!(!can_castle(&through_attack, sq("e1"), sq("h1")));
    assert!(can_castle(&through_attack, sq("e1"), sq("a1")));

    let mut in_check = castling_board();
    in_check.set(sq("e2"), None);
    in_check.set(sq("e5"), Some(Piece::new(PieceKind::Rook, Side::Cats)));
    assert!(is_in_check(&in_check, Side::Dogs));
    assert!(!can_castle(&in_check, sq("e1"), sq("h1")));
    assert!(!can_castle(&in_check, sq("e1"), sq("a1")));
}

#[test]
fn pseudo_legal_moves_stay_on_the_board() {
    let position = play(
        Position::new_game(),
        &[("e2", "e4"), ("d7", "d5"), ("d1", "h5"), ("b8", "c6")],
    );
    for square in Square::all() {
        for to in pseudo_legal_moves(&position, square) {
            assert!(to.row() < 8 && to.col() < 8);
        }
    }
}
