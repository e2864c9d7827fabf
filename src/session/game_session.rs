//! A single game in progress.
//!
//! `GameSession` owns everything the rules functions need threaded between
//! plies: the position with its en-passant target, the side to move, the
//! half-move clock and the signature history. Every state change pushes the
//! previous `SessionState` on the undo stack, so undo and redo restore the
//! en-passant target together with the board.
//!
//! Bot moves go through `request_bot_move` / `BotRequest::run` /
//! `apply_bot_reply`. A request remembers the state generation it was taken
//! from and its reply is refused once the session has moved on.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::abilities::special_abilities::{self, AbilityCharges, AbilityResult};
use crate::engines::engine_trait::BotConfig;
use crate::engines::time_management::select_bot_move;
use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::{new_game, Board, EnPassantTarget, Position};
use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};
use crate::move_generation::game_status::{game_status, next_half_move_clock, GameStatus};
use crate::move_generation::legal_move_apply::{apply_move, promote};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_filter::{is_legal_move, legal_destinations};
use crate::moves::move_descriptions::{ChessMove, MoveResult};
use crate::utils::algebraic::move_notation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub abilities_per_side: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            abilities_per_side: 1,
        }
    }
}

/// Everything needed to resume legality and draw detection exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub board: Board,
    pub side_to_move: Side,
    pub captured_by_dogs: Vec<Piece>,
    pub captured_by_cats: Vec<Piece>,
    pub move_notation: Vec<String>,
    pub en_passant: Option<EnPassantTarget>,
    pub half_move_clock: u32,
    pub position_history: Vec<String>,
    pub abilities_remaining: AbilityCharges,
}

impl SessionState {
    pub fn new_game(config: &SessionConfig) -> Self {
        let board = new_game();
        Self {
            board,
            side_to_move: Side::Dogs,
            captured_by_dogs: Vec::new(),
            captured_by_cats: Vec::new(),
            move_notation: Vec::new(),
            en_passant: None,
            half_move_clock: 0,
            position_history: vec![board.signature()],
            abilities_remaining: AbilityCharges::new(config.abilities_per_side),
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position {
            board: self.board,
            en_passant: self.en_passant,
        }
    }

    pub fn status(&self) -> GameStatus {
        game_status(
            &self.position(),
            self.side_to_move,
            self.half_move_clock,
            &self.position_history,
        )
    }

    fn captured_by_mut(&mut self, side: Side) -> &mut Vec<Piece> {
        match side {
            Side::Dogs => &mut self.captured_by_dogs,
            Side::Cats => &mut self.captured_by_cats,
        }
    }
}

/// A pawn move waiting for its promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPromotion {
    from: Square,
    to: Square,
    board_before: Board,
    result: MoveResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: ChessMove,
    /// Empty while a promotion is pending.
    pub notation: String,
    pub captured: Option<Piece>,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub promotion_pending: bool,
    /// Status for the side now to move.
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityOutcome {
    pub ability: AbilityResult,
    pub status: GameStatus,
}

/// A bot search to run off the session, on any thread.
#[derive(Debug, Clone, Copy)]
pub struct BotRequest {
    pub position: Position,
    pub side: Side,
    pub generation: u64,
    pub config: BotConfig,
}

impl BotRequest {
    pub fn run(self) -> BotReply {
        BotReply {
            generation: self.generation,
            side: self.side,
            best_move: select_bot_move(&self.position, self.side, &self.config),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotReply {
    pub generation: u64,
    pub side: Side,
    pub best_move: Option<ChessMove>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    state: SessionState,
    pending: Option<PendingPromotion>,
    undo_stack: Vec<SessionState>,
    redo_stack: Vec<SessionState>,
    generation: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::new_game(&config),
            pending: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            generation: 0,
        }
    }

    /// Back to the starting position. Outstanding bot requests become stale.
    pub fn new_game(&mut self) {
        self.replace_state(SessionState::new_game(&self.config));
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn position(&self) -> Position {
        self.state.position()
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    /// Bumped by every state change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending.map(|p| p.to)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn status(&self) -> GameStatus {
        if self.pending.is_some() {
            return GameStatus::Ongoing;
        }
        self.state.status()
    }

    /// Move highlights for the piece on `from`, if it belongs to the side
    /// to move.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.pending.is_some() {
            return Vec::new();
        }
        legal_destinations(&self.position(), from, self.state.side_to_move)
    }

    pub fn make_move(&mut self, from: Square, to: Square) -> ChessResult<MoveOutcome> {
        self.ensure_can_act()?;
        let side = self.state.side_to_move;
        let position = self.position();
        let piece = position
            .board
            .get(from)
            .ok_or(ChessError::NoPieceAtSquare(from))?;
        if piece.side != side {
            return Err(ChessError::WrongSide { square: from, side });
        }
        if !is_legal_move(&position, from, to, side) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let result = apply_move(&position, from, to);
        self.undo_stack.push(self.state.clone());
        self.redo_stack.clear();
        self.generation += 1;

        if let Some(square) = result.promotion_square {
            self.state.board = result.position.board;
            self.state.en_passant = None;
            self.pending = Some(PendingPromotion {
                from,
                to,
                board_before: position.board,
                result,
            });
            return Ok(MoveOutcome {
                mv: ChessMove::new(from, square),
                notation: String::new(),
                captured: result.captured_piece,
                is_castling: false,
                is_en_passant: false,
                promotion_pending: true,
                status: GameStatus::Ongoing,
            });
        }

        Ok(self.finish_move(&position.board, piece, from, to, result, None))
    }

    /// Resolves the outstanding promotion and completes the move.
    pub fn promote(&mut self, kind: PieceKind) -> ChessResult<MoveOutcome> {
        let pending = self.pending.ok_or(ChessError::NoPromotionPending)?;
        let board = promote(&self.state.board, pending.to, kind)?;
        self.pending = None;

        let mut result = pending.result;
        result.position.board = board;
        let pawn = Piece::new(PieceKind::Pawn, self.state.side_to_move);
        Ok(self.finish_move(
            &pending.board_before,
            pawn,
            pending.from,
            pending.to,
            result,
            Some(kind),
        ))
    }

    fn finish_move(
        &mut self,
        board_before: &Board,
        piece: Piece,
        from: Square,
        to: Square,
        result: MoveResult,
        promotion: Option<PieceKind>,
    ) -> MoveOutcome {
        let mover = self.state.side_to_move;
        if let Some(captured) = result.captured_piece {
            self.state.captured_by_mut(mover).push(captured);
        }
        self.state.half_move_clock = next_half_move_clock(
            self.state.half_move_clock,
            piece.kind,
            result.captured_piece.is_some(),
        );
        self.state.board = result.position.board;
        self.state.en_passant = result.position.en_passant;
        self.state.side_to_move = mover.opposite();
        self.state.position_history.push(self.state.board.signature());

        let status = self.state.status();
        let mut notation = move_notation(board_before, from, to, &result, promotion);
        if status == GameStatus::Checkmate {
            notation.push('#');
        } else if is_in_check(&self.state.board, self.state.side_to_move) {
            notation.push('+');
        }
        self.state.move_notation.push(notation.clone());
        self.generation += 1;
        log_if_over(status, mover);

        MoveOutcome {
            mv: ChessMove {
                from,
                to,
                promotion,
            },
            notation,
            captured: result.captured_piece,
            is_castling: result.is_castling,
            is_en_passant: result.is_en_passant,
            promotion_pending: false,
            status,
        }
    }

    /// The side to move spends an ability charge on `target`. Ends the turn.
    pub fn use_ability(&mut self, target: Square) -> ChessResult<AbilityOutcome> {
        self.ensure_can_act()?;
        let side = self.state.side_to_move;
        if self.state.abilities_remaining.remaining(side) == 0 {
            return Err(ChessError::NoAbilityCharges(side));
        }
        let ability = special_abilities::use_ability(&self.position(), side, target)?;

        self.undo_stack.push(self.state.clone());
        self.redo_stack.clear();
        self.state.abilities_remaining.consume(side)?;
        self.state.board = ability.position.board;
        self.state.en_passant = None;
        self.state.half_move_clock = self.state.half_move_clock.saturating_add(1);
        self.state.side_to_move = side.opposite();
        self.state.position_history.push(self.state.board.signature());
        self.state.move_notation.push(format!(
            "{:?}({}-{})",
            ability.kind, ability.lured_from, ability.lured_to
        ));
        self.generation += 1;

        let status = self.state.status();
        log_if_over(status, side);
        Ok(AbilityOutcome { ability, status })
    }

    /// Takes back the last action, including a half-finished promotion.
    pub fn undo(&mut self) -> ChessResult<()> {
        let previous = self.undo_stack.pop().ok_or(ChessError::NoHistory("undo"))?;
        if self.pending.take().is_none() {
            self.redo_stack.push(self.state.clone());
        }
        self.state = previous;
        self.generation += 1;
        Ok(())
    }

    pub fn redo(&mut self) -> ChessResult<()> {
        if let Some(pending) = self.pending {
            return Err(ChessError::PromotionPending(pending.to));
        }
        let next = self.redo_stack.pop().ok_or(ChessError::NoHistory("redo"))?;
        self.undo_stack.push(std::mem::replace(&mut self.state, next));
        self.generation += 1;
        Ok(())
    }

    /// Snapshot of what the bot needs. Only one search per generation is
    /// meaningful; later replies for older generations are refused.
    pub fn request_bot_move(&self, config: &BotConfig) -> ChessResult<BotRequest> {
        self.ensure_can_act()?;
        Ok(BotRequest {
            position: self.position(),
            side: self.state.side_to_move,
            generation: self.generation,
            config: *config,
        })
    }

    /// Plays the bot's answer. `Ok(None)` means the bot had no move: the
    /// game is over, or the turn passes so play cannot freeze.
    pub fn apply_bot_reply(&mut self, reply: BotReply) -> ChessResult<Option<MoveOutcome>> {
        if reply.generation != self.generation {
            warn!(
                reply = reply.generation,
                current = self.generation,
                "discarding stale bot reply"
            );
            return Err(ChessError::StaleBotReply {
                reply: reply.generation,
                current: self.generation,
            });
        }

        let Some(mv) = reply.best_move else {
            if !self.status().is_terminal() {
                warn!(side = ?reply.side, "bot returned no move, passing the turn");
                self.undo_stack.push(self.state.clone());
                self.redo_stack.clear();
                self.state.en_passant = None;
                self.state.half_move_clock = self.state.half_move_clock.saturating_add(1);
                self.state.side_to_move = self.state.side_to_move.opposite();
                self.generation += 1;
            }
            return Ok(None);
        };

        let outcome = self.make_move(mv.from, mv.to)?;
        if outcome.promotion_pending {
            let kind = mv.promotion.unwrap_or(PieceKind::Queen);
            return self.promote(kind).map(Some);
        }
        Ok(Some(outcome))
    }

    /// Request, search and apply in one go on the calling thread.
    pub fn play_bot_turn(&mut self, config: &BotConfig) -> ChessResult<Option<MoveOutcome>> {
        let request = self.request_bot_move(config)?;
        self.apply_bot_reply(request.run())
    }

    /// Swaps in a whole new state, dropping history and any pending choice.
    pub(crate) fn replace_state(&mut self, state: SessionState) {
        self.state = state;
        self.pending = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.generation += 1;
    }

    fn ensure_can_act(&self) -> ChessResult<()> {
        if let Some(pending) = self.pending {
            return Err(ChessError::PromotionPending(pending.to));
        }
        if self.state.status().is_terminal() {
            return Err(ChessError::GameOver);
        }
        Ok(())
    }
}

fn log_if_over(status: GameStatus, last_mover: Side) {
    if status.is_terminal() {
        info!(?status, draw = status.is_draw(), ?last_mover, "game over");
    }
}
