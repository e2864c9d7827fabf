//! Deadline-bounded minimax with alpha-beta pruning, written in negamax form.
//!
//! The search never runs past its wall-clock budget. The deadline is a plain
//! `Instant` checked every `NODE_CHECK_INTERVAL` nodes (and before each root
//! move); once it passes, the recursion unwinds and the caller gets the best
//! move of the last fully searched depth, or the best of the partial depth if
//! not even depth one finished.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::game_state::board::{Board, Position};
use crate::game_state::chess_rules::piece_value;
use crate::game_state::chess_types::Side;
use crate::move_generation::legal_move_apply::apply_chess_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_filter::{has_any_legal_move, legal_moves};
use crate::moves::move_descriptions::ChessMove;
use crate::search::board_scoring::BoardScorer;

pub const MATE_SCORE: i32 = 100_000;
const INFINITY: i32 = 1_000_000;

/// Nodes visited between two reads of the clock.
pub const NODE_CHECK_INTERVAL: u64 = 1024;

const PROMOTION_ORDER_BONUS: i32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub time_budget: Duration,
    /// From the second ply below the root on, only this many ordered moves
    /// are searched. The root always sees every legal move.
    pub deep_move_limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            time_budget: Duration::from_secs(3),
            deep_move_limit: Some(12),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: ChessMove,
    pub score: i32,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    /// Root moves in generation order with their scores from the deepest
    /// usable iteration.
    pub root_moves: Vec<ScoredMove>,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub timed_out: bool,
}

/// Searches `position` for `side` and returns its preferred move.
///
/// Ties go to the move generated first. Returns `best_move: None` only when
/// `side` has no legal move at all.
pub fn search_best_move<S: BoardScorer>(
    position: &Position,
    side: Side,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    let started_at = Instant::now();
    let mut ctx = SearchContext {
        scorer,
        deadline: started_at.checked_add(config.time_budget),
        nodes: 0,
        timed_out: false,
        deep_move_limit: config.deep_move_limit,
    };

    let mut result = SearchResult::default();
    let root_moves = legal_moves(position, side);
    if root_moves.is_empty() {
        result.best_score = terminal_score(&position.board, side, 0);
        result.nodes = 1;
        return result;
    }

    for depth in 1..=config.max_depth.max(1) {
        let scored = ctx.search_root(position, side, &root_moves, depth);
        if ctx.timed_out {
            if result.root_moves.is_empty() {
                result.root_moves = scored;
            }
            break;
        }
        result.root_moves = scored;
        result.reached_depth = depth;

        if result.root_moves.iter().any(|m| m.score >= MATE_SCORE) {
            break;
        }
    }

    match first_best(&result.root_moves) {
        Some(best) => {
            result.best_move = Some(best.mv);
            result.best_score = best.score;
        }
        None => {
            // Out of time before a single root move was scored.
            result.best_move = root_moves.first().copied();
            result.best_score = scorer.score(&position.board, side);
        }
    }

    result.nodes = ctx.nodes;
    result.timed_out = ctx.timed_out;
    result.elapsed_ms = started_at.elapsed().as_millis() as u64;

    debug!(
        depth = result.reached_depth,
        nodes = result.nodes,
        elapsed_ms = result.elapsed_ms,
        score = result.best_score,
        timed_out = result.timed_out,
        "search finished"
    );

    result
}

/// First move holding the top score, so generation order breaks ties.
pub fn first_best(moves: &[ScoredMove]) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for candidate in moves {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(*candidate);
        }
    }
    best
}

struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
    deep_move_limit: Option<usize>,
}

impl<S: BoardScorer> SearchContext<'_, S> {
    fn check_deadline(&mut self) -> bool {
        if !self.timed_out {
            if let Some(limit) = self.deadline {
                if Instant::now() >= limit {
                    debug!(nodes = self.nodes, "search deadline reached, unwinding");
                    self.timed_out = true;
                }
            }
        }
        self.timed_out
    }

    /// Full-window score for every root move, so the ranking below the best
    /// move is exact as well.
    fn search_root(
        &mut self,
        position: &Position,
        side: Side,
        root_moves: &[ChessMove],
        depth: u8,
    ) -> Vec<ScoredMove> {
        let mut scored = Vec::with_capacity(root_moves.len());
        for mv in root_moves {
            if self.check_deadline() {
                break;
            }
            let child = apply_chess_move(position, *mv);
            let score = -self.negamax(
                &child.position,
                side.opposite(),
                depth - 1,
                -INFINITY,
                INFINITY,
                1,
            );
            if self.timed_out {
                break;
            }
            scored.push(ScoredMove { mv: *mv, score });
        }
        scored
    }

    fn negamax(
        &mut self,
        position: &Position,
        side: Side,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: u8,
    ) -> i32 {
        self.nodes += 1;
        if self.nodes % NODE_CHECK_INTERVAL == 0 {
            self.check_deadline();
        }
        if self.timed_out {
            return 0;
        }

        if depth == 0 {
            // Terminal positions must dominate material even at the horizon.
            if !has_any_legal_move(position, side) {
                return terminal_score(&position.board, side, depth);
            }
            return self.scorer.score(&position.board, side);
        }

        let mut moves = legal_moves(position, side);
        if moves.is_empty() {
            return terminal_score(&position.board, side, depth);
        }
        order_moves(&position.board, &mut moves);
        if ply >= 2 {
            if let Some(limit) = self.deep_move_limit {
                moves.truncate(limit.max(1));
            }
        }

        let mut best = -INFINITY;
        for mv in moves {
            let child = apply_chess_move(position, mv);
            let score = -self.negamax(
                &child.position,
                side.opposite(),
                depth - 1,
                -beta,
                -alpha,
                ply.saturating_add(1),
            );
            if self.timed_out {
                return 0;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Score for a side with no legal move: mated (worse the more depth was
/// left, so shallower mates are preferred by the winner) or stalemated.
fn terminal_score(board: &Board, side: Side, remaining_depth: u8) -> i32 {
    if is_in_check(board, side) {
        -(MATE_SCORE + i32::from(remaining_depth))
    } else {
        0
    }
}

/// Captures (most valuable victim first) and promotions ahead of quiet
/// moves. Stable, so equal keys keep generation order.
fn order_moves(board: &Board, moves: &mut [ChessMove]) {
    moves.sort_by_key(|mv| {
        let mover = board.get(mv.from).map(|p| p.side);
        let victim = board
            .get(mv.to)
            .filter(|target| Some(target.side) != mover)
            .map(|target| piece_value(target.kind))
            .unwrap_or(0);
        let promotion = if mv.promotion.is_some() {
            PROMOTION_ORDER_BONUS
        } else {
            0
        };
        Reverse(victim + promotion)
    });
}
