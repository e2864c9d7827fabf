//! Crate root module declarations for the Pawprint Chess rules engine and bot.
//!
//! Cats vs Dogs is standard chess with two optional "special abilities". This
//! crate holds the parts that have to be right: the board model, per-piece
//! move rules, the legality filter, the move executor, draw detection, the
//! time-bounded alpha-beta bot, and a small game session that threads all of
//! that state together for a host UI.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod castling;
    pub mod game_status;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_filter;
    pub mod pseudo_legal;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
}

pub mod engines {
    pub mod engine_bot;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod abilities {
    pub mod special_abilities;
}

pub mod session {
    pub mod game_session;
    pub mod snapshot;
}

pub mod utils {
    pub mod algebraic;
    pub mod bot_match;
    pub mod render_board;
}
