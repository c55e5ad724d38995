//! Crate root module declarations for the Plum Arbiter rules engine.
//!
//! This file exposes all top-level subsystems (game state, piece rules, move
//! generation, search, algorithms, and utility helpers) so binaries, benches,
//! and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod board_setup;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_history;
    pub mod game_state;
    pub mod game_state_checker;
    pub mod piece;
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
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod negamax;
    pub mod scored_move;
    pub mod threading;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
    pub mod timed_search;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
