//! Crate root module declarations for the Plum Xiangqi engine project.
//!
//! This file exposes the rule engine (board state, move generation, check
//! detection), the search and evaluation layer, the engine abstraction and
//! the utility helpers so the binary, benches and tests can import stable
//! module paths.

pub mod game_state {
    pub mod board;
    pub mod errors;
    pub mod game;
    pub mod geometry;
    pub mod piece;
    pub mod setup;
    pub mod square;
    pub mod undo_state;
    pub mod xiangqi_types;
}

pub mod moves {
    pub mod movement_descriptor;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod move_selection;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod move_log;
    pub mod render_board;
}
