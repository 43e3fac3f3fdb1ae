//! Engine abstraction shared by the self-play binary and the match harness.
//!
//! Engines are driven one request at a time: the caller lends the board and
//! names the side to move, and gets back a move (or `None` for "no legal
//! move") plus human-readable info lines.

use crate::game_state::board::Board;
use crate::game_state::errors::BoardError;
use crate::game_state::xiangqi_types::{Color, Move};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid value '{value}' for option {name}")]
    InvalidOption { name: String, value: String },

    #[error("unknown option {0}")]
    UnknownOption(String),

    #[error("engine {engine} proposed illegal move {mv}")]
    IllegalMove { engine: String, mv: Move },

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl EngineError {
    pub(crate) fn invalid_option(name: &str, value: &str) -> Self {
        Self::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Overrides the engine's configured depth for this request.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// Red-positive search score, when the engine searched.
    pub score: Option<f64>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), EngineError> {
        Err(EngineError::UnknownOption(name.to_owned()))
    }

    /// Pick a move for `color`. The board is returned unchanged.
    fn choose_move(
        &mut self,
        board: &mut Board,
        color: Color,
        params: &GoParams,
    ) -> Result<EngineOutput, EngineError>;
}

/// Parse the truthy/falsy spellings accepted for boolean options.
pub(crate) fn parse_bool_option(name: &str, value: &str) -> Result<bool, EngineError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(EngineError::invalid_option(name, value)),
    }
}
