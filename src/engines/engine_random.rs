//! Uniform random-move engine.
//!
//! Baseline opponent for self-play and match-harness tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineError, EngineOutput, GoParams};
use crate::game_state::board::Board;
use crate::game_state::xiangqi_types::Color;
use crate::move_generation::legal_move_generator::{LegalMoveGenerator, MoveGenerator};

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlumXiangqi Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        if name.eq_ignore_ascii_case("Seed") {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| EngineError::invalid_option(name, value))?;
            self.rng = StdRng::seed_from_u64(seed);
            return Ok(());
        }
        Err(EngineError::UnknownOption(name.to_owned()))
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        color: Color,
        _params: &GoParams,
    ) -> Result<EngineOutput, EngineError> {
        let legal_moves = self.move_generator.generate_moves(board, color)?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        Ok(out)
    }
}
