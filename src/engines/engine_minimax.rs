//! Alpha-beta engine with optional near-best randomization.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{parse_bool_option, Engine, EngineError, EngineOutput, GoParams};
use crate::game_state::board::Board;
use crate::game_state::xiangqi_types::Color;
use crate::search::alpha_beta::{AlphaBetaSearch, SearchConfig};
use crate::search::board_scoring::EvaluateSet;
use crate::search::move_selection::{choose_near_best, near_best_moves, DEFAULT_NEAR_BEST_MARGIN};

pub struct MinimaxEngine {
    weights: EvaluateSet,
    config: SearchConfig,
    randomize_near_best: bool,
    near_best_margin: f64,
    rng: StdRng,
}

impl MinimaxEngine {
    pub fn new(depth: u8) -> Self {
        Self {
            weights: EvaluateSet::default(),
            config: SearchConfig {
                depth: depth.max(1),
                ..SearchConfig::default()
            },
            randomize_near_best: false,
            near_best_margin: DEFAULT_NEAR_BEST_MARGIN,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible engine; only matters when near-best randomization is on.
    pub fn with_seed(depth: u8, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(depth)
        }
    }

    pub fn with_weights(mut self, weights: EvaluateSet) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_near_best(mut self, margin: f64) -> Self {
        self.randomize_near_best = true;
        self.near_best_margin = margin;
        self
    }

    #[inline]
    pub fn weights(&self) -> &EvaluateSet {
        &self.weights
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default().depth)
    }
}

fn parse_weight(name: &str, value: &str) -> Result<f64, EngineError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| EngineError::invalid_option(name, value))
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "PlumXiangqi Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        match name.to_ascii_lowercase().as_str() {
            "depth" => {
                self.config.depth = value
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .filter(|d| *d >= 1)
                    .ok_or_else(|| EngineError::invalid_option(name, value))?;
            }
            "materialweight" => self.weights.material = parse_weight(name, value)?,
            "attackerbonus" => self.weights.attacker_bonus = parse_weight(name, value)?,
            "mobilityweight" => self.weights.mobility = parse_weight(name, value)?,
            "controlweight" => self.weights.control = parse_weight(name, value)?,
            "randomizenearbest" => self.randomize_near_best = parse_bool_option(name, value)?,
            "nearbestmargin" => {
                let margin = parse_weight(name, value)?;
                if margin < 0.0 {
                    return Err(EngineError::invalid_option(name, value));
                }
                self.near_best_margin = margin;
            }
            "internalselfcheck" => {
                self.config.internal_self_check = parse_bool_option(name, value)?;
            }
            "seed" => {
                let seed = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| EngineError::invalid_option(name, value))?;
                self.rng = StdRng::seed_from_u64(seed);
            }
            _ => return Err(EngineError::UnknownOption(name.to_owned())),
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        color: Color,
        params: &GoParams,
    ) -> Result<EngineOutput, EngineError> {
        let config = SearchConfig {
            depth: params.depth.unwrap_or(self.config.depth).max(1),
            ..self.config
        };
        let mut search = AlphaBetaSearch::new(&self.weights, config);
        let result = search.get_best_move(board, color)?;

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            info_lines: vec![format!(
                "info string minimax depth {} nodes {} score {} root_moves {}",
                config.depth,
                result.nodes,
                result.best_score,
                result.root_moves.len()
            )],
        };

        if self.randomize_near_best {
            let near = near_best_moves(
                &mut search,
                board,
                color,
                &result,
                self.near_best_margin,
            )?;
            out.best_move = choose_near_best(&near, result.best_move, &mut self.rng);
            if out.best_move != result.best_move {
                out.info_lines
                    .push("info string near-best randomization picked an alternative".to_owned());
            }
        }
        Ok(out)
    }
}
