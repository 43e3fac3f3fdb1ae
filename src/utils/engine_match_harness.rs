//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other through a `Game`
//! session, so every engine move is validated like a user move.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::engines::engine_trait::{Engine, EngineError, GoParams};
use crate::game_state::board::Board;
use crate::game_state::game::{Game, GameOutcome, MoveValidation};
use crate::game_state::xiangqi_types::Color;
use crate::move_generation::legal_move_checks::mate_value;
use crate::utils::move_log::MoveLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    RedWinGeneralCaptured,
    BlackWinGeneralCaptured,
    RedWinNoLegalMove,
    BlackWinNoLegalMove,
    DrawUncapturing,
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::RedWinGeneralCaptured | MatchOutcome::RedWinNoLegalMove => {
                Some(Color::Red)
            }
            MatchOutcome::BlackWinGeneralCaptured | MatchOutcome::BlackWinNoLegalMove => {
                Some(Color::Black)
            }
            MatchOutcome::DrawUncapturing | MatchOutcome::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub first_to_move: Color,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            first_to_move: Color::Red,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub move_log: MoveLog,
    pub plies: u16,
    pub red_move_count: u32,
    pub black_move_count: u32,
    pub red_total_time_ns: u128,
    pub black_total_time_ns: u128,
    pub started_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn report(&self) -> String {
        let avg_ms = |total_ns: u128, moves: u32| {
            if moves == 0 {
                0.0
            } else {
                total_ns as f64 / f64::from(moves) / 1_000_000.0
            }
        };
        format!(
            "started={} outcome={:?} plies={} red_avg_ms={:.3} black_avg_ms={:.3}",
            self.started_at.to_rfc3339(),
            self.outcome,
            self.plies,
            avg_ms(self.red_total_time_ns, self.red_move_count),
            avg_ms(self.black_total_time_ns, self.black_move_count),
        )
    }
}

fn finished_outcome(game: &mut Game) -> Result<Option<MatchOutcome>, EngineError> {
    let outcome = match game.outcome()? {
        GameOutcome::Ongoing => return Ok(None),
        GameOutcome::Draw => MatchOutcome::DrawUncapturing,
        GameOutcome::RedWins if mate_value(game.board()).is_some() => {
            MatchOutcome::RedWinGeneralCaptured
        }
        GameOutcome::RedWins => MatchOutcome::RedWinNoLegalMove,
        GameOutcome::BlackWins if mate_value(game.board()).is_some() => {
            MatchOutcome::BlackWinGeneralCaptured
        }
        GameOutcome::BlackWins => MatchOutcome::BlackWinNoLegalMove,
    };
    Ok(Some(outcome))
}

/// Play a match from the standard layout.
pub fn play_engine_match(
    engine_red: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    config: MatchConfig,
) -> Result<MatchResult, EngineError> {
    play_engine_match_from_board(engine_red, engine_black, Board::standard()?, config)
}

/// Play a match from a caller-provided position.
pub fn play_engine_match_from_board(
    engine_red: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    board: Board,
    config: MatchConfig,
) -> Result<MatchResult, EngineError> {
    engine_red.new_game();
    engine_black.new_game();

    let started_at = Utc::now();
    let mut game = Game::new(board, config.first_to_move);
    let mut plies = 0u16;
    let mut move_counts = [0u32; 2];
    let mut total_time_ns = [0u128; 2];

    let outcome = loop {
        if let Some(outcome) = finished_outcome(&mut game)? {
            break outcome;
        }
        if plies >= config.max_plies {
            break MatchOutcome::DrawMaxPlies;
        }

        let mover = game.current_color();
        let engine: &mut dyn Engine = match mover {
            Color::Red => &mut *engine_red,
            Color::Black => &mut *engine_black,
        };

        let started = Instant::now();
        let out = engine.choose_move(game.board_mut(), mover, &config.go_params)?;
        let elapsed_ns = started.elapsed().as_nanos();
        move_counts[mover.index()] = move_counts[mover.index()].saturating_add(1);
        total_time_ns[mover.index()] = total_time_ns[mover.index()].saturating_add(elapsed_ns);
        for line in &out.info_lines {
            debug!(engine = engine.name(), "{line}");
        }

        let Some(mv) = out.best_move else {
            break match mover {
                Color::Red => MatchOutcome::BlackWinNoLegalMove,
                Color::Black => MatchOutcome::RedWinNoLegalMove,
            };
        };
        if !game.try_move(mv.from, mv.to, MoveValidation::Full)? {
            warn!(engine = engine.name(), %mv, "engine move rejected");
            return Err(EngineError::IllegalMove {
                engine: engine.name().to_owned(),
                mv,
            });
        }
        plies += 1;
    };

    info!(?outcome, plies, "match finished");
    let (final_board, move_log) = game.into_parts();
    Ok(MatchResult {
        outcome,
        final_board,
        move_log,
        plies,
        red_move_count: move_counts[Color::Red.index()],
        black_move_count: move_counts[Color::Black.index()],
        red_total_time_ns: total_time_ns[Color::Red.index()],
        black_total_time_ns: total_time_ns[Color::Black.index()],
        started_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::game_state::geometry::Coord;
    use crate::game_state::setup::Placement;
    use crate::game_state::xiangqi_types::{Move, PieceKind};
    use crate::engines::engine_trait::EngineOutput;

    #[test]
    fn random_self_play_respects_the_ply_cap() {
        let mut red = RandomEngine::with_seed(1);
        let mut black = RandomEngine::with_seed(2);
        let config = MatchConfig {
            max_plies: 30,
            ..MatchConfig::default()
        };
        let result = play_engine_match(&mut red, &mut black, config).expect("match runs");

        assert!(result.plies <= 30);
        assert_eq!(usize::from(result.plies), result.move_log.len());
        assert_eq!(usize::from(result.plies), result.final_board.history().len());
        assert!(result.red_move_count >= u32::from(result.plies) / 2);
        assert!(result.report().contains("outcome="));
        if result.outcome == MatchOutcome::DrawMaxPlies {
            assert_eq!(result.plies, 30);
        }
    }

    #[test]
    fn boxed_in_side_loses_before_moving() {
        let board = Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 3, 0),
            Placement::new(PieceKind::General, Color::Black, 5, 9),
            Placement::new(PieceKind::Chariot, Color::Black, 4, 6),
            Placement::new(PieceKind::Chariot, Color::Black, 8, 1),
        ])
        .expect("valid placements");
        let mut red = MinimaxEngine::with_seed(1, 0);
        let mut black = RandomEngine::with_seed(0);
        let result =
            play_engine_match_from_board(&mut red, &mut black, board, MatchConfig::default())
                .expect("match runs");
        assert_eq!(result.outcome, MatchOutcome::BlackWinNoLegalMove);
        assert_eq!(result.outcome.winner(), Some(Color::Black));
        assert_eq!(result.plies, 0);
        assert!(result.move_log.is_empty());
    }

    struct Cheater;

    impl Engine for Cheater {
        fn name(&self) -> &str {
            "cheater"
        }

        fn choose_move(
            &mut self,
            _board: &mut Board,
            _color: Color,
            _params: &GoParams,
        ) -> Result<EngineOutput, EngineError> {
            Ok(EngineOutput {
                best_move: Some(Move::new(Coord::new(0, 0), Coord::new(0, 8))),
                ..EngineOutput::default()
            })
        }
    }

    #[test]
    fn illegal_engine_move_is_an_error() {
        let mut red = Cheater;
        let mut black = RandomEngine::with_seed(5);
        let err = play_engine_match(&mut red, &mut black, MatchConfig::default())
            .expect_err("cheater is caught");
        assert!(matches!(err, EngineError::IllegalMove { .. }));
    }
}
