//! Cheap pre-search ordering of root moves.
//!
//! Better-looking moves are searched first so alpha-beta bounds tighten
//! early. The heuristic is a material-only evaluation after the move, plus
//! half the value of anything captured and a flat bonus for moving the
//! general, both signed toward the mover.

use crate::game_state::board::Board;
use crate::game_state::errors::{BoardError, BoardResult};
use crate::game_state::xiangqi_types::{Color, Move, PieceKind};
use crate::search::board_scoring::{evaluate, EvaluateSet};

pub const GENERAL_MOVE_BONUS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
}

/// Ordering score of `mv` for `mover`; higher is better for Red.
pub fn quick_score(board: &mut Board, mv: Move, mover: Color) -> BoardResult<f64> {
    let kind = board
        .piece_at(mv.from)
        .map(|p| p.kind)
        .ok_or(BoardError::NoPieceAt(mv.from))?;

    let mut ghost = board.ghost(mv.from, mv.to)?;
    let captured = ghost.captured();
    let mut score = evaluate(&mut ghost, &EvaluateSet::material_only(), false)?;
    if let Some(victim) = captured {
        score += mover.sign() * victim.value() / 2.0;
    }
    if kind == PieceKind::General {
        score += mover.sign() * GENERAL_MOVE_BONUS;
    }
    Ok(score)
}

/// Sort best-first for the mover: descending for Red, ascending for Black.
///
/// The sort is stable, so equal scores keep generation order.
pub fn sort_for_mover(moves: &mut [ScoredMove], mover: Color) {
    if mover.is_maximizing() {
        moves.sort_by(|a, b| b.score.total_cmp(&a.score));
    } else {
        moves.sort_by(|a, b| a.score.total_cmp(&b.score));
    }
}

pub fn order_moves(board: &mut Board, moves: &[Move], mover: Color) -> BoardResult<Vec<ScoredMove>> {
    let mut scored = moves
        .iter()
        .map(|&mv| quick_score(board, mv, mover).map(|score| ScoredMove { mv, score }))
        .collect::<BoardResult<Vec<_>>>()?;
    sort_for_mover(&mut scored, mover);
    Ok(scored)
}
