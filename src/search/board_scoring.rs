//! Static position evaluation.
//!
//! Scores are always from Red's point of view: positive favors Red. Search
//! calls through the `BoardScorer` trait so alternative heuristics can be
//! plugged in without touching the alpha-beta code.

use tracing::info;

use crate::game_state::board::Board;
use crate::game_state::errors::BoardResult;
use crate::game_state::xiangqi_types::Color;
use crate::move_generation::legal_move_checks::terminal_score;
use crate::move_generation::legal_move_generator::piece_destinations;

pub trait BoardScorer: Send + Sync {
    /// Score from Red's perspective.
    fn score(&self, board: &mut Board) -> BoardResult<f64>;
}

/// Weights of the four evaluation terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluateSet {
    pub material: f64,
    /// Flat bonus per attacker piece, also added to control of occupied squares.
    pub attacker_bonus: f64,
    pub mobility: f64,
    pub control: f64,
}

impl Default for EvaluateSet {
    fn default() -> Self {
        Self::new(2.0, 0.1, 0.01, 0.1)
    }
}

impl EvaluateSet {
    #[inline]
    pub const fn new(material: f64, attacker_bonus: f64, mobility: f64, control: f64) -> Self {
        Self {
            material,
            attacker_bonus,
            mobility,
            control,
        }
    }

    /// Unit material weight, every other term off.
    #[inline]
    pub const fn material_only() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    fn needs_destinations(&self) -> bool {
        self.mobility != 0.0 || self.control != 0.0
    }
}

impl BoardScorer for EvaluateSet {
    fn score(&self, board: &mut Board) -> BoardResult<f64> {
        evaluate(board, self, false)
    }
}

/// Per-side partial sums, reported when `describe` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SideBreakdown {
    pub material: f64,
    pub attacker_bonus: f64,
    pub mobility: f64,
}

impl SideBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.material + self.attacker_bonus + self.mobility
    }
}

fn side_breakdown(
    board: &mut Board,
    color: Color,
    weights: &EvaluateSet,
) -> BoardResult<SideBreakdown> {
    let mut sums = SideBreakdown::default();
    let ids = board.live_ids(color).to_vec();
    for id in ids {
        let piece = *board.piece(id);
        sums.material += piece.value() * weights.material;
        if weights.attacker_bonus != 0.0 && piece.is_attacker() {
            sums.attacker_bonus += weights.attacker_bonus;
        }
        if weights.needs_destinations() {
            let dests = piece_destinations(board, id, true)?;
            if weights.mobility != 0.0 {
                sums.mobility += dests.len() as f64 * weights.mobility;
            }
            if weights.control != 0.0 {
                board.record_attacks(color, &dests);
            }
        }
    }
    Ok(sums)
}

/// Rebuild the square attack counters from both sides' filtered destinations.
///
/// Gives the same control map `evaluate` builds when its control weight is set.
pub fn record_control(board: &mut Board) -> BoardResult<()> {
    board.reset_attacks();
    for color in Color::ALL {
        let ids = board.live_ids(color).to_vec();
        for id in ids {
            let dests = piece_destinations(board, id, true)?;
            board.record_attacks(color, &dests);
        }
    }
    Ok(())
}

/// Weighted evaluation of `board`.
///
/// The draw counter yields `0.0`, a missing general yields `+/-inf`. Otherwise
/// the per-side terms are summed Red minus Black and square control is added.
/// Attack counters on the squares are rebuilt as a side effect.
pub fn evaluate(board: &mut Board, weights: &EvaluateSet, describe: bool) -> BoardResult<f64> {
    if let Some(score) = terminal_score(board) {
        return Ok(score);
    }

    board.reset_attacks();
    let red = side_breakdown(board, Color::Red, weights)?;
    let black = side_breakdown(board, Color::Black, weights)?;
    let mut total = red.total() - black.total();

    let mut control_total = 0.0;
    if weights.control != 0.0 {
        for square in board.squares() {
            let weight = if square.is_empty() {
                weights.control
            } else {
                weights.control + weights.attacker_bonus
            };
            control_total += square.control().signum() * weight;
        }
        total += control_total;
    }

    if describe {
        for (color, sums) in [(Color::Red, red), (Color::Black, black)] {
            info!(
                color = %color,
                material = sums.material,
                attacker_bonus = sums.attacker_bonus,
                mobility = sums.mobility,
                "evaluation breakdown"
            );
        }
        info!(control = control_total, total, "evaluation total");
    }
    Ok(total)
}
