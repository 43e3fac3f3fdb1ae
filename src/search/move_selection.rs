//! Randomized choice among near-best root moves.
//!
//! Runs after the search. A pruned search only reports bounds for moves that
//! failed low, so candidates picked on those scores are searched again with a
//! full window before they are offered.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::game_state::board::Board;
use crate::game_state::errors::BoardResult;
use crate::game_state::xiangqi_types::{Color, Move};
use crate::search::alpha_beta::{AlphaBetaSearch, SearchResult};
use crate::search::board_scoring::BoardScorer;

pub const DEFAULT_NEAR_BEST_MARGIN: f64 = 0.05;

/// Whether `score` is within `margin` (relative) of `best`.
///
/// A zero best score has no meaningful ratio and accepts everything; an
/// infinite one only accepts itself.
pub fn within_margin(score: f64, best: f64, margin: f64) -> bool {
    if best == 0.0 {
        return true;
    }
    if best.is_infinite() || score.is_infinite() {
        return score == best;
    }
    ((score - best) / best).abs() <= margin
}

/// Root moves whose reported score is within `margin` of the best, in search order.
///
/// A fail-low bound is never worse for the mover than the move's real value,
/// so this is a superset of the truly near-best moves.
pub fn near_best_candidates(result: &SearchResult, margin: f64) -> Vec<Move> {
    if result.best_move.is_none() {
        return Vec::new();
    }
    result
        .root_moves
        .iter()
        .filter(|scored| within_margin(scored.score, result.best_score, margin))
        .map(|scored| scored.mv)
        .collect()
}

/// Near-best moves judged on exact scores.
///
/// The best move's score is already exact; every other candidate is searched
/// again by `search` with a full window.
pub fn near_best_moves<S: BoardScorer>(
    search: &mut AlphaBetaSearch<'_, S>,
    board: &mut Board,
    color: Color,
    result: &SearchResult,
    margin: f64,
) -> BoardResult<Vec<Move>> {
    let mut out = Vec::new();
    for mv in near_best_candidates(result, margin) {
        let exact = if Some(mv) == result.best_move {
            result.best_score
        } else {
            search.exact_score(board, mv, color)?
        };
        if within_margin(exact, result.best_score, margin) {
            out.push(mv);
        }
    }
    Ok(out)
}

/// Uniform pick among `moves`, falling back to `best` when there are none.
pub fn choose_near_best<R: Rng + ?Sized>(
    moves: &[Move],
    best: Option<Move>,
    rng: &mut R,
) -> Option<Move> {
    moves.choose(rng).copied().or(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::geometry::Coord;
    use crate::game_state::setup::Placement;
    use crate::game_state::xiangqi_types::PieceKind;
    use crate::search::alpha_beta::SearchConfig;
    use crate::search::board_scoring::EvaluateSet;
    use crate::search::move_ordering::ScoredMove;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mv(file: i8) -> Move {
        Move::new(Coord::new(file, 0), Coord::new(file, 1))
    }

    fn result(best: f64, scores: &[f64]) -> SearchResult {
        let root_moves: Vec<ScoredMove> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ScoredMove {
                mv: mv(i as i8),
                score,
            })
            .collect();
        let best_move = root_moves
            .iter()
            .find(|s| s.score == best)
            .map(|s| s.mv);
        SearchResult {
            best_move,
            best_score: best,
            nodes: 0,
            root_moves,
        }
    }

    #[test]
    fn margin_is_relative_to_the_best_score() {
        assert!(within_margin(9.6, 10.0, 0.05));
        assert!(!within_margin(9.4, 10.0, 0.05));
        assert!(within_margin(-10.4, -10.0, 0.05));
        assert!(within_margin(123.0, 0.0, 0.05));
        assert!(!within_margin(1e9, f64::INFINITY, 0.05));
        assert!(within_margin(f64::INFINITY, f64::INFINITY, 0.05));
    }

    #[test]
    fn reported_scores_pick_the_candidates() {
        let r = result(10.0, &[10.0, 3.0, 9.8, -2.0]);
        assert_eq!(
            near_best_candidates(&r, DEFAULT_NEAR_BEST_MARGIN),
            vec![mv(0), mv(2)]
        );

        let picks = near_best_candidates(&r, DEFAULT_NEAR_BEST_MARGIN);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let picked = choose_near_best(&picks, r.best_move, &mut rng);
            assert!(matches!(picked, Some(m) if m == mv(0) || m == mv(2)));
        }
    }

    #[test]
    fn zero_best_makes_every_move_eligible() {
        let r = result(0.0, &[0.0, 5.0, -7.0]);
        assert_eq!(near_best_candidates(&r, DEFAULT_NEAR_BEST_MARGIN).len(), 3);
    }

    #[test]
    fn no_legal_move_stays_none() {
        let r = SearchResult::default();
        let mut rng = StdRng::seed_from_u64(1);
        let picks = near_best_candidates(&r, DEFAULT_NEAR_BEST_MARGIN);
        assert_eq!(choose_near_best(&picks, r.best_move, &mut rng), None);
    }

    /// Red's chariot on (0, 4) can step onto two squares the black horse
    /// covers. A pruned search cuts those lines after a quiet reply and reports
    /// them level with the best move.
    fn hanging_chariot() -> Board {
        Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 3, 0),
            Placement::new(PieceKind::Chariot, Color::Red, 0, 4),
            Placement::new(PieceKind::Soldier, Color::Red, 0, 5),
            Placement::new(PieceKind::General, Color::Black, 4, 9),
            Placement::new(PieceKind::Horse, Color::Black, 6, 6),
        ])
        .expect("valid placements")
    }

    #[test]
    fn moves_that_hang_material_are_not_near_best() {
        let mut board = hanging_chariot();
        let before = board.clone();
        let weights = EvaluateSet::material_only();
        let config = SearchConfig {
            depth: 2,
            ..SearchConfig::default()
        };
        let mut search = AlphaBetaSearch::new(&weights, config);
        let result = search.get_best_move(&mut board, Color::Red).expect("search");
        assert_eq!(result.best_score, 6.5);

        let near = near_best_moves(
            &mut search,
            &mut board,
            Color::Red,
            &result,
            DEFAULT_NEAR_BEST_MARGIN,
        )
        .expect("re-search");
        let hanging = [
            Move::new(Coord::new(0, 4), Coord::new(5, 4)),
            Move::new(Coord::new(0, 4), Coord::new(7, 4)),
        ];
        for mv in hanging {
            assert!(!near.contains(&mv), "{mv} hangs the chariot");
            assert_eq!(search.exact_score(&mut board, mv, Color::Red).expect("search"), -2.5);
        }
        assert!(near.contains(&Move::new(Coord::new(0, 4), Coord::new(0, 3))));
        assert!(result.best_move.is_some_and(|best| near.contains(&best)));
        assert_eq!(board, before);
    }
}
