//! Depth-limited minimax with alpha-beta pruning.
//!
//! Red maximizes and Black minimizes a Red-positive score. The board is
//! borrowed mutably for the whole search; each branch is explored through a
//! `GhostMove`, so every frame leaves the board as it found it.

use tracing::{debug, info};

use crate::game_state::board::Board;
use crate::game_state::errors::BoardResult;
use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::{Color, Move};
use crate::move_generation::legal_move_checks::terminal_score;
use crate::move_generation::legal_move_generator::{legal_moves, piece_destinations};
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::{order_moves, ScoredMove};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root; `1` scores the position after each root move.
    pub depth: u8,
    /// `false` runs plain exhaustive minimax.
    pub pruning: bool,
    /// Filter self-check at internal nodes. Root moves are always filtered.
    pub internal_self_check: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            pruning: true,
            internal_self_check: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// `None` means the mover has no legal move and has lost.
    pub best_move: Option<Move>,
    pub best_score: f64,
    pub nodes: u64,
    /// Searched root moves with their scores, in search order.
    pub root_moves: Vec<ScoredMove>,
}

/// Score that ends the search for `mover` immediately.
#[inline]
fn winning_score(mover: Color) -> f64 {
    mover.sign() * f64::INFINITY
}

#[inline]
fn color_of(maximizing: bool) -> Color {
    if maximizing {
        Color::Red
    } else {
        Color::Black
    }
}

pub struct AlphaBetaSearch<'a, S: BoardScorer> {
    scorer: &'a S,
    config: SearchConfig,
    nodes: u64,
}

impl<'a, S: BoardScorer> AlphaBetaSearch<'a, S> {
    pub fn new(scorer: &'a S, config: SearchConfig) -> Self {
        Self {
            scorer,
            config,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score of playing `from -> to` for the side given by `maximizing`.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &mut self,
        board: &mut Board,
        from: Coord,
        to: Coord,
        depth: u8,
        alpha: f64,
        beta: f64,
        maximizing: bool,
    ) -> BoardResult<f64> {
        let mut ghost = board.ghost(from, to)?;
        self.minimax_wrapper(&mut ghost, depth.saturating_sub(1), !maximizing, alpha, beta)
    }

    /// Value of the current position with `depth` plies left to search.
    pub fn minimax_wrapper(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> BoardResult<f64> {
        self.nodes += 1;

        if let Some(score) = terminal_score(board) {
            return Ok(score);
        }
        if depth == 0 {
            return self.scorer.score(board);
        }

        let mut extreme = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        let ids = board.live_ids(color_of(maximizing)).to_vec();
        'pieces: for id in ids {
            let from = board.piece(id).position();
            for to in piece_destinations(board, id, self.config.internal_self_check)? {
                let value = self.minimax(board, from, to, depth, alpha, beta, maximizing)?;
                if maximizing {
                    extreme = extreme.max(value);
                    alpha = alpha.max(extreme);
                } else {
                    extreme = extreme.min(value);
                    beta = beta.min(extreme);
                }
                if self.config.pruning && beta <= alpha {
                    break 'pieces;
                }
            }
        }
        Ok(extreme)
    }

    /// Exact value of the root move `mv` for `color` at the configured depth.
    ///
    /// Root scores in a `SearchResult` are only bounds once alpha or beta has
    /// moved; this searches the move again with a full window.
    pub fn exact_score(&mut self, board: &mut Board, mv: Move, color: Color) -> BoardResult<f64> {
        let depth = self.config.depth.max(1);
        self.minimax(
            board,
            mv.from,
            mv.to,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            color.is_maximizing(),
        )
    }

    /// Best move for `color` from the current position.
    pub fn get_best_move(&mut self, board: &mut Board, color: Color) -> BoardResult<SearchResult> {
        self.nodes = 0;
        let depth = self.config.depth.max(1);
        let maximizing = color.is_maximizing();

        let moves = legal_moves(board, color, true)?;
        if moves.is_empty() {
            info!(color = %color, "no legal move");
            return Ok(SearchResult {
                best_move: None,
                best_score: -winning_score(color),
                nodes: 0,
                root_moves: Vec::new(),
            });
        }

        let ordered = order_moves(board, &moves, color)?;
        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best: Option<ScoredMove> = None;
        let mut root_moves = Vec::with_capacity(ordered.len());

        for candidate in &ordered {
            let mv = candidate.mv;
            let score = self.minimax(board, mv.from, mv.to, depth, alpha, beta, maximizing)?;
            debug!(%mv, score, ordering = candidate.score, "root move searched");
            root_moves.push(ScoredMove { mv, score });

            let improves = if maximizing {
                score > alpha
            } else {
                score < beta
            };
            if improves {
                if maximizing {
                    alpha = score;
                } else {
                    beta = score;
                }
                best = Some(ScoredMove { mv, score });
            }
            if score == winning_score(color) {
                break;
            }
        }

        // Every move scored as the worst case: still play something.
        let best = best.unwrap_or(root_moves[0]);
        info!(
            color = %color,
            best = %best.mv,
            score = best.score,
            nodes = self.nodes,
            depth,
            "search complete"
        );
        Ok(SearchResult {
            best_move: Some(best.mv),
            best_score: best.score,
            nodes: self.nodes,
            root_moves,
        })
    }
}

/// One-shot search with a fresh node counter.
pub fn get_best_move<S: BoardScorer>(
    board: &mut Board,
    color: Color,
    scorer: &S,
    config: SearchConfig,
) -> BoardResult<SearchResult> {
    AlphaBetaSearch::new(scorer, config).get_best_move(board, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::setup::Placement;
    use crate::game_state::xiangqi_types::PieceKind;
    use crate::search::board_scoring::EvaluateSet;

    fn middlegame() -> Board {
        Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 4, 0),
            Placement::new(PieceKind::Chariot, Color::Red, 0, 0),
            Placement::new(PieceKind::Horse, Color::Red, 2, 2),
            Placement::new(PieceKind::Cannon, Color::Red, 7, 2),
            Placement::new(PieceKind::Soldier, Color::Red, 4, 5),
            Placement::new(PieceKind::General, Color::Black, 3, 9),
            Placement::new(PieceKind::Chariot, Color::Black, 8, 9),
            Placement::new(PieceKind::Horse, Color::Black, 6, 7),
            Placement::new(PieceKind::Cannon, Color::Black, 1, 7),
            Placement::new(PieceKind::Soldier, Color::Black, 2, 6),
        ])
        .expect("valid placements")
    }

    fn compare_with_exhaustive(scorer: &EvaluateSet, depth: u8, color: Color) {
        let mut board = middlegame();
        let before = board.clone();
        let pruned = SearchConfig {
            depth,
            ..SearchConfig::default()
        };
        let exhaustive = SearchConfig {
            pruning: false,
            ..pruned
        };

        let fast = get_best_move(&mut board, color, scorer, pruned).expect("search");
        let slow = get_best_move(&mut board, color, scorer, exhaustive).expect("search");
        assert_eq!(board, before);
        assert_eq!(fast.best_score, slow.best_score);
        assert_eq!(fast.best_move, slow.best_move);
        assert!(fast.nodes <= slow.nodes);
    }

    #[test]
    fn alpha_beta_matches_exhaustive_minimax_on_material() {
        compare_with_exhaustive(&EvaluateSet::material_only(), 3, Color::Red);
        compare_with_exhaustive(&EvaluateSet::material_only(), 3, Color::Black);
    }

    #[test]
    fn exact_scores_match_exhaustive_root_scores() {
        let mut board = middlegame();
        let weights = EvaluateSet::material_only();
        let config = SearchConfig {
            depth: 2,
            pruning: false,
            ..SearchConfig::default()
        };
        let slow = get_best_move(&mut board, Color::Red, &weights, config).expect("search");

        let mut search = AlphaBetaSearch::new(
            &weights,
            SearchConfig {
                pruning: true,
                ..config
            },
        );
        for scored in &slow.root_moves {
            let exact = search
                .exact_score(&mut board, scored.mv, Color::Red)
                .expect("re-search");
            assert_eq!(exact, scored.score, "{}", scored.mv);
        }
    }

    #[test]
    fn alpha_beta_matches_exhaustive_minimax_on_full_weights() {
        compare_with_exhaustive(&EvaluateSet::default(), 2, Color::Red);
    }

    #[test]
    fn takes_the_general_when_it_hangs() {
        let mut board = Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 3, 0),
            Placement::new(PieceKind::Chariot, Color::Red, 4, 5),
            Placement::new(PieceKind::General, Color::Black, 4, 9),
            Placement::new(PieceKind::Horse, Color::Black, 0, 9),
        ])
        .expect("valid placements");
        let result = get_best_move(
            &mut board,
            Color::Red,
            &EvaluateSet::default(),
            SearchConfig::default(),
        )
        .expect("search");
        assert_eq!(
            result.best_move,
            Some(Move::new(Coord::new(4, 5), Coord::new(4, 9)))
        );
        assert_eq!(result.best_score, f64::INFINITY);
        assert_eq!(result.root_moves.len(), 1, "search stops on a forced win");
    }

    #[test]
    fn black_stops_early_on_a_won_line_too() {
        let mut board = Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 4, 0),
            Placement::new(PieceKind::Soldier, Color::Red, 0, 3),
            Placement::new(PieceKind::General, Color::Black, 3, 9),
            Placement::new(PieceKind::Chariot, Color::Black, 4, 4),
        ])
        .expect("valid placements");
        let result = get_best_move(
            &mut board,
            Color::Black,
            &EvaluateSet::material_only(),
            SearchConfig {
                depth: 2,
                ..SearchConfig::default()
            },
        )
        .expect("search");
        assert_eq!(
            result.best_move,
            Some(Move::new(Coord::new(4, 4), Coord::new(4, 0)))
        );
        assert_eq!(result.best_score, f64::NEG_INFINITY);
        assert_eq!(result.root_moves.len(), 1);
    }

    #[test]
    fn boxed_in_general_has_no_move() {
        let mut board = Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 3, 0),
            Placement::new(PieceKind::General, Color::Black, 5, 9),
            Placement::new(PieceKind::Chariot, Color::Black, 4, 6),
            Placement::new(PieceKind::Chariot, Color::Black, 8, 1),
        ])
        .expect("valid placements");
        let before = board.clone();
        let result = get_best_move(
            &mut board,
            Color::Red,
            &EvaluateSet::default(),
            SearchConfig::default(),
        )
        .expect("search");
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, f64::NEG_INFINITY);
        assert_eq!(board, before);
    }

    struct Hopeless;

    impl BoardScorer for Hopeless {
        fn score(&self, _board: &mut Board) -> BoardResult<f64> {
            Ok(f64::NEG_INFINITY)
        }
    }

    #[test]
    fn lost_position_still_returns_the_first_ordered_move() {
        let mut board = middlegame();
        let result = get_best_move(
            &mut board,
            Color::Red,
            &Hopeless,
            SearchConfig {
                depth: 1,
                ..SearchConfig::default()
            },
        )
        .expect("search");
        assert_eq!(result.best_score, f64::NEG_INFINITY);
        assert_eq!(result.best_move, Some(result.root_moves[0].mv));
        assert!(result.root_moves.len() > 1);
    }
}
