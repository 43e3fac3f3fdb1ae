use crate::game_state::board::Board;
use crate::game_state::errors::BoardResult;
use crate::game_state::xiangqi_types::{Color, Move};
use crate::move_generation::legal_move_checks::{is_in_check, is_mate};
use crate::move_generation::legal_move_generator::MoveGenerator;

/// Leaf statistics of a move-tree walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    /// Leaves where the side to move is in check.
    pub checks: usize,
    /// Leaves where a general has been taken.
    pub mates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.checks += rhs.checks;
        self.mates += rhs.mates;
    }
}

/// Count leaves `depth` plies below the current position, `color` to move.
///
/// Positions where a general is gone are leaves regardless of depth.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    board: &mut Board,
    color: Color,
    depth: u8,
) -> BoardResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_moves(board, color)? {
        let mut child = board.ghost(mv.from, mv.to)?;
        let is_capture = child.undo_state().is_some_and(|u| u.is_capture());
        if depth == 1 || is_mate(&child) {
            total.nodes += 1;
            total.captures += usize::from(is_capture);
            total.checks += usize::from(is_in_check(&child, color.opposite()).is_some());
            total.mates += usize::from(is_mate(&child));
            continue;
        }
        total.merge(perft(generator, &mut child, color.opposite(), depth - 1)?);
    }
    Ok(total)
}

/// Leaf count per root move, in generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    board: &mut Board,
    color: Color,
    depth: u8,
) -> BoardResult<Vec<(Move, usize)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }
    for mv in generator.generate_moves(board, color)? {
        let mut child = board.ghost(mv.from, mv.to)?;
        let nodes = if depth == 1 || is_mate(&child) {
            1
        } else {
            perft(generator, &mut child, color.opposite(), depth - 1)?.nodes
        };
        out.push((mv, nodes));
    }
    Ok(out)
}
