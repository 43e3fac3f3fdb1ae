//! Destination generation.
//!
//! Every piece kind goes through the same ray walk driven by its movement
//! descriptor. Self-check filtering ghost-applies each candidate and asks the
//! check detector about the mover; the first unsafe candidate on a ray ends
//! that ray, so later squares on it are never offered even if they would be
//! safe.

use crate::game_state::board::Board;
use crate::game_state::errors::BoardResult;
use crate::game_state::geometry::Coord;
use crate::game_state::piece::Piece;
use crate::game_state::xiangqi_types::{Color, Move, PieceId};
use crate::move_generation::legal_move_checks::is_in_check;

/// Produces the moves one side may play in a position.
pub trait MoveGenerator {
    fn generate_moves(&self, board: &mut Board, color: Color) -> BoardResult<Vec<Move>>;
}

/// Moves filtered for self-check.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

/// Raw descriptor moves; the mover's own general may be left hanging.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(&self, board: &mut Board, color: Color) -> BoardResult<Vec<Move>> {
        legal_moves(board, color, true)
    }
}

impl MoveGenerator for PseudoLegalMoveGenerator {
    fn generate_moves(&self, board: &mut Board, color: Color) -> BoardResult<Vec<Move>> {
        legal_moves(board, color, false)
    }
}

/// Candidate squares along each direction of `piece`, ray by ray.
///
/// No legality beyond occupancy, screens, legs and zones is applied.
fn candidate_rays(board: &Board, piece: &Piece) -> Vec<Vec<Coord>> {
    let descriptor = piece.descriptor();
    let zone = descriptor.zone.area(piece.color);
    let origin = piece.position();

    let mut rays = Vec::with_capacity(descriptor.directions.len());
    for &dir in descriptor.directions {
        let mut ray = Vec::new();
        if descriptor.big_step && board.has_piece(origin + dir.halved()) {
            rays.push(ray);
            continue;
        }

        let mut screen = false;
        for step in 1..=descriptor.max_steps as i8 {
            let target = origin + dir * step;
            if !target.is_on_board() || !zone.contains(target) {
                break;
            }
            match board.piece_at(target) {
                Some(occupant) => {
                    if !descriptor.needs_screen || screen {
                        if occupant.color != piece.color {
                            ray.push(target);
                        }
                        break;
                    }
                    screen = true;
                }
                None if !screen => ray.push(target),
                None => {}
            }
        }
        rays.push(ray);
    }
    rays
}

/// Destinations ignoring self-check, in direction order.
pub fn pseudo_destinations(board: &Board, id: PieceId) -> Vec<Coord> {
    candidate_rays(board, board.piece(id))
        .into_iter()
        .flatten()
        .collect()
}

/// Destinations for the piece `id`, optionally filtered for self-check.
pub fn piece_destinations(
    board: &mut Board,
    id: PieceId,
    check_self: bool,
) -> BoardResult<Vec<Coord>> {
    if !check_self {
        return Ok(pseudo_destinations(board, id));
    }

    let piece = *board.piece(id);
    let origin = piece.position();
    let mut out = Vec::new();
    for ray in candidate_rays(board, &piece) {
        for target in ray {
            let safe =
                board.ghost_test(origin, target, |b| is_in_check(b, piece.color).is_none())?;
            if !safe {
                break;
            }
            out.push(target);
        }
    }
    Ok(out)
}

/// All moves for `color`, in live-list order then direction order.
pub fn legal_moves(board: &mut Board, color: Color, check_self: bool) -> BoardResult<Vec<Move>> {
    let ids = board.live_ids(color).to_vec();
    let mut moves = Vec::with_capacity(ids.len() * 4);
    for id in ids {
        let from = board.piece(id).position();
        for to in piece_destinations(board, id, check_self)? {
            moves.push(Move::new(from, to));
        }
    }
    Ok(moves)
}
