//! Precondition faults raised by board mutation.
//!
//! These mean the caller's state is corrupt (or a setup list is wrong). They
//! are propagated, never retried. Rejected *user* actions are not errors; the
//! game session reports them as `false` with the board untouched.

use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::{Color, PieceId, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("there is no piece on {0}")]
    NoPieceAt(Coord),

    #[error("square {position} is already occupied by {color} {kind}")]
    SquareOccupied {
        position: Coord,
        color: Color,
        kind: PieceKind,
    },

    #[error("coordinate {0} is off the board")]
    OutOfBounds(Coord),

    #[error("piece arena is full ({0} pieces)")]
    TooManyPieces(usize),

    #[error("move from {0} to itself")]
    NullMove(Coord),

    #[error("piece {0:?} is on the board but missing from its live list")]
    NotLive(PieceId),
}

pub type BoardResult<T> = Result<T, BoardError>;
