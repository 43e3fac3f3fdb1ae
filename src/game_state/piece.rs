use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::{Color, PieceId, PieceKind};
use crate::moves::movement_descriptor::{effective_descriptor, MovementDescriptor};

/// A piece record in the board arena.
///
/// `position` is only written by the board, in the same step that updates the
/// square occupant, so the two never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub(crate) position: Coord,
}

impl Piece {
    #[inline]
    pub const fn position(&self) -> Coord {
        self.position
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.kind.value()
    }

    #[inline]
    pub const fn is_attacker(&self) -> bool {
        self.kind.is_attacker()
    }

    /// Movement template for where the piece currently stands.
    #[inline]
    pub const fn descriptor(&self) -> MovementDescriptor {
        effective_descriptor(self.kind, self.color, self.position)
    }
}
