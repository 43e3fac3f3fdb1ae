use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::PieceId;

/// Single undo record for `Board::apply_move` / `Board::undo_move`.
///
/// Only the board constructs these, and they must be undone in LIFO order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an applied move must be undone with Board::undo_move"]
pub struct UndoState {
    pub from: Coord,
    pub to: Coord,
    pub moved: PieceId,
    /// Captured piece and its index in its color's live list.
    pub captured: Option<(PieceId, usize)>,
    pub(crate) prev_uncapturing_moves: u16,
    pub(crate) prev_position_key: u64,
}

impl UndoState {
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}
