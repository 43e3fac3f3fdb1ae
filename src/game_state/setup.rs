//! Starting layouts.
//!
//! A layout is a flat list of placements, so the standard 32-piece setup and
//! hand-built puzzle positions go through the same `Board::from_placements`.

use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::{Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Coord,
}

impl Placement {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, file: i8, rank: i8) -> Self {
        Self {
            kind,
            color,
            position: Coord::new(file, rank),
        }
    }

    /// Same piece for the other side, reflected across the river.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self {
            kind: self.kind,
            color: self.color.opposite(),
            position: self.position.mirrored(),
        }
    }
}

/// The standard layout, Red on ranks 0-3 and Black on ranks 6-9.
///
/// Order matters: it becomes each side's live-piece order, which is the order
/// search enumerates pieces in.
pub fn standard_placements() -> Vec<Placement> {
    let mut out = Vec::with_capacity(32);
    for (i, color) in Color::ALL.into_iter().enumerate() {
        let back = 9 * i as i8;
        out.push(Placement::new(PieceKind::General, color, 4, back));
        for (file, kind) in [
            PieceKind::Chariot,
            PieceKind::Horse,
            PieceKind::Elephant,
            PieceKind::Advisor,
        ]
        .into_iter()
        .enumerate()
        {
            out.push(Placement::new(kind, color, file as i8, back));
            out.push(Placement::new(kind, color, 8 - file as i8, back));
        }
        for file in 0..5 {
            out.push(Placement::new(PieceKind::Soldier, color, file * 2, 3 + 3 * i as i8));
        }
        out.push(Placement::new(PieceKind::Cannon, color, 1, 2 + 5 * i as i8));
        out.push(Placement::new(PieceKind::Cannon, color, 7, 2 + 5 * i as i8));
    }
    out
}

pub fn mirrored_placements(placements: &[Placement]) -> Vec<Placement> {
    placements.iter().map(|p| p.mirrored()).collect()
}
