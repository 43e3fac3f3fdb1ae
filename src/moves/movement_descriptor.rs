//! Per-kind movement templates.
//!
//! Each piece kind maps to an immutable descriptor: ordered direction vectors,
//! a step limit, screen and leg rules, and the zone its moves must stay in.
//! The soldier is the only kind whose template depends on where it stands,
//! so the lookup takes the piece's color and position as well.

use crate::game_state::geometry::{
    Area, Coord, BLACK_HALF, BLACK_PALACE, FULL_BOARD, RED_HALF, RED_PALACE,
};
use crate::game_state::xiangqi_types::{Color, PieceKind};

/// Rectangular restriction on where a piece may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    WholeBoard,
    Palace,
    OwnHalf,
}

impl Zone {
    #[inline]
    pub const fn area(self, color: Color) -> Area {
        match (self, color) {
            (Zone::WholeBoard, _) => FULL_BOARD,
            (Zone::Palace, Color::Red) => RED_PALACE,
            (Zone::Palace, Color::Black) => BLACK_PALACE,
            (Zone::OwnHalf, Color::Red) => RED_HALF,
            (Zone::OwnHalf, Color::Black) => BLACK_HALF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementDescriptor {
    pub directions: &'static [Coord],
    pub max_steps: u8,
    /// Captures only after jumping exactly one piece (cannon).
    pub needs_screen: bool,
    /// The half-step square must be empty for the direction to be usable
    /// (horse leg, elephant eye).
    pub big_step: bool,
    pub zone: Zone,
}

/// Longest ray on the board; sliding pieces stop at edges well before this.
pub const SLIDE_STEPS: u8 = 10;

const ORTHOGONAL: [Coord; 4] = [
    Coord::new(1, 0),
    Coord::new(-1, 0),
    Coord::new(0, 1),
    Coord::new(0, -1),
];

const DIAGONAL: [Coord; 4] = [
    Coord::new(1, 1),
    Coord::new(1, -1),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
];

const ELEPHANT_STEPS: [Coord; 4] = [
    Coord::new(2, 2),
    Coord::new(2, -2),
    Coord::new(-2, 2),
    Coord::new(-2, -2),
];

const HORSE_JUMPS: [Coord; 8] = [
    Coord::new(2, 1),
    Coord::new(2, -1),
    Coord::new(-2, 1),
    Coord::new(-2, -1),
    Coord::new(1, 2),
    Coord::new(1, -2),
    Coord::new(-1, 2),
    Coord::new(-1, -2),
];

const RED_SOLDIER: [Coord; 1] = [Coord::new(0, 1)];
const BLACK_SOLDIER: [Coord; 1] = [Coord::new(0, -1)];
const RED_SOLDIER_CROSSED: [Coord; 3] = [Coord::new(0, 1), Coord::new(-1, 0), Coord::new(1, 0)];
const BLACK_SOLDIER_CROSSED: [Coord; 3] =
    [Coord::new(0, -1), Coord::new(-1, 0), Coord::new(1, 0)];

const fn step(directions: &'static [Coord], zone: Zone) -> MovementDescriptor {
    MovementDescriptor {
        directions,
        max_steps: 1,
        needs_screen: false,
        big_step: false,
        zone,
    }
}

pub const GENERAL: MovementDescriptor = step(&ORTHOGONAL, Zone::Palace);
pub const ADVISOR: MovementDescriptor = step(&DIAGONAL, Zone::Palace);
pub const ELEPHANT: MovementDescriptor = MovementDescriptor {
    big_step: true,
    ..step(&ELEPHANT_STEPS, Zone::OwnHalf)
};
pub const HORSE: MovementDescriptor = MovementDescriptor {
    big_step: true,
    ..step(&HORSE_JUMPS, Zone::WholeBoard)
};
pub const CHARIOT: MovementDescriptor = MovementDescriptor {
    max_steps: SLIDE_STEPS,
    ..step(&ORTHOGONAL, Zone::WholeBoard)
};
pub const CANNON: MovementDescriptor = MovementDescriptor {
    max_steps: SLIDE_STEPS,
    needs_screen: true,
    ..step(&ORTHOGONAL, Zone::WholeBoard)
};

/// Template before crossing the river.
#[inline]
pub const fn default_descriptor(kind: PieceKind, color: Color) -> MovementDescriptor {
    match kind {
        PieceKind::General => GENERAL,
        PieceKind::Advisor => ADVISOR,
        PieceKind::Elephant => ELEPHANT,
        PieceKind::Horse => HORSE,
        PieceKind::Chariot => CHARIOT,
        PieceKind::Cannon => CANNON,
        PieceKind::Soldier => match color {
            Color::Red => step(&RED_SOLDIER, Zone::WholeBoard),
            Color::Black => step(&BLACK_SOLDIER, Zone::WholeBoard),
        },
    }
}

/// Red crosses above rank 4, Black below rank 5.
#[inline]
pub const fn has_crossed_river(color: Color, position: Coord) -> bool {
    match color {
        Color::Red => position.rank > 4,
        Color::Black => position.rank < 5,
    }
}

/// The template that applies to a piece of `kind`/`color` standing on `position`.
#[inline]
pub const fn effective_descriptor(
    kind: PieceKind,
    color: Color,
    position: Coord,
) -> MovementDescriptor {
    match kind {
        PieceKind::Soldier if has_crossed_river(color, position) => match color {
            Color::Red => step(&RED_SOLDIER_CROSSED, Zone::WholeBoard),
            Color::Black => step(&BLACK_SOLDIER_CROSSED, Zone::WholeBoard),
        },
        _ => default_descriptor(kind, color),
    }
}
