use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::{Color, PieceId};

/// Which side has more attackers on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Red,
    Neutral,
    Black,
}

impl Control {
    /// `+1` Red, `0` neutral, `-1` Black.
    #[inline]
    pub const fn signum(self) -> f64 {
        match self {
            Control::Red => 1.0,
            Control::Neutral => 0.0,
            Control::Black => -1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Square {
    pub position: Coord,
    pub(crate) occupant: Option<PieceId>,
    attacks: [u16; 2],
}

/// Attack counters are evaluation scratch space and do not take part in equality.
impl PartialEq for Square {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.occupant == other.occupant
    }
}

impl Eq for Square {}

impl Square {
    pub const fn new(position: Coord) -> Self {
        Self {
            position,
            occupant: None,
            attacks: [0; 2],
        }
    }

    #[inline]
    pub const fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    #[inline]
    pub const fn attacks(&self, color: Color) -> u16 {
        self.attacks[color.index()]
    }

    #[inline]
    pub fn add_attack(&mut self, color: Color) {
        self.attacks[color.index()] = self.attacks[color.index()].saturating_add(1);
    }

    #[inline]
    pub fn reset_attacks(&mut self) {
        self.attacks = [0; 2];
    }

    pub const fn control(&self) -> Control {
        let red = self.attacks[Color::Red.index()];
        let black = self.attacks[Color::Black.index()];
        if red > black {
            Control::Red
        } else if black > red {
            Control::Black
        } else {
            Control::Neutral
        }
    }
}
