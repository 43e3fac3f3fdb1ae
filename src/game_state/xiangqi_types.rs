//! Core value types shared by the board, move generation and search.

use std::fmt;

use crate::game_state::geometry::Coord;

/// Side to move. Red owns the low ranks and is the positive evaluation side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// `+1.0` for Red, `-1.0` for Black.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Color::Red => 1.0,
            Color::Black => -1.0,
        }
    }

    #[inline]
    pub const fn is_maximizing(self) -> bool {
        matches!(self, Color::Red)
    }

    pub const fn log_name(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Black => "BLACK",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.log_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::General => 0,
            PieceKind::Advisor => 1,
            PieceKind::Elephant => 2,
            PieceKind::Horse => 3,
            PieceKind::Chariot => 4,
            PieceKind::Cannon => 5,
            PieceKind::Soldier => 6,
        }
    }

    /// Static material value.
    #[inline]
    pub const fn value(self) -> f64 {
        match self {
            PieceKind::General => 200.0,
            PieceKind::Advisor => 2.0,
            PieceKind::Elephant => 2.0,
            PieceKind::Horse => 3.5,
            PieceKind::Chariot => 9.0,
            PieceKind::Cannon => 3.5,
            PieceKind::Soldier => 1.0,
        }
    }

    /// Pieces that can give check; generals, advisors and elephants never leave home.
    #[inline]
    pub const fn is_attacker(self) -> bool {
        matches!(
            self,
            PieceKind::Horse | PieceKind::Chariot | PieceKind::Cannon | PieceKind::Soldier
        )
    }

    /// Single-letter tag used by the text renderer.
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::General => 'G',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'E',
            PieceKind::Horse => 'H',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'S',
        }
    }

    pub const fn log_name(self) -> &'static str {
        match self {
            PieceKind::General => "GENERAL",
            PieceKind::Advisor => "ADVISOR",
            PieceKind::Elephant => "ELEPHANT",
            PieceKind::Horse => "HORSE",
            PieceKind::Chariot => "CHARIOT",
            PieceKind::Cannon => "CANNON",
            PieceKind::Soldier => "SOLDIER",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.log_name())
    }
}

/// Stable handle into the board's piece arena. Captured pieces keep their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A `(from, to)` pair; the board is the only authority on what it captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
