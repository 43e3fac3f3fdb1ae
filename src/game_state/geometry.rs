//! Board geometry: integer intersections and rectangular zones.
//!
//! The grid is 9 files by 10 ranks. Red sits on ranks `0..=4`, Black on
//! `5..=9`, and each side owns a 3x3 palace on its back ranks.

use std::fmt;
use std::ops::{Add, Mul};

pub const BOARD_FILES: i8 = 9;
pub const BOARD_RANKS: i8 = 10;
pub const SQUARE_COUNT: usize = (BOARD_FILES as usize) * (BOARD_RANKS as usize);

/// One intersection of the grid (`file 0..=8`, `rank 0..=9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub file: i8,
    pub rank: i8,
}

impl Coord {
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// Component-wise halving, truncating toward zero.
    ///
    /// Applied to a big-step direction this yields the leg (or eye) offset:
    /// `(2, 1) -> (1, 0)`, `(-2, 2) -> (-1, 1)`.
    #[inline]
    pub const fn halved(self) -> Self {
        Self::new(self.file / 2, self.rank / 2)
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        FULL_BOARD.contains(self)
    }

    /// Dense index used by the square array, `file * 10 + rank`.
    ///
    /// Callers must only pass on-board coordinates.
    #[inline]
    pub const fn index(self) -> usize {
        (self.file as usize) * (BOARD_RANKS as usize) + (self.rank as usize)
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::new(
            (index / BOARD_RANKS as usize) as i8,
            (index % BOARD_RANKS as usize) as i8,
        )
    }

    /// The same intersection seen from the other side of the river.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self::new(self.file, BOARD_RANKS - 1 - self.rank)
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        (0..SQUARE_COUNT).map(Coord::from_index)
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Self::Output {
        Coord::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl Mul<i8> for Coord {
    type Output = Coord;

    #[inline]
    fn mul(self, rhs: i8) -> Coord {
        Coord::new(self.file * rhs, self.rank * rhs)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

/// Inclusive axis-aligned rectangle of intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub low: Coord,
    pub high: Coord,
}

impl Area {
    #[inline]
    pub const fn new(low: Coord, high: Coord) -> Self {
        Self { low, high }
    }

    #[inline]
    pub const fn contains(&self, coord: Coord) -> bool {
        self.low.file <= coord.file
            && coord.file <= self.high.file
            && self.low.rank <= coord.rank
            && coord.rank <= self.high.rank
    }
}

pub const FULL_BOARD: Area = Area::new(Coord::new(0, 0), Coord::new(8, 9));
pub const RED_PALACE: Area = Area::new(Coord::new(3, 0), Coord::new(5, 2));
pub const BLACK_PALACE: Area = Area::new(Coord::new(3, 7), Coord::new(5, 9));
pub const RED_HALF: Area = Area::new(Coord::new(0, 0), Coord::new(8, 4));
pub const BLACK_HALF: Area = Area::new(Coord::new(0, 5), Coord::new(8, 9));
