//! Plain-text audit log of played moves.
//!
//! One line per move, `"<COLOR> <PIECE-KIND> to <POSITION>"`, for example
//! `RED CHARIOT to (0, 3)`. The log is only ever written, never parsed back.

use std::fmt;
use std::io::{self, Write};

use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::{Color, PieceKind};

pub fn move_log_line(color: Color, kind: PieceKind, to: Coord) -> String {
    format!("{} {} to {}", color.log_name(), kind.log_name(), to)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    lines: Vec<String>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, color: Color, kind: PieceKind, to: Coord) {
        self.lines.push(move_log_line(color, kind, to));
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
