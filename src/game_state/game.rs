//! Interactive game session.
//!
//! Wraps a board with the side to move, a selected piece and the move log.
//! User actions that break the rules are rejected with `false` and leave the
//! board untouched; only board faults surface as errors.

use tracing::debug;

use crate::game_state::board::Board;
use crate::game_state::errors::BoardResult;
use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::Color;
use crate::move_generation::legal_move_checks::{
    is_in_check, is_uncapturing_draw, mate_value, Check,
};
use crate::move_generation::legal_move_generator::{legal_moves, piece_destinations};
use crate::search::board_scoring::{evaluate, EvaluateSet};
use crate::utils::move_log::MoveLog;

/// How much rule checking a requested move goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveValidation {
    /// Descriptor rules plus self-check filtering.
    #[default]
    Full,
    /// Descriptor rules only.
    PseudoLegal,
}

impl MoveValidation {
    #[inline]
    const fn check_self(self) -> bool {
        matches!(self, MoveValidation::Full)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    RedWins,
    BlackWins,
    Draw,
}

impl GameOutcome {
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::Red => GameOutcome::RedWins,
            Color::Black => GameOutcome::BlackWins,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Color,
    selected: Option<Coord>,
    log: MoveLog,
}

impl Game {
    pub fn new(board: Board, to_move: Color) -> Self {
        Self {
            board,
            to_move,
            selected: None,
            log: MoveLog::new(),
        }
    }

    /// Standard layout, Red to move.
    pub fn standard() -> BoardResult<Self> {
        Ok(Self::new(Board::standard()?, Color::Red))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for engines; they must hand the board back unchanged.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    pub fn current_color(&self) -> Color {
        self.to_move
    }

    #[inline]
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    #[inline]
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn into_parts(self) -> (Board, MoveLog) {
        (self.board, self.log)
    }

    /// Select the piece on `position`; fails on an empty square or the wrong color.
    pub fn select_piece(&mut self, position: Coord) -> bool {
        match self.board.piece_at(position) {
            Some(piece) if piece.color == self.to_move => {
                self.selected = Some(position);
                true
            }
            _ => {
                debug!(%position, to_move = %self.to_move, "selection rejected");
                false
            }
        }
    }

    /// Move the selected piece to `to` if the rules allow it.
    ///
    /// A rejected move keeps the current selection.
    pub fn make_move(&mut self, to: Coord, validation: MoveValidation) -> BoardResult<bool> {
        let Some(from) = self.selected else {
            debug!(%to, "move rejected: nothing selected");
            return Ok(false);
        };
        let Some(piece) = self.board.piece_at(from).copied() else {
            self.selected = None;
            return Ok(false);
        };

        let destinations = piece_destinations(&mut self.board, piece.id, validation.check_self())?;
        if !destinations.contains(&to) {
            debug!(%from, %to, "move rejected: illegal destination");
            return Ok(false);
        }

        let _undo = self.board.apply_move(from, to)?;
        self.log.record(piece.color, piece.kind, to);
        self.to_move = self.to_move.opposite();
        self.selected = None;
        Ok(true)
    }

    /// Select and move in one step.
    pub fn try_move(
        &mut self,
        from: Coord,
        to: Coord,
        validation: MoveValidation,
    ) -> BoardResult<bool> {
        let previous = self.selected;
        if !self.select_piece(from) {
            return Ok(false);
        }
        let moved = self.make_move(to, validation)?;
        if !moved {
            self.selected = previous;
        }
        Ok(moved)
    }

    /// Legal destinations for the piece on `position`; empty for the side not to move.
    pub fn legal_destinations(&mut self, position: Coord) -> BoardResult<Vec<Coord>> {
        match self.board.piece_at(position).copied() {
            Some(piece) if piece.color == self.to_move => {
                piece_destinations(&mut self.board, piece.id, true)
            }
            _ => Ok(Vec::new()),
        }
    }

    pub fn in_check(&self) -> Option<Check> {
        is_in_check(&self.board, self.to_move)
    }

    pub fn evaluate(&mut self, weights: &EvaluateSet) -> BoardResult<f64> {
        evaluate(&mut self.board, weights, false)
    }

    #[inline]
    pub fn is_uncapturing_draw(&self) -> bool {
        is_uncapturing_draw(&self.board)
    }

    /// Draw counter first, then captured generals, then "no legal move loses".
    pub fn outcome(&mut self) -> BoardResult<GameOutcome> {
        if self.is_uncapturing_draw() {
            return Ok(GameOutcome::Draw);
        }
        match mate_value(&self.board) {
            Some(v) if v > 0.0 => return Ok(GameOutcome::RedWins),
            Some(_) => return Ok(GameOutcome::BlackWins),
            None => {}
        }
        if legal_moves(&mut self.board, self.to_move, true)?.is_empty() {
            return Ok(GameOutcome::win_for(self.to_move.opposite()));
        }
        Ok(GameOutcome::Ongoing)
    }
}
