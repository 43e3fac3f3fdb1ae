//! Core incremental board representation.
//!
//! `Board` owns the 9x10 squares, an arena of every piece ever placed, one
//! ordered live list per color, the move history and the uncapturing-move
//! counter. Search never clones it: moves are applied in place and reverted
//! through `UndoState`, usually via the `GhostMove` guard.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::game_state::errors::{BoardError, BoardResult};
use crate::game_state::geometry::Coord;
use crate::game_state::piece::Piece;
use crate::game_state::setup::{standard_placements, Placement};
use crate::game_state::square::Square;
use crate::game_state::undo_state::UndoState;
use crate::game_state::xiangqi_types::{Color, Move, PieceId, PieceKind};
use crate::search::zobrist::{piece_square_key, side_to_move_key};

/// How the repetition part of the check test is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepetitionRule {
    /// The last three history entries each equal the entry four plies earlier.
    #[default]
    AlternatingStride,
    /// The current position key has been reached at least this many times.
    PositionRecurrence { occurrences: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    squares: Vec<Square>,
    pieces: Vec<Piece>,
    live: [Vec<PieceId>; 2],
    history: Vec<Move>,
    uncapturing_moves: u16,
    position_key: u64,
    key_occurrences: HashMap<u64, u16>,
    repetition_rule: RepetitionRule,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: Coord::all().map(Square::new).collect(),
            pieces: Vec::with_capacity(32),
            live: [Vec::with_capacity(16), Vec::with_capacity(16)],
            history: Vec::new(),
            uncapturing_moves: 0,
            position_key: 0,
            key_occurrences: HashMap::new(),
            repetition_rule: RepetitionRule::default(),
        }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn standard() -> BoardResult<Self> {
        Self::from_placements(&standard_placements())
    }

    pub fn from_placements(placements: &[Placement]) -> BoardResult<Self> {
        let mut board = Self::new_empty();
        for p in placements {
            board.add_piece(p.kind, p.color, p.position)?;
        }
        Ok(board)
    }

    pub fn with_repetition_rule(mut self, rule: RepetitionRule) -> Self {
        self.repetition_rule = rule;
        self
    }

    #[inline]
    pub fn repetition_rule(&self) -> RepetitionRule {
        self.repetition_rule
    }

    /// Place a new piece. Appends it to the end of its color's live list.
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        color: Color,
        position: Coord,
    ) -> BoardResult<PieceId> {
        if !position.is_on_board() {
            return Err(BoardError::OutOfBounds(position));
        }
        if let Some(existing) = self.piece_at(position) {
            return Err(BoardError::SquareOccupied {
                position,
                color: existing.color,
                kind: existing.kind,
            });
        }
        let id = u8::try_from(self.pieces.len())
            .map(PieceId)
            .map_err(|_| BoardError::TooManyPieces(self.pieces.len()))?;

        self.pieces.push(Piece {
            id,
            kind,
            color,
            position,
        });
        self.squares[position.index()].occupant = Some(id);
        self.live[color.index()].push(id);
        self.position_key ^= piece_square_key(color, kind, position);
        Ok(id)
    }

    /// Take a piece off the board outside of play (position editing).
    ///
    /// Not recorded in history and not undoable.
    pub fn remove_piece_at(&mut self, position: Coord) -> BoardResult<Piece> {
        let id = self.occupant_or_err(position)?;
        let piece = self.pieces[id.index()];
        let list = &mut self.live[piece.color.index()];
        let idx = list
            .iter()
            .position(|&x| x == id)
            .ok_or(BoardError::NotLive(id))?;
        list.remove(idx);
        self.squares[position.index()].occupant = None;
        self.position_key ^= piece_square_key(piece.color, piece.kind, position);
        Ok(piece)
    }

    // --- Queries ---

    #[inline]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    #[inline]
    pub fn square(&self, position: Coord) -> Option<&Square> {
        position
            .is_on_board()
            .then(|| &self.squares[position.index()])
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline]
    pub fn piece_at(&self, position: Coord) -> Option<&Piece> {
        self.square(position)
            .and_then(Square::occupant)
            .map(|id| &self.pieces[id.index()])
    }

    /// `false` for empty and off-board squares alike.
    #[inline]
    pub fn has_piece(&self, position: Coord) -> bool {
        self.piece_at(position).is_some()
    }

    /// Ids of the live pieces of `color`, in list order.
    #[inline]
    pub fn live_ids(&self, color: Color) -> &[PieceId] {
        &self.live[color.index()]
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.live[color.index()]
            .iter()
            .map(|id| &self.pieces[id.index()])
    }

    pub fn general(&self, color: Color) -> Option<&Piece> {
        self.pieces(color).find(|p| p.kind == PieceKind::General)
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    #[inline]
    pub fn uncapturing_moves(&self) -> u16 {
        self.uncapturing_moves
    }

    #[inline]
    pub fn position_key(&self) -> u64 {
        self.position_key
    }

    /// How many times `key` has been reached by an applied move.
    #[inline]
    pub fn key_occurrences(&self, key: u64) -> u16 {
        self.key_occurrences.get(&key).copied().unwrap_or(0)
    }

    // --- Control bookkeeping ---

    pub fn reset_attacks(&mut self) {
        for sq in &mut self.squares {
            sq.reset_attacks();
        }
    }

    pub fn record_attacks(&mut self, color: Color, targets: &[Coord]) {
        for target in targets {
            if target.is_on_board() {
                self.squares[target.index()].add_attack(color);
            }
        }
    }

    // --- Make / unmake ---

    /// Move whatever stands on `from` to `to`, capturing any occupant of `to`.
    ///
    /// No rule checking happens here. On error the board is untouched.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> BoardResult<UndoState> {
        if !to.is_on_board() {
            return Err(BoardError::OutOfBounds(to));
        }
        let moved = self.occupant_or_err(from)?;
        if from == to {
            return Err(BoardError::NullMove(from));
        }

        let captured = match self.squares[to.index()].occupant {
            Some(victim) => {
                let color = self.pieces[victim.index()].color;
                let idx = self.live[color.index()]
                    .iter()
                    .position(|&x| x == victim)
                    .ok_or(BoardError::NotLive(victim))?;
                Some((victim, idx))
            }
            None => None,
        };

        let undo = UndoState {
            from,
            to,
            moved,
            captured,
            prev_uncapturing_moves: self.uncapturing_moves,
            prev_position_key: self.position_key,
        };

        if let Some((victim, idx)) = captured {
            let piece = self.pieces[victim.index()];
            self.live[piece.color.index()].remove(idx);
            self.position_key ^= piece_square_key(piece.color, piece.kind, to);
            self.uncapturing_moves = 0;
        } else {
            self.uncapturing_moves = self.uncapturing_moves.saturating_add(1);
        }

        let mover = self.pieces[moved.index()];
        self.squares[from.index()].occupant = None;
        self.squares[to.index()].occupant = Some(moved);
        self.pieces[moved.index()].position = to;
        self.position_key ^= piece_square_key(mover.color, mover.kind, from)
            ^ piece_square_key(mover.color, mover.kind, to)
            ^ side_to_move_key();

        self.history.push(Move::new(from, to));
        let seen = self.key_occurrences.entry(self.position_key).or_insert(0);
        *seen = seen.saturating_add(1);

        Ok(undo)
    }

    /// Exact inverse of the `apply_move` that produced `undo`.
    ///
    /// Undo records must be consumed in LIFO order.
    pub fn undo_move(&mut self, undo: UndoState) {
        debug_assert_eq!(self.squares[undo.to.index()].occupant, Some(undo.moved));

        if let Some(count) = self.key_occurrences.get_mut(&self.position_key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.key_occurrences.remove(&self.position_key);
            }
        }
        self.history.pop();

        self.squares[undo.from.index()].occupant = Some(undo.moved);
        self.pieces[undo.moved.index()].position = undo.from;
        self.squares[undo.to.index()].occupant = None;

        if let Some((victim, idx)) = undo.captured {
            let color = self.pieces[victim.index()].color;
            self.live[color.index()].insert(idx, victim);
            self.squares[undo.to.index()].occupant = Some(victim);
        }

        self.uncapturing_moves = undo.prev_uncapturing_moves;
        self.position_key = undo.prev_position_key;
    }

    /// Apply a move that is reverted when the returned guard drops.
    pub fn ghost(&mut self, from: Coord, to: Coord) -> BoardResult<GhostMove<'_>> {
        let undo = self.apply_move(from, to)?;
        Ok(GhostMove {
            board: self,
            undo: Some(undo),
        })
    }

    /// Run `inspect` against the position after `from -> to`, then revert.
    pub fn ghost_test<R>(
        &mut self,
        from: Coord,
        to: Coord,
        inspect: impl FnOnce(&mut Board) -> R,
    ) -> BoardResult<R> {
        let mut ghost = self.ghost(from, to)?;
        Ok(inspect(&mut ghost))
    }

    fn occupant_or_err(&self, position: Coord) -> BoardResult<PieceId> {
        if !position.is_on_board() {
            return Err(BoardError::OutOfBounds(position));
        }
        self.squares[position.index()]
            .occupant
            .ok_or(BoardError::NoPieceAt(position))
    }
}

/// Scoped speculative move. Derefs to the board; the move is undone on drop.
pub struct GhostMove<'a> {
    board: &'a mut Board,
    undo: Option<UndoState>,
}

impl GhostMove<'_> {
    pub fn undo_state(&self) -> Option<&UndoState> {
        self.undo.as_ref()
    }

    /// The piece taken by this move, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.undo
            .as_ref()
            .and_then(|u| u.captured)
            .map(|(id, _)| *self.board.piece(id))
    }
}

impl Deref for GhostMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for GhostMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for GhostMove<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.undo_move(undo);
        }
    }
}
