//! Zobrist keys for the board's incremental position hash.
//!
//! One key per `(color, kind, intersection)` plus a side toggle XORed in on
//! every applied move. Tables come from a fixed splitmix64 stream, so keys are
//! identical across runs.

use std::sync::OnceLock;

use crate::game_state::board::Board;
use crate::game_state::geometry::{Coord, SQUARE_COUNT};
use crate::game_state::xiangqi_types::{Color, PieceKind};

const KIND_COUNT: usize = PieceKind::ALL.len();
const TABLE_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; SQUARE_COUNT]; KIND_COUNT]; 2],
    side_to_move: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed = TABLE_SEED;
    let mut piece_square = [[[0u64; SQUARE_COUNT]; KIND_COUNT]; 2];
    for key in piece_square.iter_mut().flatten().flatten() {
        *key = next_random_u64(&mut seed);
    }
    ZobristTables {
        piece_square,
        side_to_move: next_random_u64(&mut seed),
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key for a `(color, kind, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, kind: PieceKind, square: Coord) -> u64 {
    tables().piece_square[color.index()][kind.index()][square.index()]
}

/// Toggled once per applied move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Recompute the key of `board` from scratch.
///
/// Matches `Board::position_key` as long as pieces were only placed before
/// play started.
pub fn full_position_key(board: &Board) -> u64 {
    let mut key = 0;
    for color in Color::ALL {
        for piece in board.pieces(color) {
            key ^= piece_square_key(color, piece.kind, piece.position());
        }
    }
    if board.history().len() % 2 == 1 {
        key ^= side_to_move_key();
    }
    key
}
