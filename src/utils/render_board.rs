//! Terminal-oriented text renderers.
//!
//! `render_board` draws pieces: Red upper-case, Black lower-case. `render_control`
//! draws which side controls each intersection. Both put Black's back rank at
//! the top with the river between ranks 4 and 5.

use crate::game_state::board::Board;
use crate::game_state::errors::BoardResult;
use crate::game_state::geometry::{Coord, BOARD_FILES, BOARD_RANKS};
use crate::game_state::square::Control;
use crate::game_state::xiangqi_types::Color;
use crate::search::board_scoring::record_control;

fn render_grid(cell: impl Fn(Coord) -> char) -> String {
    let mut out = String::new();
    let files_header: String = (0..BOARD_FILES).map(|f| format!(" {f}")).collect();

    out.push_str(&format!("  {files_header}\n"));
    for rank in (0..BOARD_RANKS).rev() {
        out.push_str(&format!("{rank} "));
        for file in 0..BOARD_FILES {
            out.push(' ');
            out.push(cell(Coord::new(file, rank)));
        }
        out.push_str(&format!(" {rank}\n"));
        if rank == 5 {
            out.push_str("  ~~~~~~~~~~~~~~~~~~~~\n");
        }
    }
    out.push_str(&format!("  {files_header}"));
    out
}

pub fn render_board(board: &Board) -> String {
    render_grid(|at| match board.piece_at(at) {
        Some(p) if p.color == Color::Red => p.kind.symbol(),
        Some(p) => p.kind.symbol().to_ascii_lowercase(),
        None => '·',
    })
}

/// Control map: `+` Red, `-` Black, `·` contested or unattacked.
///
/// Rebuilds the board's attack counters first.
pub fn render_control(board: &mut Board) -> BoardResult<String> {
    record_control(board)?;
    let board: &Board = board;
    Ok(render_grid(|at| match board.square(at).map(|sq| sq.control()) {
        Some(Control::Red) => '+',
        Some(Control::Black) => '-',
        _ => '·',
    }))
}
