//! Check, repetition and terminal-state detection.

use crate::game_state::board::{Board, RepetitionRule};
use crate::game_state::geometry::Coord;
use crate::game_state::xiangqi_types::{Color, PieceId, PieceKind};
use crate::move_generation::legal_move_generator::pseudo_destinations;
use crate::moves::movement_descriptor::Zone;

/// More uncapturing moves than this ends the game in a draw.
pub const UNCAPTURING_DRAW_LIMIT: u16 = 49;

/// History entries needed before the stride rule can fire.
const STRIDE_HISTORY: usize = 7;
const STRIDE: usize = 4;
const STRIDE_MATCHES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCause {
    /// The generals face each other on an open file.
    FlyingGeneral,
    /// The side that just moved repeated itself; treated as a loss. The
    /// attacker is the piece that made the repeating move.
    Repetition,
    /// An enemy piece can capture the general.
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub attacker: Option<PieceId>,
    pub square: Coord,
    pub cause: CheckCause,
}

/// Both generals on one file with nothing between them.
///
/// Returns the general of the side opposing `color` and its square.
pub fn flying_general(board: &Board, color: Color) -> Option<Check> {
    let own = board.general(color)?;
    let enemy = board.general(color.opposite())?;
    let (a, b) = (own.position(), enemy.position());
    if a.file != b.file {
        return None;
    }
    let (low, high) = (a.rank.min(b.rank), a.rank.max(b.rank));
    let blocked = (low + 1..high).any(|rank| board.has_piece(Coord::new(a.file, rank)));
    (!blocked).then_some(Check {
        attacker: Some(enemy.id),
        square: b,
        cause: CheckCause::FlyingGeneral,
    })
}

/// The last three moves each equal the move four plies before them.
pub fn stride_repetition(board: &Board) -> bool {
    let history = board.history();
    let n = history.len();
    n >= STRIDE_HISTORY
        && (1..=STRIDE_MATCHES).all(|i| history[n - i] == history[n - i - STRIDE])
}

/// Whether the board's configured repetition rule fires on the current position.
pub fn is_repetition(board: &Board) -> bool {
    match board.repetition_rule() {
        RepetitionRule::AlternatingStride => stride_repetition(board),
        RepetitionRule::PositionRecurrence { occurrences } => {
            board.key_occurrences(board.position_key()) >= occurrences
        }
    }
}

/// Whether `color` is in check, and why.
///
/// Flying general and repetition are reported for whichever color is asked
/// about, so both make a move that produces them unsafe for the mover.
pub fn is_in_check(board: &Board, color: Color) -> Option<Check> {
    if let Some(check) = flying_general(board, color) {
        return Some(check);
    }

    if is_repetition(board) {
        let square = board.last_move().map(|mv| mv.to)?;
        return Some(Check {
            attacker: board.piece_at(square).map(|p| p.id),
            square,
            cause: CheckCause::Repetition,
        });
    }

    let palace = Zone::Palace.area(color);
    for attacker in board.pieces(color.opposite()).filter(|p| p.is_attacker()) {
        for target in pseudo_destinations(board, attacker.id) {
            let hits_general = board
                .piece_at(target)
                .is_some_and(|p| p.kind == PieceKind::General);
            if hits_general && palace.contains(target) {
                return Some(Check {
                    attacker: Some(attacker.id),
                    square: target,
                    cause: CheckCause::Attack,
                });
            }
        }
    }
    None
}

/// `+inf` if Black has lost its general, `-inf` if Red has, `None` otherwise.
///
/// With both generals gone the result is `+inf`.
pub fn mate_value(board: &Board) -> Option<f64> {
    match (board.general(Color::Red), board.general(Color::Black)) {
        (Some(_), Some(_)) => None,
        (Some(_), None) | (None, None) => Some(f64::INFINITY),
        (None, Some(_)) => Some(f64::NEG_INFINITY),
    }
}

#[inline]
pub fn is_mate(board: &Board) -> bool {
    mate_value(board).is_some()
}

#[inline]
pub fn is_uncapturing_draw(board: &Board) -> bool {
    board.uncapturing_moves() > UNCAPTURING_DRAW_LIMIT
}

/// Score of a finished game, or `None` if play continues.
///
/// The draw counter takes precedence over a missing general.
pub fn terminal_score(board: &Board) -> Option<f64> {
    if is_uncapturing_draw(board) {
        Some(0.0)
    } else {
        mate_value(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::setup::Placement;
    use crate::move_generation::legal_move_generator::piece_destinations;

    #[test]
    fn facing_generals_check_both_sides() {
        let board = Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 4, 0),
            Placement::new(PieceKind::General, Color::Black, 4, 9),
        ])
        .expect("valid placements");
        let red_id = board.general(Color::Red).expect("red general").id;
        let black_id = board.general(Color::Black).expect("black general").id;

        let red = is_in_check(&board, Color::Red).expect("red is checked");
        assert_eq!(red.cause, CheckCause::FlyingGeneral);
        assert_eq!(red.attacker, Some(black_id));
        assert_eq!(red.square, Coord::new(4, 9));

        let black = is_in_check(&board, Color::Black).expect("black is checked");
        assert_eq!(black.attacker, Some(red_id));
        assert_eq!(black.square, Coord::new(4, 0));
    }

    #[test]
    fn a_piece_between_generals_blocks_the_flying_check() {
        let board = Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 4, 0),
            Placement::new(PieceKind::Soldier, Color::Red, 4, 3),
            Placement::new(PieceKind::General, Color::Black, 4, 9),
        ])
        .expect("valid placements");
        assert_eq!(is_in_check(&board, Color::Red), None);
        assert_eq!(is_in_check(&board, Color::Black), None);
    }

    #[test]
    fn chariot_on_open_file_checks() {
        let board = Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 4, 0),
            Placement::new(PieceKind::General, Color::Black, 3, 9),
            Placement::new(PieceKind::Chariot, Color::Black, 4, 6),
        ])
        .expect("valid placements");
        let check = is_in_check(&board, Color::Red).expect("red is checked");
        assert_eq!(check.cause, CheckCause::Attack);
        assert_eq!(check.square, Coord::new(4, 0));
        assert_eq!(
            check.attacker.map(|id| board.piece(id).kind),
            Some(PieceKind::Chariot)
        );
        assert_eq!(is_in_check(&board, Color::Black), None);
    }

    fn shuffle_board(rule: RepetitionRule) -> Board {
        Board::from_placements(&[
            Placement::new(PieceKind::General, Color::Red, 3, 0),
            Placement::new(PieceKind::Chariot, Color::Red, 0, 0),
            Placement::new(PieceKind::General, Color::Black, 5, 9),
            Placement::new(PieceKind::Chariot, Color::Black, 8, 9),
        ])
        .expect("valid placements")
        .with_repetition_rule(rule)
    }

    const SHUFFLE: [(Coord, Coord); 4] = [
        (Coord::new(0, 0), Coord::new(0, 1)),
        (Coord::new(8, 9), Coord::new(8, 8)),
        (Coord::new(0, 1), Coord::new(0, 0)),
        (Coord::new(8, 8), Coord::new(8, 9)),
    ];

    #[test]
    fn alternating_shuffle_is_a_repetition_on_the_seventh_move() {
        let mut board = shuffle_board(RepetitionRule::AlternatingStride);
        for &(from, to) in SHUFFLE.iter().cycle().take(6) {
            let _ = board.apply_move(from, to).expect("shuffle");
            assert_eq!(is_in_check(&board, Color::Red), None);
        }

        // The chariot may not step back and complete the pattern.
        let chariot = board.piece_at(Coord::new(0, 1)).expect("red chariot").id;
        let dests = piece_destinations(&mut board, chariot, true).expect("generation succeeds");
        assert!(!dests.contains(&Coord::new(0, 0)));
        assert!(dests.contains(&Coord::new(0, 2)));

        let _ = board
            .apply_move(Coord::new(0, 1), Coord::new(0, 0))
            .expect("raw apply ignores legality");
        let check = is_in_check(&board, Color::Red).expect("repetition");
        assert_eq!(check.cause, CheckCause::Repetition);
        assert_eq!(check.square, Coord::new(0, 0));
        assert_eq!(check.attacker, Some(chariot));
    }

    #[test]
    fn recurrence_rule_counts_positions_instead_of_moves() {
        let mut board = shuffle_board(RepetitionRule::PositionRecurrence { occurrences: 3 });
        for &(from, to) in SHUFFLE.iter().cycle().take(8) {
            let _ = board.apply_move(from, to).expect("shuffle");
            assert_eq!(is_in_check(&board, Color::Red), None);
        }
        let (from, to) = SHUFFLE[0];
        let _ = board.apply_move(from, to).expect("shuffle");
        assert_eq!(
            is_in_check(&board, Color::Black).map(|c| c.cause),
            Some(CheckCause::Repetition)
        );
    }

    #[test]
    fn terminal_values_follow_missing_generals() {
        let red_only = Board::from_placements(&[Placement::new(
            PieceKind::General,
            Color::Red,
            4,
            0,
        )])
        .expect("valid placements");
        assert_eq!(mate_value(&red_only), Some(f64::INFINITY));

        let black_only = Board::from_placements(&[Placement::new(
            PieceKind::General,
            Color::Black,
            4,
            9,
        )])
        .expect("valid placements");
        assert_eq!(mate_value(&black_only), Some(f64::NEG_INFINITY));

        assert_eq!(mate_value(&Board::new_empty()), Some(f64::INFINITY));

        let standard = Board::standard().expect("standard setup");
        assert_eq!(mate_value(&standard), None);
        assert!(!is_mate(&standard));
        assert_eq!(terminal_score(&standard), None);
    }
}
