//! King rules: one step in any direction, plus castling.
//!
//! Castling is written as the king moving two columns along its home row
//! towards an unmoved rook in the corner. It needs an unmoved king, an empty
//! stretch between king and rook, and no attacked square on the king's
//! origin, transit or destination.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Position};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{
    basic_valid_move, has_no_promotion, push_offset_candidates,
};
use crate::moves::move_descriptions::Move;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Rook relocation performed alongside a castling king move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRook {
    pub from: Position,
    pub to: Position,
}

#[inline]
pub fn is_king_step(d_column: i8, d_row: i8) -> bool {
    d_column.abs() <= 1 && d_row.abs() <= 1 && (d_column, d_row) != (0, 0)
}

/// Rook squares for a two-column king move on `mv.from`'s row, or `None`
/// if the move does not have castling shape.
pub fn castling_rook(mv: &Move) -> Option<CastlingRook> {
    let (d_column, d_row) = mv.deltas();
    if d_row != 0 || d_column.abs() != 2 {
        return None;
    }
    let row = mv.from.row() as i8;
    let (rook_column, rook_target) = match mv.to.column() {
        2 => (0, 3),
        6 => (7, 5),
        _ => return None,
    };
    Some(CastlingRook {
        from: Position::new(rook_column, row)?,
        to: Position::new(rook_target, row)?,
    })
}

pub fn can_move(board: &Board, mv: &Move, with_king_check: bool) -> bool {
    if !has_no_promotion(mv) || !basic_valid_move(board, mv, with_king_check) {
        return false;
    }
    let (d_column, d_row) = mv.deltas();
    if is_king_step(d_column, d_row) {
        return true;
    }
    can_castle(board, mv)
}

fn can_castle(board: &Board, mv: &Move) -> bool {
    let Some(king) = board.get_piece(mv.from) else {
        return false;
    };
    if king.kind() != PieceKind::King
        || king.moved()
        || mv.from.row() != king.color().home_row()
    {
        return false;
    }
    let Some(rook_squares) = castling_rook(mv) else {
        return false;
    };
    let rook_is_ready = board.get_piece(rook_squares.from).is_some_and(|rook| {
        rook.kind() == PieceKind::Rook && rook.color() == king.color() && !rook.moved()
    });
    if !rook_is_ready || board.has_piece(mv.to) {
        return false;
    }

    let row = mv.from.row() as i8;
    let (low, high) = ordered(mv.from.column(), rook_squares.from.column());
    let stretch_is_empty = (low + 1..high)
        .filter_map(|column| Position::new(column as i8, row))
        .all(|square| !board.has_piece(square));
    if !stretch_is_empty {
        return false;
    }

    let enemy = king.color().opposite();
    let (low, high) = ordered(mv.from.column(), mv.to.column());
    (low..=high)
        .filter_map(|column| Position::new(column as i8, row))
        .all(|square| !is_square_attacked(board, square, enemy))
}

#[inline]
fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn candidate_moves(board: &Board, from: Position, out: &mut Vec<Move>) {
    push_offset_candidates(from, &KING_OFFSETS, out);
    let unmoved = board.get_piece(from).is_some_and(|king| !king.moved());
    if unmoved {
        out.extend(
            [-2i8, 2]
                .into_iter()
                .filter_map(|d_column| Move::by_deltas(from, d_column, 0)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::game_state::piece::Piece;

    fn sq(text: &str) -> Position {
        Position::parse(text).expect("test square should parse")
    }

    fn castling_board() -> Board {
        let mut board = Board::empty();
        board.set_piece(sq("e1"), Piece::new(PieceKind::King, Color::Light));
        board.set_piece(sq("a1"), Piece::new(PieceKind::Rook, Color::Light));
        board.set_piece(sq("h1"), Piece::new(PieceKind::Rook, Color::Light));
        board.set_piece(sq("e8"), Piece::new(PieceKind::King, Color::Dark));
        board
    }

    #[test]
    fn castling_both_sides_when_unobstructed() {
        let board = castling_board();
        assert!(can_move(&board, &Move::new(sq("e1"), sq("g1")), true));
        assert!(can_move(&board, &Move::new(sq("e1"), sq("c1")), true));
        assert_eq!(
            castling_rook(&Move::new(sq("e1"), sq("c1"))),
            Some(CastlingRook {
                from: sq("a1"),
                to: sq("d1")
            })
        );
    }

    #[test]
    fn castling_needs_unmoved_pieces_and_empty_stretch() {
        let mut board = castling_board();
        board.set_piece(sq("b1"), Piece::new(PieceKind::Knight, Color::Light));
        assert!(!can_move(&board, &Move::new(sq("e1"), sq("c1")), true));

        board.set_piece(sq("h1"), Piece::new(PieceKind::Rook, Color::Light).with_moved(true));
        assert!(!can_move(&board, &Move::new(sq("e1"), sq("g1")), true));

        let mut moved_king = castling_board();
        moved_king.set_piece(sq("e1"), Piece::new(PieceKind::King, Color::Light).with_moved(true));
        assert!(!can_move(&moved_king, &Move::new(sq("e1"), sq("g1")), true));
    }

    #[test]
    fn castling_forbidden_through_or_out_of_attack() {
        let mut through = castling_board();
        through.set_piece(sq("f8"), Piece::new(PieceKind::Rook, Color::Dark));
        assert!(!can_move(&through, &Move::new(sq("e1"), sq("g1")), true));
        assert!(can_move(&through, &Move::new(sq("e1"), sq("c1")), true));

        let mut in_check = castling_board();
        in_check.set_piece(sq("e5"), Piece::new(PieceKind::Rook, Color::Dark));
        assert!(!can_move(&in_check, &Move::new(sq("e1"), sq("g1")), true));
        assert!(!can_move(&in_check, &Move::new(sq("e1"), sq("c1")), true));
    }

    #[test]
    fn attacked_b1_does_not_stop_queen_side_castling() {
        let mut board = castling_board();
        board.set_piece(sq("b8"), Piece::new(PieceKind::Rook, Color::Dark));
        assert!(can_move(&board, &Move::new(sq("e1"), sq("c1")), true));
    }

    #[test]
    fn king_steps_one_square() {
        let board = castling_board();
        assert!(can_move(&board, &Move::new(sq("e1"), sq("f2")), true));
        assert!(!can_move(&board, &Move::new(sq("e1"), sq("e3")), true));
    }
}
