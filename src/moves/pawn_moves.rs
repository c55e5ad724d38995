//! Pawn rules: single and double advance, diagonal capture, en passant and
//! promotion.
//!
//! A move onto the last row must name a promotion kind, and any other pawn
//! move must not. En passant is only available against a pawn that made a
//! two-square advance on the immediately preceding move and now stands beside
//! the capturing pawn.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Position, PROMOTION_KINDS};
use crate::move_generation::legal_move_shared::basic_valid_move;
use crate::moves::move_descriptions::Move;

/// Squares a pawn of `color` on `from` attacks, regardless of occupancy.
pub fn attack_squares(color: Color, from: Position) -> impl Iterator<Item = Position> {
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_column| from.offset(d_column, color.forward()))
}

pub fn can_move(board: &Board, mv: &Move, with_king_check: bool) -> bool {
    if !basic_valid_move(board, mv, with_king_check) {
        return false;
    }
    let Some(pawn) = board.get_piece(mv.from) else {
        return false;
    };
    if !promotion_matches_destination(pawn.color(), mv) {
        return false;
    }

    let (d_column, d_row) = mv.deltas();
    let forward = pawn.color().forward();
    match (d_column.abs(), d_row * forward) {
        (0, 1) => !board.has_piece(mv.to),
        (0, 2) => can_double_step(board, mv, pawn.moved()),
        (1, 1) => board.has_piece(mv.to) || is_en_passant(board, mv),
        _ => false,
    }
}

fn promotion_matches_destination(color: Color, mv: &Move) -> bool {
    let reaches_last_row = mv.to.row() == color.last_row();
    match mv.promotion {
        Some(kind) => reaches_last_row && kind.is_promotion_target(),
        None => !reaches_last_row,
    }
}

fn can_double_step(board: &Board, mv: &Move, moved: bool) -> bool {
    if moved || board.has_piece(mv.to) {
        return false;
    }
    let middle_row = (mv.from.row() as i8 + mv.to.row() as i8) / 2;
    Position::new(mv.from.column() as i8, middle_row)
        .is_some_and(|middle| !board.has_piece(middle))
}

/// True when `mv` is a diagonal pawn step onto an empty square capturing the
/// enemy pawn that just advanced two squares beside it.
pub fn is_en_passant(board: &Board, mv: &Move) -> bool {
    let Some(pawn) = board.get_piece(mv.from) else {
        return false;
    };
    if pawn.kind() != PieceKind::Pawn || board.has_piece(mv.to) {
        return false;
    }
    let (d_column, d_row) = mv.deltas();
    if d_column.abs() != 1 || d_row != pawn.color().forward() {
        return false;
    }
    let Some(last) = board.last_move() else {
        return false;
    };
    let Some(victim) = board.get_piece(last.to) else {
        return false;
    };
    let (last_d_column, last_d_row) = last.deltas();
    victim.kind() == PieceKind::Pawn
        && victim.color() != pawn.color()
        && last_d_column == 0
        && last_d_row.abs() == 2
        && last.to.row() == mv.from.row()
        && last.to.column() == mv.to.column()
}

/// Square of the pawn removed by an en passant capture.
#[inline]
pub fn en_passant_victim(mv: &Move) -> Option<Position> {
    Position::new(mv.to.column() as i8, mv.from.row() as i8)
}

pub fn candidate_moves(board: &Board, from: Position, out: &mut Vec<Move>) {
    let Some(pawn) = board.get_piece(from) else {
        return;
    };
    let color = pawn.color();
    let forward = color.forward();
    let steps = [(0, forward), (0, 2 * forward), (-1, forward), (1, forward)];
    for (d_column, d_row) in steps {
        let Some(to) = from.offset(d_column, d_row) else {
            continue;
        };
        if to.row() == color.last_row() {
            out.extend(
                PROMOTION_KINDS
                    .iter()
                    .map(|&kind| Move::with_promotion(from, to, kind)),
            );
        } else {
            out.push(Move::new(from, to));
        }
    }
}
