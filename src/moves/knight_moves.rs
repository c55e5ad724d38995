use crate::game_state::board::Board;
use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_shared::{
    basic_valid_move, has_no_promotion, push_offset_candidates,
};
use crate::moves::move_descriptions::Move;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

#[inline]
pub fn is_knight_jump(d_column: i8, d_row: i8) -> bool {
    matches!((d_column.abs(), d_row.abs()), (1, 2) | (2, 1))
}

pub fn can_move(board: &Board, mv: &Move, with_king_check: bool) -> bool {
    let (d_column, d_row) = mv.deltas();
    has_no_promotion(mv)
        && basic_valid_move(board, mv, with_king_check)
        && is_knight_jump(d_column, d_row)
}

pub fn candidate_moves(_board: &Board, from: Position, out: &mut Vec<Move>) {
    push_offset_candidates(from, &KNIGHT_OFFSETS, out);
}
