use crate::game_state::board::Board;
use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_shared::{
    basic_valid_move, has_no_promotion, path_is_clear, push_ray_candidates,
};
use crate::moves::move_descriptions::Move;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub fn can_move(board: &Board, mv: &Move, with_king_check: bool) -> bool {
    let (d_column, d_row) = mv.deltas();
    has_no_promotion(mv)
        && d_column.abs() == d_row.abs()
        && basic_valid_move(board, mv, with_king_check)
        && path_is_clear(board, mv.from, mv.to)
}

pub fn candidate_moves(board: &Board, from: Position, out: &mut Vec<Move>) {
    push_ray_candidates(board, from, &BISHOP_DIRECTIONS, out);
}
