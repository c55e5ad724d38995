use crate::game_state::board::Board;
use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_shared::{
    basic_valid_move, has_no_promotion, path_is_clear, push_ray_candidates,
};
use crate::moves::move_descriptions::Move;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub fn can_move(board: &Board, mv: &Move, with_king_check: bool) -> bool {
    let (d_column, d_row) = mv.deltas();
    has_no_promotion(mv)
        && (d_column == 0 || d_row == 0)
        && basic_valid_move(board, mv, with_king_check)
        && path_is_clear(board, mv.from, mv.to)
}

pub fn candidate_moves(board: &Board, from: Position, out: &mut Vec<Move>) {
    push_ray_candidates(board, from, &ROOK_DIRECTIONS, out);
}
