use crate::game_state::board::Board;
use crate::game_state::chess_types::Position;
use crate::moves::move_descriptions::Move;
use crate::moves::{bishop_moves, rook_moves};

pub fn can_move(board: &Board, mv: &Move, with_king_check: bool) -> bool {
    rook_moves::can_move(board, mv, with_king_check)
        || bishop_moves::can_move(board, mv, with_king_check)
}

pub fn candidate_moves(board: &Board, from: Position, out: &mut Vec<Move>) {
    rook_moves::candidate_moves(board, from, out);
    bishop_moves::candidate_moves(board, from, out);
}
