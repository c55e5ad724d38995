//! Full legal move generation pipeline.
//!
//! Per-kind candidates are filtered by the kind's structural rules and then
//! by a simulate-and-discard self-check test. The same pipeline validates a
//! single externally supplied move.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Position};
use crate::move_generation::legal_move_checks::leaves_own_king_safe;
use crate::move_generation::legal_move_shared::rules_for;
use crate::moves::move_descriptions::Move;

/// Structural legality of `mv` for whatever stands on `mv.from`.
pub fn can_move(board: &Board, mv: &Move, with_king_check: bool) -> bool {
    board
        .get_piece(mv.from)
        .is_some_and(|piece| (rules_for(piece.kind()).can_move)(board, mv, with_king_check))
}

/// Structurally legal and does not leave the mover's king in check.
pub fn is_legal_move(board: &Board, mv: &Move) -> bool {
    can_move(board, mv, true) && leaves_own_king_safe(board, mv)
}

/// Every legal move of the piece on `position`, empty if the square is empty.
pub fn legal_moves_from(board: &Board, position: Position) -> Vec<Move> {
    let Some(piece) = board.get_piece(position) else {
        return Vec::new();
    };
    let rules = rules_for(piece.kind());
    let mut candidates = Vec::with_capacity(28);
    (rules.candidate_moves)(board, position, &mut candidates);
    candidates.retain(|mv| (rules.can_move)(board, mv, true) && leaves_own_king_safe(board, mv));
    candidates
}

/// Every legal move for `color`, grouped by origin square in `a1..h8` order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for position in board.piece_positions_by_color(color) {
        moves.extend(legal_moves_from(board, position));
    }
    moves
}

/// Short-circuiting variant of `!legal_moves(..).is_empty()`.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .piece_positions_by_color(color)
        .into_iter()
        .any(|position| !legal_moves_from(board, position).is_empty())
}
