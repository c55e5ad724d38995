//! Stateless game-end predicates over a board and its history.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{REPETITION_LIMIT, SEVENTY_FIVE_MOVE_LIMIT};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_history::GameHistory;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;

/// Reason an automatic draw applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    Repetition,
}

#[inline]
pub fn is_check(board: &Board, color: Color) -> bool {
    is_king_in_check(board, color)
}

/// In check with no legal move to get out of it.
pub fn is_mate(board: &Board, color: Color) -> bool {
    is_check(board, color) && !has_legal_move(board, color)
}

/// Not in check, and no legal move at all.
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_check(board, color) && !has_legal_move(board, color)
}

/// Lone king against a lone king, a king and one minor piece, or a king and
/// two knights.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut extras: [Vec<PieceKind>; 2] = [Vec::new(), Vec::new()];
    for (_, piece) in board.pieces() {
        if piece.kind() != PieceKind::King {
            extras[piece.color().index()].push(piece.kind());
        }
    }
    let [light, dark] = extras;
    match (light.is_empty(), dark.is_empty()) {
        (true, true) => true,
        (true, false) => cannot_force_mate(&dark),
        (false, true) => cannot_force_mate(&light),
        (false, false) => false,
    }
}

fn cannot_force_mate(extras: &[PieceKind]) -> bool {
    match extras {
        [PieceKind::Knight] | [PieceKind::Bishop] => true,
        [PieceKind::Knight, PieceKind::Knight] => true,
        _ => false,
    }
}

/// First automatic draw rule that applies with `side_to_move` to play.
pub fn draw_reason(board: &Board, history: &GameHistory, side_to_move: Color) -> Option<DrawReason> {
    if is_stalemate(board, side_to_move) {
        return Some(DrawReason::Stalemate);
    }
    if is_insufficient_material(board) {
        return Some(DrawReason::InsufficientMaterial);
    }
    if history.moves_without_capture_or_pawn_advance() >= SEVENTY_FIVE_MOVE_LIMIT {
        return Some(DrawReason::SeventyFiveMoves);
    }
    if history.max_repeat_position(board) >= REPETITION_LIMIT {
        return Some(DrawReason::Repetition);
    }
    None
}

pub fn is_draw_for(board: &Board, history: &GameHistory, side_to_move: Color) -> bool {
    draw_reason(board, history, side_to_move).is_some()
}

/// Draw test with the side to move taken from the board's last move.
pub fn is_draw(board: &Board, history: &GameHistory) -> bool {
    is_draw_for(board, history, board.side_to_move())
}

/// Mate for either side, or a draw with `side_to_move` to play.
pub fn is_game_over(board: &Board, history: &GameHistory, side_to_move: Color) -> bool {
    is_mate(board, Color::Light) || is_mate(board, Color::Dark) || is_draw_for(board, history, side_to_move)
}
