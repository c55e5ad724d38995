//! Applying moves to a board.
//!
//! `perform_move` is the raw transition and trusts its caller. `make_move` is
//! the checked entry point: it validates structure and self-check first and
//! leaves the board untouched when the move is rejected.

use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_history::GameHistory;
use crate::move_generation::legal_move_generator::is_legal_move;
use crate::moves::king_moves::castling_rook;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::{en_passant_victim, is_en_passant};

/// What a performed move took off the board, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveEffects {
    pub captured: Option<PieceKind>,
    pub moved_kind: Option<PieceKind>,
    pub castled: bool,
    pub en_passant: bool,
}

/// Apply `mv` without any legality checks.
///
/// Handles en passant removal, the rook hop of castling and promotion, marks
/// the moving piece as moved and records the move as the board's last move.
pub fn perform_move(board: &mut Board, mv: &Move) -> MoveEffects {
    let mut effects = MoveEffects::default();
    let en_passant = is_en_passant(board, mv);
    let Some(piece) = board.remove_piece(mv.from) else {
        return effects;
    };
    effects.moved_kind = Some(piece.kind());

    if en_passant {
        if let Some(victim_square) = en_passant_victim(mv) {
            effects.captured = board.remove_piece(victim_square).map(|victim| victim.kind());
            effects.en_passant = true;
        }
    }

    if piece.kind() == PieceKind::King {
        if let Some(rook_squares) = castling_rook(mv) {
            if let Some(rook) = board.remove_piece(rook_squares.from) {
                board.set_piece(rook_squares.to, rook.with_moved(true));
                effects.castled = true;
            }
        }
    }

    let placed = match mv.promotion {
        Some(kind) if piece.kind() == PieceKind::Pawn => piece.promoted_to(kind),
        _ => piece.with_moved(true),
    };
    if let Some(captured) = board.remove_piece(mv.to) {
        effects.captured = Some(captured.kind());
    }
    board.set_piece(mv.to, placed);
    board.set_last_move(Some(*mv));
    effects
}

/// Validate and apply `mv`. Returns `false` and leaves `board` unchanged when
/// the move is not legal.
pub fn make_move(board: &mut Board, mv: &Move) -> bool {
    if !is_legal_move(board, mv) {
        return false;
    }
    perform_move(board, mv);
    true
}

/// Copy of `board` with `mv` applied, unchecked.
pub fn board_after(board: &Board, mv: &Move) -> Board {
    let mut next = board.clone();
    perform_move(&mut next, mv);
    next
}

/// Fresh board and history copies with `mv` played and recorded. Search
/// branches only ever work on these copies.
pub fn apply_to_copies(board: &Board, history: &GameHistory, mv: &Move) -> (Board, GameHistory) {
    let next = board_after(board, mv);
    let mut next_history = history.clone();
    next_history.record(board, *mv, &next);
    (next, next_history)
}
