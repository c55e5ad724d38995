//! Attack and check queries, plus the self-check filter applied to every
//! structurally valid move.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{deltas, Color, PieceKind, Position};
use crate::move_generation::legal_move_apply::perform_move;
use crate::move_generation::legal_move_shared::rules_for;
use crate::moves::king_moves::is_king_step;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves;

/// True if any `attacker_color` piece could capture on `square`.
///
/// Pawns and kings are tested by geometry alone, so an empty square is still
/// attacked by a pawn diagonal and castling never recurses into itself. The
/// other kinds run their structural rules with the king check disabled.
pub fn is_square_attacked(board: &Board, square: Position, attacker_color: Color) -> bool {
    board.pieces().any(|(from, piece)| {
        if piece.color() != attacker_color || from == square {
            return false;
        }
        match piece.kind() {
            PieceKind::Pawn => {
                pawn_moves::attack_squares(attacker_color, from).any(|target| target == square)
            }
            PieceKind::King => {
                let (d_column, d_row) = deltas(from, square);
                is_king_step(d_column, d_row)
            }
            kind => (rules_for(kind).can_move)(board, &Move::new(from, square), false),
        }
    })
}

/// Whether `color`'s king stands on an attacked square. A board without that
/// king is never in check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_square) = board.king_position(color) else {
        return false;
    };
    is_square_attacked(board, king_square, color.opposite())
}

/// Apply `mv` on a throwaway copy and report whether the mover's king is safe
/// afterwards.
pub fn leaves_own_king_safe(board: &Board, mv: &Move) -> bool {
    let Some(mover) = board.get_piece(mv.from) else {
        return false;
    };
    let mut scratch = board.clone();
    perform_move(&mut scratch, mv);
    !is_king_in_check(&scratch, mover.color())
}
