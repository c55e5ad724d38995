//! Shared pieces of the move rules: the per-kind dispatch table and the
//! structural checks every kind starts from.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Position};
use crate::moves::move_descriptions::Move;
use crate::moves::{bishop_moves, king_moves, knight_moves, pawn_moves, queen_moves, rook_moves};

/// Structural legality of `mv` for the piece standing on `mv.from`.
///
/// The flag mirrors the capture-the-king rule: when `true` a move onto a king
/// is rejected, when `false` it is allowed so the same rules can answer
/// "is this square attacked".
pub type CanMoveFn = fn(&Board, &Move, bool) -> bool;

/// Geometric candidates for the piece on the given square, unfiltered.
pub type CandidateMovesFn = fn(&Board, Position, &mut Vec<Move>);

pub struct PieceRules {
    pub can_move: CanMoveFn,
    pub candidate_moves: CandidateMovesFn,
}

static PIECE_RULES: [PieceRules; 6] = [
    PieceRules {
        can_move: pawn_moves::can_move,
        candidate_moves: pawn_moves::candidate_moves,
    },
    PieceRules {
        can_move: knight_moves::can_move,
        candidate_moves: knight_moves::candidate_moves,
    },
    PieceRules {
        can_move: bishop_moves::can_move,
        candidate_moves: bishop_moves::candidate_moves,
    },
    PieceRules {
        can_move: rook_moves::can_move,
        candidate_moves: rook_moves::candidate_moves,
    },
    PieceRules {
        can_move: queen_moves::can_move,
        candidate_moves: queen_moves::candidate_moves,
    },
    PieceRules {
        can_move: king_moves::can_move,
        candidate_moves: king_moves::candidate_moves,
    },
];

#[inline]
pub fn rules_for(kind: PieceKind) -> &'static PieceRules {
    &PIECE_RULES[kind.index()]
}

/// Checks shared by every kind: a real displacement from an occupied square
/// onto a square not held by the mover's own colour, and not onto a king
/// when `with_king_check` is set.
pub fn basic_valid_move(board: &Board, mv: &Move, with_king_check: bool) -> bool {
    if mv.from == mv.to {
        return false;
    }
    let Some(mover) = board.get_piece(mv.from) else {
        return false;
    };
    match board.get_piece(mv.to) {
        None => true,
        Some(target) if target.color() == mover.color() => false,
        Some(target) => !(with_king_check && target.kind() == PieceKind::King),
    }
}

/// Only promotions carry a promotion kind.
#[inline]
pub fn has_no_promotion(mv: &Move) -> bool {
    mv.promotion.is_none()
}

/// True when `from` and `to` share a row, column or diagonal and every
/// square strictly between them is empty.
pub fn path_is_clear(board: &Board, from: Position, to: Position) -> bool {
    let (d_column, d_row) = crate::game_state::chess_types::deltas(from, to);
    let straight = d_column == 0 || d_row == 0;
    let diagonal = d_column.abs() == d_row.abs();
    if (!straight && !diagonal) || (d_column == 0 && d_row == 0) {
        return false;
    }
    let (step_column, step_row) = (d_column.signum(), d_row.signum());
    let mut cursor = from.offset(step_column, step_row);
    while let Some(square) = cursor {
        if square == to {
            return true;
        }
        if board.has_piece(square) {
            return false;
        }
        cursor = square.offset(step_column, step_row);
    }
    false
}

/// Walk each ray from `from` until the board edge or the first occupied
/// square (which is included, the caller's `can_move` decides on captures).
pub fn push_ray_candidates(
    board: &Board,
    from: Position,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(d_column, d_row) in directions {
        let mut cursor = from.offset(d_column, d_row);
        while let Some(square) = cursor {
            out.push(Move::new(from, square));
            if board.has_piece(square) {
                break;
            }
            cursor = square.offset(d_column, d_row);
        }
    }
}

/// Fixed-offset candidates (knight and king steps).
pub fn push_offset_candidates(from: Position, offsets: &[(i8, i8)], out: &mut Vec<Move>) {
    out.extend(
        offsets
            .iter()
            .filter_map(|&(d_column, d_row)| Move::by_deltas(from, d_column, d_row)),
    );
}
