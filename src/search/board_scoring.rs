//! Pluggable board evaluation interfaces and the baseline material scorer.
//!
//! Search stays modular by delegating static position scoring to this trait.
//! Scores are bounded reals in `[MIN_EVAL, MAX_EVAL]`, with the bounds
//! reserved for mate. Implementations must be antisymmetric in
//! `perspective`: scoring for one colour is the exact negation of scoring for
//! the other. Minimax and negamax only agree on results under that contract.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_history::GameHistory;
use crate::game_state::game_state_checker::{is_draw_for, is_mate};

pub const MAX_EVAL: f64 = 1.0;
pub const MIN_EVAL: f64 = -1.0;

pub trait BoardScorer: Send + Sync {
    /// Score of `board` for `perspective`, with `side_to_move` to play.
    fn score(
        &self,
        board: &Board,
        history: &GameHistory,
        side_to_move: Color,
        perspective: Color,
    ) -> f64;
}

/// Mate and draw detection plus a normalized material balance.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> f64 {
        match piece {
            PieceKind::Pawn => 1.0,
            PieceKind::Knight => 3.0,
            PieceKind::Bishop => 3.0,
            PieceKind::Rook => 5.0,
            PieceKind::Queen => 9.0,
            PieceKind::King => 100.0,
        }
    }

    pub fn material(board: &Board, color: Color) -> f64 {
        board
            .pieces()
            .filter(|(_, piece)| piece.color() == color)
            .map(|(_, piece)| Self::piece_value(piece.kind()))
            .sum()
    }

    /// `(own - enemy) * (1 + 10 / (own + enemy)) / 1000`, rounded to 1e-9.
    ///
    /// Trading down while ahead raises the score, which pushes a winning side
    /// towards simplification.
    pub fn material_balance(own: f64, enemy: f64) -> f64 {
        let total = own + enemy;
        if total <= 0.0 {
            return 0.0;
        }
        let raw = (own - enemy) * (1.0 + 10.0 / total) / 1000.0;
        (raw * 1e9).round() / 1e9
    }
}

impl BoardScorer for MaterialScorer {
    fn score(
        &self,
        board: &Board,
        history: &GameHistory,
        side_to_move: Color,
        perspective: Color,
    ) -> f64 {
        if is_mate(board, perspective.opposite()) {
            return MAX_EVAL;
        }
        if is_mate(board, perspective) {
            return MIN_EVAL;
        }
        if is_draw_for(board, history, side_to_move) {
            return 0.0;
        }
        Self::material_balance(
            Self::material(board, perspective),
            Self::material(board, perspective.opposite()),
        )
    }
}
