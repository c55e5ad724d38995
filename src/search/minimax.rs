//! Sequential depth-limited minimax with fail-soft alpha-beta pruning.
//!
//! This is the reference result for the parallel negamax: same move order,
//! same strict tie-breaking, same leaf scoring.

use std::sync::Arc;

use crate::chess_errors::SearchError;
use crate::engines::engine_trait::Algorithm;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::game_history::GameHistory;
use crate::game_state::game_state_checker::is_game_over;
use crate::move_generation::legal_move_apply::apply_to_copies;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, MaterialScorer, MAX_EVAL, MIN_EVAL};
use crate::search::scored_move::ScoredMove;
use crate::search::threading::SharedSearchState;

pub struct MiniMax<S: BoardScorer = MaterialScorer> {
    color: Color,
    depth: u8,
    scorer: S,
    shared: Arc<SharedSearchState>,
}

impl MiniMax<MaterialScorer> {
    pub fn new(color: Color, depth: u8) -> Self {
        Self::with_scorer(color, depth, MaterialScorer)
    }
}

impl<S: BoardScorer> MiniMax<S> {
    pub fn with_scorer(color: Color, depth: u8, scorer: S) -> Self {
        Self {
            color,
            depth,
            scorer,
            shared: SharedSearchState::new(),
        }
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn nodes_visited(&self) -> u64 {
        self.shared.nodes()
    }

    /// Search `board` for `self.color`. The root always expands at least one
    /// ply, even when the configured depth is zero.
    pub fn search_root(
        &self,
        board: &Board,
        history: &GameHistory,
    ) -> Result<ScoredMove, SearchError> {
        self.shared.begin_search();
        self.run_root(board, history)
    }

    /// Root search that honours a stop already pending.
    fn run_root(&self, board: &Board, history: &GameHistory) -> Result<ScoredMove, SearchError> {
        self.shared.begin_accounting();
        let moves = legal_moves(board, self.color);
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves(self.color));
        }

        let depth = self.depth.max(1);
        let mut alpha = MIN_EVAL;
        let beta = MAX_EVAL;
        let mut best: Option<ScoredMove> = None;
        self.shared.add_nodes(1);

        for mv in &moves {
            if self.shared.should_stop() {
                break;
            }
            let (child, child_history) = apply_to_copies(board, history, mv);
            let score = self.minimax(
                &child,
                &child_history,
                self.color.opposite(),
                depth - 1,
                alpha,
                beta,
                false,
            );
            if best.map_or(true, |current| score > current.score) {
                let candidate = ScoredMove::new(*mv, score);
                best = Some(candidate);
                self.shared.offer_root_candidate(candidate);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if self.shared.should_stop() {
            return Err(SearchError::Stopped);
        }
        let result = best.ok_or(SearchError::NoLegalMoves(self.color))?;
        self.shared.commit_root_result(result);
        Ok(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &Board,
        history: &GameHistory,
        side: Color,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        self.shared.add_nodes(1);
        if self.shared.should_stop() {
            return 0.0;
        }
        if depth == 0 || is_game_over(board, history, side) {
            return self.scorer.score(board, history, side, self.color);
        }

        let moves = legal_moves(board, side);
        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for mv in &moves {
                let (child, child_history) = apply_to_copies(board, history, mv);
                let score = self.minimax(
                    &child,
                    &child_history,
                    side.opposite(),
                    depth - 1,
                    alpha,
                    beta,
                    false,
                );
                if score > best {
                    best = score;
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for mv in &moves {
                let (child, child_history) = apply_to_copies(board, history, mv);
                let score = self.minimax(
                    &child,
                    &child_history,
                    side.opposite(),
                    depth - 1,
                    alpha,
                    beta,
                    true,
                );
                if score < best {
                    best = score;
                }
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

impl<S: BoardScorer> Algorithm for MiniMax<S> {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn begin_search(&self) {
        self.shared.begin_search();
    }

    fn search_prepared(
        &self,
        board: &Board,
        history: &GameHistory,
    ) -> Result<ScoredMove, SearchError> {
        self.run_root(board, history)
    }

    fn best_move_after_timeout(&self) -> Option<Move> {
        self.shared.best().map(|scored| scored.mv)
    }

    fn request_stop(&self) {
        self.shared.request_stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Position;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> Position {
        Position::parse(text).expect("test square should parse")
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        let (board, side) =
            parse_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").expect("FEN should parse");
        let search = MiniMax::new(side, 1);
        let result = search
            .search_root(&board, &GameHistory::new())
            .expect("position has moves");
        assert_eq!(result.mv, Move::new(sq("a1"), sq("a8")));
        assert_eq!(result.score, MAX_EVAL);
        assert_eq!(search.best_move_after_timeout(), Some(result.mv));
    }

    #[test]
    fn takes_the_hanging_queen() {
        let (board, side) = parse_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("FEN should parse");
        let result = MiniMax::new(side, 2)
            .search_root(&board, &GameHistory::new())
            .expect("position has moves");
        assert_eq!(result.mv, Move::new(sq("d2"), sq("d5")));
        assert!(result.score > 0.0);
    }

    #[test]
    fn zero_depth_still_expands_the_root() {
        let (board, side) = parse_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("FEN should parse");
        let search = MiniMax::new(side, 0);
        let result = search
            .search_root(&board, &GameHistory::new())
            .expect("position has moves");
        assert_eq!(result.mv, Move::new(sq("d2"), sq("d5")));
        assert!(search.nodes_visited() > 1);
    }

    #[test]
    fn mated_side_reports_no_legal_moves() {
        let (board, _) = parse_fen("K7/8/8/8/8/8/8/rrR4k w - - 0 1").expect("FEN should parse");
        let err = MiniMax::new(Color::Light, 2)
            .search_root(&board, &GameHistory::new())
            .expect_err("mated side cannot move");
        assert_eq!(err, SearchError::NoLegalMoves(Color::Light));
    }

    #[test]
    fn dark_side_searches_from_its_own_perspective() {
        let (board, _) = parse_fen("4k3/8/8/3r4/8/8/3Q4/7K b - - 0 1").expect("FEN should parse");
        let result = MiniMax::new(Color::Dark, 2)
            .search_root(&board, &GameHistory::new())
            .expect("position has moves");
        assert_eq!(result.mv, Move::new(sq("d5"), sq("d2")));
        assert!(result.score > 0.0);
    }
}
