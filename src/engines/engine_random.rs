//! Random-move sparring partner.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! self-play smoke tests and as the weakest opponent in matches.

use std::sync::{Arc, Mutex, PoisonError};

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::SearchError;
use crate::engines::engine_trait::Algorithm;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::game_history::GameHistory;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::Move;
use crate::search::scored_move::ScoredMove;
use crate::search::threading::SharedSearchState;

pub struct RandomAlgorithm {
    color: Color,
    rng: Mutex<StdRng>,
    shared: Arc<SharedSearchState>,
}

impl RandomAlgorithm {
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, StdRng::from_rng(&mut rand::rng()))
    }

    /// Reproducible move choices for tests and seeded matches.
    pub fn seeded(color: Color, seed: u64) -> Self {
        Self::with_rng(color, StdRng::seed_from_u64(seed))
    }

    fn with_rng(color: Color, rng: StdRng) -> Self {
        Self {
            color,
            rng: Mutex::new(rng),
            shared: SharedSearchState::new(),
        }
    }
}

impl Algorithm for RandomAlgorithm {
    fn name(&self) -> &'static str {
        "random"
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
        _history: &GameHistory,
    ) -> Result<ScoredMove, SearchError> {
        self.shared.begin_accounting();
        if self.shared.should_stop() {
            return Err(SearchError::Stopped);
        }
        let moves = legal_moves(board, self.color);
        self.shared.add_nodes(moves.len() as u64);

        let picked = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            moves.as_slice().choose(&mut *rng).copied()
        };
        let mv = picked.ok_or(SearchError::NoLegalMoves(self.color))?;
        let result = ScoredMove::new(mv, 0.0);
        self.shared.commit_root_result(result);
        Ok(result)
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
    use crate::game_state::board_setup::default_board;
    use crate::utils::fen_parser::parse_fen_board;

    #[test]
    fn picks_a_legal_move() {
        let board = default_board();
        let legal = legal_moves(&board, Color::Light);
        let random = RandomAlgorithm::new(Color::Light);
        for _ in 0..10 {
            let mv = random
                .find_best_move(&board, &GameHistory::new())
                .expect("start position has moves");
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let board = default_board();
        let history = GameHistory::new();
        let a = RandomAlgorithm::seeded(Color::Light, 7);
        let b = RandomAlgorithm::seeded(Color::Light, 7);
        for _ in 0..5 {
            assert_eq!(
                a.find_best_move(&board, &history).expect("moves available"),
                b.find_best_move(&board, &history).expect("moves available")
            );
        }
    }

    #[test]
    fn stalemated_side_has_nothing_to_pick() {
        let board = parse_fen_board("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let err = RandomAlgorithm::seeded(Color::Dark, 1)
            .find_best_move(&board, &GameHistory::new())
            .expect_err("no legal moves");
        assert_eq!(err, SearchError::NoLegalMoves(Color::Dark));
    }
}
