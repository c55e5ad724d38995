//! Algorithm facade shared by every move-choosing strategy.
//!
//! Callers (the game session, the self-play harness, the binaries) only ever
//! talk to `dyn Algorithm`, so strategies can be selected at runtime.

use std::str::FromStr;
use std::sync::Arc;

use crate::chess_errors::SearchError;
use crate::engines::engine_random::RandomAlgorithm;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::game_history::GameHistory;
use crate::moves::move_descriptions::Move;
use crate::search::minimax::MiniMax;
use crate::search::negamax::NegaMax;
use crate::search::scored_move::ScoredMove;
use crate::search::threading::ThreadingConfig;

pub trait Algorithm: Send + Sync {
    fn name(&self) -> &'static str;

    /// Colour this instance plays for.
    fn color(&self) -> Color;

    /// Clear a pending stop and the anytime move ahead of a search.
    fn begin_search(&self);

    /// Search after [`Algorithm::begin_search`]. A stop requested in between
    /// is honoured and yields `SearchError::Stopped`.
    fn search_prepared(
        &self,
        board: &Board,
        history: &GameHistory,
    ) -> Result<ScoredMove, SearchError>;

    /// Run a full search from `board` and return the chosen move with its
    /// score from this instance's perspective.
    fn search(&self, board: &Board, history: &GameHistory) -> Result<ScoredMove, SearchError> {
        self.begin_search();
        self.search_prepared(board, history)
    }

    fn find_best_move(&self, board: &Board, history: &GameHistory) -> Result<Move, SearchError> {
        self.search(board, history).map(|scored| scored.mv)
    }

    /// Most recently committed root-level best move of the current or last
    /// search. `None` before any root child has finished.
    fn best_move_after_timeout(&self) -> Option<Move>;

    /// Ask a running search to unwind as soon as possible.
    fn request_stop(&self);

    /// Release worker threads. Later searches fail with
    /// `SearchError::PoolShutDown` on algorithms that own a pool.
    fn shutdown_pool(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    Minimax,
    Negamax,
    Random,
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(AlgorithmKind::Minimax),
            "negamax" => Ok(AlgorithmKind::Negamax),
            "random" => Ok(AlgorithmKind::Random),
            other => Err(format!("unknown algorithm `{other}`")),
        }
    }
}

/// Construct a boxed algorithm of `kind`. `threading` only matters for
/// negamax, which builds its worker pool here.
pub fn build_algorithm(
    kind: AlgorithmKind,
    color: Color,
    depth: u8,
    threading: ThreadingConfig,
) -> Result<Arc<dyn Algorithm>, SearchError> {
    let algorithm: Arc<dyn Algorithm> = match kind {
        AlgorithmKind::Minimax => Arc::new(MiniMax::new(color, depth)),
        AlgorithmKind::Negamax => Arc::new(NegaMax::new(color, depth, threading)?),
        AlgorithmKind::Random => Arc::new(RandomAlgorithm::new(color)),
    };
    Ok(algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_setup::default_board;
    use crate::move_generation::legal_move_generator::legal_moves;

    #[test]
    fn algorithm_kind_parses_case_insensitively() {
        assert_eq!("MiniMax".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Minimax));
        assert_eq!("negamax".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Negamax));
        assert_eq!("random".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Random));
        assert!("alphazero".parse::<AlgorithmKind>().is_err());
    }

    #[test]
    fn every_built_algorithm_returns_a_legal_opening_move() {
        let board = default_board();
        let history = GameHistory::new();
        let legal = legal_moves(&board, Color::Light);
        for kind in [AlgorithmKind::Minimax, AlgorithmKind::Negamax, AlgorithmKind::Random] {
            let algorithm = build_algorithm(kind, Color::Light, 2, ThreadingConfig::default())
                .expect("algorithm should build");
            let mv = algorithm
                .find_best_move(&board, &history)
                .expect("opening position has moves");
            assert!(legal.contains(&mv), "{} chose illegal {mv}", algorithm.name());
            assert_eq!(algorithm.best_move_after_timeout(), Some(mv));
            algorithm.shutdown_pool();
        }
    }

    #[test]
    fn stop_between_begin_and_search_is_honoured() {
        let board = default_board();
        let history = GameHistory::new();
        for kind in [AlgorithmKind::Minimax, AlgorithmKind::Negamax, AlgorithmKind::Random] {
            let algorithm = build_algorithm(kind, Color::Light, 2, ThreadingConfig::default())
                .expect("algorithm should build");
            algorithm.begin_search();
            algorithm.request_stop();
            assert_eq!(
                algorithm.search_prepared(&board, &history),
                Err(SearchError::Stopped),
                "{} ignored a pending stop",
                algorithm.name()
            );
            assert_eq!(algorithm.best_move_after_timeout(), None);

            let mv = algorithm
                .find_best_move(&board, &history)
                .expect("a fresh search clears the old stop");
            assert!(legal_moves(&board, Color::Light).contains(&mv));
            algorithm.shutdown_pool();
        }
    }
}
