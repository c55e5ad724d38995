//! Caller-side time budget for a search.
//!
//! The search itself never looks at a clock. This helper runs it on a worker
//! thread, waits for at most `budget` and on expiry asks the algorithm to
//! stop, then falls back to the anytime move it committed so far.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::warn;

use crate::chess_errors::SearchError;
use crate::engines::engine_trait::Algorithm;
use crate::game_state::board::Board;
use crate::game_state::game_history::GameHistory;
use crate::moves::move_descriptions::Move;

pub fn choose_move_within(
    algorithm: Arc<dyn Algorithm>,
    board: &Board,
    history: &GameHistory,
    budget: Duration,
) -> Result<Move, SearchError> {
    // The worker never clears the stop flag; reset it before the spawn.
    algorithm.begin_search();

    let (sender, receiver) = mpsc::channel();
    let worker_algorithm = Arc::clone(&algorithm);
    let board = board.clone();
    let history = history.clone();
    let worker = thread::spawn(move || {
        let result = worker_algorithm
            .search_prepared(&board, &history)
            .map(|scored| scored.mv);
        // The receiver is gone once the budget expired.
        let _ = sender.send(result);
    });

    match receiver.recv_timeout(budget) {
        Ok(result) => {
            join_worker(worker, algorithm.name());
            result
        }
        Err(RecvTimeoutError::Timeout) => {
            algorithm.request_stop();
            // Wait for the unwind so the next search starts from a clean state.
            join_worker(worker, algorithm.name());
            let fallback = algorithm.best_move_after_timeout();
            warn!(
                algorithm = algorithm.name(),
                budget_ms = budget.as_millis() as u64,
                fallback = ?fallback.map(|mv| mv.to_string()),
                "search budget exhausted"
            );
            fallback.ok_or(SearchError::NoBestMoveYet)
        }
        Err(RecvTimeoutError::Disconnected) => {
            join_worker(worker, algorithm.name());
            Err(SearchError::WorkerPanicked)
        }
    }
}

/// Join the search thread, logging a panic instead of dropping it.
fn join_worker(worker: JoinHandle<()>, algorithm: &'static str) {
    if let Err(payload) = worker.join() {
        let message = payload
            .downcast_ref::<&str>()
            .map(|text| (*text).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_default();
        warn!(algorithm, %message, "search worker panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_setup::default_board;
    use crate::game_state::chess_types::Color;
    use crate::move_generation::legal_move_generator::legal_moves;
    use crate::move_generation::legal_move_apply::apply_to_copies;
    use crate::search::board_scoring::{BoardScorer, MaterialScorer};
    use crate::search::minimax::MiniMax;
    use crate::search::negamax::NegaMax;
    use crate::search::scored_move::ScoredMove;
    use crate::search::threading::{ForkPolicy, ThreadingConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    /// Material scorer that sleeps before every leaf.
    struct SlowScorer {
        delay: Duration,
    }

    impl BoardScorer for SlowScorer {
        fn score(
            &self,
            board: &Board,
            history: &GameHistory,
            side_to_move: Color,
            perspective: Color,
        ) -> f64 {
            thread::sleep(self.delay);
            MaterialScorer.score(board, history, side_to_move, perspective)
        }
    }

    /// Material scorer that answers the first `fast_leaves` calls at once and
    /// stalls on every later one.
    struct StallAfter {
        fast_leaves: usize,
        calls: AtomicUsize,
        stall: Duration,
    }

    impl BoardScorer for StallAfter {
        fn score(
            &self,
            board: &Board,
            history: &GameHistory,
            side_to_move: Color,
            perspective: Color,
        ) -> f64 {
            if self.calls.fetch_add(1, Ordering::Relaxed) >= self.fast_leaves {
                thread::sleep(self.stall);
            }
            MaterialScorer.score(board, history, side_to_move, perspective)
        }
    }

    struct PanickingAlgorithm;

    impl Algorithm for PanickingAlgorithm {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn color(&self) -> Color {
            Color::Light
        }

        fn begin_search(&self) {}

        fn search_prepared(
            &self,
            _board: &Board,
            _history: &GameHistory,
        ) -> Result<ScoredMove, SearchError> {
            panic!("scorer table missing");
        }

        fn best_move_after_timeout(&self) -> Option<Move> {
            None
        }

        fn request_stop(&self) {}
    }

    #[test]
    fn finished_search_is_returned_directly() {
        let board = default_board();
        let history = GameHistory::new();
        let expected = MiniMax::new(Color::Light, 1)
            .find_best_move(&board, &history)
            .expect("start position has moves");
        let algorithm: Arc<dyn Algorithm> = Arc::new(MiniMax::new(Color::Light, 1));
        let chosen = choose_move_within(algorithm, &board, &history, Duration::from_secs(30))
            .expect("search finishes well inside the budget");
        assert_eq!(chosen, expected);
    }

    #[test]
    fn expired_budget_falls_back_to_the_anytime_move() {
        let board = default_board();
        let history = GameHistory::new();
        // First root child takes ~20 leaves, the full search ~39.
        let scorer = SlowScorer {
            delay: Duration::from_millis(30),
        };
        let algorithm: Arc<dyn Algorithm> = Arc::new(MiniMax::with_scorer(Color::Light, 2, scorer));
        let chosen = choose_move_within(
            Arc::clone(&algorithm),
            &board,
            &history,
            Duration::from_millis(900),
        )
        .expect("first root child completes inside the budget");
        assert!(legal_moves(&board, Color::Light).contains(&chosen));
        assert_eq!(algorithm.best_move_after_timeout(), Some(chosen));
    }

    #[test]
    fn expiry_before_any_root_result_is_an_error() {
        let board = default_board();
        let scorer = SlowScorer {
            delay: Duration::from_millis(200),
        };
        let algorithm: Arc<dyn Algorithm> = Arc::new(MiniMax::with_scorer(Color::Light, 2, scorer));
        let err = choose_move_within(algorithm, &board, &GameHistory::new(), Duration::from_millis(50))
            .expect_err("no root child can finish in time");
        assert_eq!(err, SearchError::NoBestMoveYet);
    }

    #[test]
    fn zero_budget_stops_before_the_search_gets_going() {
        let board = default_board();
        // Finishing would take about four seconds of leaf delays.
        let scorer = SlowScorer {
            delay: Duration::from_millis(100),
        };
        let algorithm: Arc<dyn Algorithm> = Arc::new(MiniMax::with_scorer(Color::Light, 2, scorer));
        for _ in 0..5 {
            let started = Instant::now();
            let err = choose_move_within(
                Arc::clone(&algorithm),
                &board,
                &GameHistory::new(),
                Duration::ZERO,
            )
            .expect_err("nothing can finish in a zero budget");
            assert_eq!(err, SearchError::NoBestMoveYet);
            assert!(
                started.elapsed() < Duration::from_millis(1500),
                "stop was lost, search took {:?}",
                started.elapsed()
            );
        }
    }

    #[test]
    fn parallel_search_falls_back_to_its_anytime_move() {
        let board = default_board();
        let history = GameHistory::new();
        let first = legal_moves(&board, Color::Light)[0];
        let (after_first, _) = apply_to_copies(&board, &history, &first);
        // The first root child is searched inline and finishes on fast leaves;
        // every forked sibling then stalls past the budget.
        let scorer = StallAfter {
            fast_leaves: legal_moves(&after_first, Color::Dark).len(),
            calls: AtomicUsize::new(0),
            stall: Duration::from_millis(800),
        };
        let threading = ThreadingConfig::default()
            .with_threads(2)
            .with_fork_policy(ForkPolicy::Always);
        let algorithm: Arc<dyn Algorithm> = Arc::new(
            NegaMax::with_scorer(Color::Light, 2, threading, scorer).expect("pool should build"),
        );

        let chosen = choose_move_within(
            Arc::clone(&algorithm),
            &board,
            &history,
            Duration::from_millis(300),
        )
        .expect("first root child completes inside the budget");
        assert!(legal_moves(&board, Color::Light).contains(&chosen));
        assert_eq!(algorithm.best_move_after_timeout(), Some(chosen));
        assert_eq!(chosen, first);
        algorithm.shutdown_pool();
    }

    #[test]
    fn worker_panic_is_reported_as_its_own_error() {
        let algorithm: Arc<dyn Algorithm> = Arc::new(PanickingAlgorithm);
        let err = choose_move_within(
            algorithm,
            &default_board(),
            &GameHistory::new(),
            Duration::from_secs(30),
        )
        .expect_err("the worker never sends a result");
        assert_eq!(err, SearchError::WorkerPanicked);
    }
}
