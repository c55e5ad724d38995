//! Negamax with alpha-beta, decomposed into fork/join tasks on an owned
//! rayon pool.
//!
//! Every node searches its first child inline. Later children are forked
//! into the enclosing `rayon::scope` when the pool's [`ForkPolicy`] allows it
//! and searched inline otherwise. A forked child gets the window known at
//! fork time, which only reflects siblings ordered before it, so folding the
//! child scores back in move order yields exactly the sequential result.
//!
//! Siblings past a proven cutoff skip their subtree when they start. A task
//! already running when the cutoff is found finishes and its score is
//! dropped by the fold.
//!
//! [`ForkPolicy`]: crate::search::threading::ForkPolicy

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

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
use crate::search::threading::{SearchPool, SharedSearchState, ThreadingConfig};

const NO_CUTOFF: usize = usize::MAX;

/// Folded result of one expanded node.
#[derive(Debug, Clone, Copy)]
struct NodeOutcome {
    best_move: Option<Move>,
    score: f64,
}

pub struct NegaMax<S: BoardScorer = MaterialScorer> {
    color: Color,
    depth: u8,
    scorer: S,
    shared: Arc<SharedSearchState>,
    pool: Mutex<Option<Arc<SearchPool>>>,
}

impl NegaMax<MaterialScorer> {
    pub fn new(color: Color, depth: u8, threading: ThreadingConfig) -> Result<Self, SearchError> {
        Self::with_scorer(color, depth, threading, MaterialScorer)
    }
}

impl<S: BoardScorer> NegaMax<S> {
    pub fn with_scorer(
        color: Color,
        depth: u8,
        threading: ThreadingConfig,
        scorer: S,
    ) -> Result<Self, SearchError> {
        let pool = SearchPool::new(threading)?;
        Ok(Self {
            color,
            depth,
            scorer,
            shared: SharedSearchState::new(),
            pool: Mutex::new(Some(Arc::new(pool))),
        })
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn nodes_visited(&self) -> u64 {
        self.shared.nodes()
    }

    fn pool(&self) -> Result<Arc<SearchPool>, SearchError> {
        self.pool
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .ok_or(SearchError::PoolShutDown)
    }

    /// Search `board` for `self.color` on the owned pool. The root always
    /// expands at least one ply.
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
        let pool = self.pool()?;
        self.shared.begin_accounting();
        let moves = legal_moves(board, self.color);
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves(self.color));
        }

        let depth = self.depth.max(1);
        let outcome = pool.install(|| {
            self.shared.add_nodes(1);
            self.expand(&pool, board, history, &moves, self.color, depth, MIN_EVAL, MAX_EVAL, true)
        });

        if self.shared.should_stop() {
            return Err(SearchError::Stopped);
        }
        let best_move = outcome.best_move.ok_or(SearchError::NoLegalMoves(self.color))?;
        let result = ScoredMove::new(best_move, outcome.score);
        self.shared.commit_root_result(result);
        Ok(result)
    }

    /// Score of `board` for `side`, negated relative to its parent.
    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &self,
        pool: &SearchPool,
        board: &Board,
        history: &GameHistory,
        side: Color,
        depth: u8,
        alpha: f64,
        beta: f64,
    ) -> f64 {
        self.shared.add_nodes(1);
        if self.shared.should_stop() {
            return 0.0;
        }
        if depth == 0 || is_game_over(board, history, side) {
            let score = self.scorer.score(board, history, side, self.color);
            return if side == self.color { score } else { -score };
        }
        let moves = legal_moves(board, side);
        self.expand(pool, board, history, &moves, side, depth, alpha, beta, false)
            .score
    }

    #[allow(clippy::too_many_arguments)]
    fn child_score(
        &self,
        pool: &SearchPool,
        board: &Board,
        history: &GameHistory,
        mv: &Move,
        side: Color,
        depth: u8,
        alpha: f64,
        beta: f64,
    ) -> f64 {
        let (child, child_history) = apply_to_copies(board, history, mv);
        -self.negamax(pool, &child, &child_history, side.opposite(), depth - 1, -beta, -alpha)
    }

    #[allow(clippy::too_many_arguments)]
    fn expand(
        &self,
        pool: &SearchPool,
        board: &Board,
        history: &GameHistory,
        moves: &[Move],
        side: Color,
        depth: u8,
        alpha: f64,
        beta: f64,
        is_root: bool,
    ) -> NodeOutcome {
        let slots: Vec<OnceLock<f64>> = moves.iter().map(|_| OnceLock::new()).collect();
        let cut_at = AtomicUsize::new(NO_CUTOFF);

        rayon::scope(|scope| {
            let slots = &slots;
            let cut_at = &cut_at;
            let mut running_alpha = alpha;

            for (index, mv) in moves.iter().enumerate() {
                if self.shared.should_stop() || index > cut_at.load(Ordering::Acquire) {
                    break;
                }

                if index == 0 || !pool.should_fork() {
                    let score =
                        self.child_score(pool, board, history, mv, side, depth, running_alpha, beta);
                    let _ = slots[index].set(score);
                    if is_root {
                        self.shared.offer_root_candidate(ScoredMove::new(*mv, score));
                    }
                    running_alpha = running_alpha.max(score);
                    if running_alpha >= beta {
                        cut_at.fetch_min(index, Ordering::AcqRel);
                        break;
                    }
                    continue;
                }

                let window_alpha = running_alpha;
                pool.task_queued();
                scope.spawn(move |_| {
                    pool.task_started();
                    if index > cut_at.load(Ordering::Acquire) || self.shared.should_stop() {
                        return;
                    }
                    let score =
                        self.child_score(pool, board, history, mv, side, depth, window_alpha, beta);
                    if score >= beta {
                        cut_at.fetch_min(index, Ordering::AcqRel);
                    }
                    if is_root {
                        self.shared.offer_root_candidate(ScoredMove::new(*mv, score));
                    }
                    let _ = slots[index].set(score);
                });
            }
        });

        let mut outcome = NodeOutcome {
            best_move: None,
            score: f64::NEG_INFINITY,
        };
        let mut running_alpha = alpha;
        for (mv, slot) in moves.iter().zip(&slots) {
            let Some(&score) = slot.get() else {
                break;
            };
            if score > outcome.score {
                outcome = NodeOutcome {
                    best_move: Some(*mv),
                    score,
                };
            }
            running_alpha = running_alpha.max(score);
            if running_alpha >= beta {
                break;
            }
        }
        outcome
    }
}

impl<S: BoardScorer> Algorithm for NegaMax<S> {
    fn name(&self) -> &'static str {
        "negamax"
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

    fn shutdown_pool(&self) {
        let released = self.pool.lock().ok().and_then(|mut guard| guard.take());
        if let Some(pool) = released {
            debug!(threads = pool.threads(), "search pool shut down");
        }
    }
}
