//! Threading primitives for the parallel search.
//!
//! `ThreadingConfig` is the engine-owned configuration, `SearchPool` the
//! explicitly owned rayon pool plus its fork policy, and `SharedSearchState`
//! the cross-thread stop flag, node counter and anytime best move.

use std::fmt;
use std::str::FromStr;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Instant;

use tracing::{debug, info};

use crate::chess_errors::SearchError;
use crate::search::scored_move::ScoredMove;

/// When a node may hand a non-first child to the pool instead of searching
/// it inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForkPolicy {
    /// Fork only while no forked task is waiting to start.
    #[default]
    WhenPoolIdle,
    /// Fork every non-first child.
    Always,
    /// Never fork; the search runs sequentially on one worker.
    Never,
}

impl FromStr for ForkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" | "when-idle" | "when_pool_idle" => Ok(ForkPolicy::WhenPoolIdle),
            "always" => Ok(ForkPolicy::Always),
            "never" => Ok(ForkPolicy::Never),
            other => Err(format!("unknown fork policy `{other}`")),
        }
    }
}

/// Threading configuration owned by the engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub requested_threads: usize,
    pub fork_policy: ForkPolicy,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            requested_threads: 2,
            fork_policy: ForkPolicy::WhenPoolIdle,
        }
    }
}

impl ThreadingConfig {
    #[inline]
    pub fn normalized_threads(self) -> usize {
        self.requested_threads.max(1)
    }

    #[inline]
    pub fn with_threads(self, requested_threads: usize) -> Self {
        Self {
            requested_threads,
            ..self
        }
    }

    #[inline]
    pub fn with_fork_policy(self, fork_policy: ForkPolicy) -> Self {
        Self {
            fork_policy,
            ..self
        }
    }
}

/// Work-stealing pool owned by one algorithm instance.
///
/// rayon does not expose a pool-wide queue length, so forked tasks that have
/// been spawned but not yet started are counted here.
pub struct SearchPool {
    pool: rayon::ThreadPool,
    queued: AtomicUsize,
    fork_policy: ForkPolicy,
}

impl fmt::Debug for SearchPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchPool")
            .field("threads", &self.pool.current_num_threads())
            .field("queued", &self.queued.load(Ordering::Relaxed))
            .field("fork_policy", &self.fork_policy)
            .finish()
    }
}

impl SearchPool {
    pub fn new(config: ThreadingConfig) -> Result<Self, SearchError> {
        let threads = config.normalized_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("arbiter-search-{index}"))
            .build()
            .map_err(|err| SearchError::PoolBuild(err.to_string()))?;
        debug!(threads, fork_policy = ?config.fork_policy, "search pool created");
        Ok(Self {
            pool,
            queued: AtomicUsize::new(0),
            fork_policy: config.fork_policy,
        })
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[inline]
    pub fn fork_policy(&self) -> ForkPolicy {
        self.fork_policy
    }

    #[inline]
    pub fn queued_tasks(&self) -> usize {
        self.queued.load(Ordering::Acquire)
    }

    /// Whether the next non-first child should be forked.
    #[inline]
    pub fn should_fork(&self) -> bool {
        match self.fork_policy {
            ForkPolicy::WhenPoolIdle => self.queued_tasks() == 0,
            ForkPolicy::Always => true,
            ForkPolicy::Never => false,
        }
    }

    #[inline]
    pub(crate) fn task_queued(&self) {
        self.queued.fetch_add(1, Ordering::AcqRel);
    }

    #[inline]
    pub(crate) fn task_started(&self) {
        self.queued.fetch_sub(1, Ordering::AcqRel);
    }

    /// Run `op` on one of the pool's workers and wait for it.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }
}

/// Shared cancellation, accounting and anytime-result state.
#[derive(Debug, Default)]
pub struct SharedSearchState {
    stop: AtomicBool,
    pub nodes_visited: AtomicU64,
    best: Mutex<Option<ScoredMove>>,
    started_at: Mutex<Option<Instant>>,
}

impl SharedSearchState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn add_nodes(&self, n: u64) {
        self.nodes_visited.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }

    /// Clear a pending stop, then the accounting. Callers that may stop the
    /// search from another thread run this before handing the search off.
    pub fn begin_search(&self) {
        self.stop.store(false, Ordering::Relaxed);
        self.begin_accounting();
    }

    /// Clear node count and anytime move at the start of a search. A stop
    /// that is already pending stays set.
    pub fn begin_accounting(&self) {
        self.nodes_visited.store(0, Ordering::Relaxed);
        if let Ok(mut guard) = self.best.lock() {
            *guard = None;
        }
        if let Ok(mut guard) = self.started_at.lock() {
            *guard = Some(Instant::now());
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started_at
            .lock()
            .ok()
            .and_then(|guard| *guard)
            .map_or(0, |started| started.elapsed().as_millis())
    }

    /// Replace the anytime best if `candidate` scores strictly higher, or if
    /// nothing has been committed yet. Ignored once a stop was requested.
    pub fn offer_root_candidate(&self, candidate: ScoredMove) {
        if self.should_stop() {
            return;
        }
        if let Ok(mut guard) = self.best.lock() {
            let improves = guard.map_or(true, |current| candidate.score > current.score);
            if improves {
                *guard = Some(candidate);
            }
        }
    }

    /// Overwrite the anytime best with the finished root result.
    pub fn commit_root_result(&self, result: ScoredMove) {
        if self.should_stop() {
            return;
        }
        if let Ok(mut guard) = self.best.lock() {
            *guard = Some(result);
        }
        info!(
            best = %result.mv,
            score = result.score,
            nodes = self.nodes(),
            elapsed_ms = self.elapsed_ms() as u64,
            "search finished"
        );
    }

    pub fn best(&self) -> Option<ScoredMove> {
        self.best.lock().ok().and_then(|guard| *guard)
    }
}
