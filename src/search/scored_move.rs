use std::fmt;

use crate::moves::move_descriptions::Move;

/// A move together with the score the search assigned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
}

impl ScoredMove {
    #[inline]
    pub const fn new(mv: Move, score: f64) -> Self {
        Self { mv, score }
    }
}

impl fmt::Display for ScoredMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:+.9})", self.mv, self.score)
    }
}
