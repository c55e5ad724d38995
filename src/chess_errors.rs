//! Errors used throughout the rules engine and the search layer.
//!
//! Illegal moves on the hot path are reported with plain `bool` results by
//! the piece rules and the move applier. The enums below cover the
//! boundaries instead: text that cannot be decoded into a move or position,
//! session-level requests that the current game cannot accept, and search
//! invocations that cannot produce a move.
//!
//! Usage guidelines:
//! - `NotationError` means the input was malformed. It is always safe to show
//!   to an end user and ask again.
//! - `GameError` means the input was well formed but not playable in the
//!   current game (empty origin square, wrong side, leaves the king in check).
//! - `SearchError` is returned by the `Algorithm` facade. `NoLegalMoves` is a
//!   caller error, the position should have been checked for mate/stalemate
//!   before a search was started.
//! - `MatchError` wraps both for the self-play harness.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Position};

/// Malformed move, square or FEN text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// Long algebraic moves are four characters, or five with a promotion.
    #[error("invalid move length in `{0}`, expected 4 or 5 characters")]
    InvalidLength(String),

    /// A square token outside `a1..h8`.
    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    /// Promotion symbol other than `n`, `b`, `r` or `q`.
    #[error("invalid promotion piece `{0}`")]
    InvalidPromotion(char),

    /// Empty token inside a comma separated move list.
    #[error("empty move at index {0} of move list")]
    EmptyMove(usize),

    /// Unknown character in the piece placement field of a FEN string.
    #[error("invalid FEN token `{0}`")]
    InvalidFenToken(char),

    /// FEN string with the wrong number of fields or ranks.
    #[error("malformed FEN string `{0}`")]
    InvalidFenForm(String),
}

/// Well-formed request that the current game cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("no piece on {0}")]
    EmptySquare(Position),

    #[error("piece on {square} belongs to {owner:?}, but {to_move:?} is to move")]
    WrongSide {
        square: Position,
        owner: Color,
        to_move: Color,
    },

    /// Structurally valid move that the position does not allow.
    #[error("illegal move `{0}`")]
    IllegalMove(String),

    #[error("the game is already over")]
    GameOver,

    #[error("board has no {0:?} king")]
    MissingKing(Color),

    #[error("there is no move to take back")]
    NothingToTakeBack,
}

/// Failure of a search invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The searching colour has no legal move; check mate/stalemate first.
    #[error("{0:?} has no legal moves")]
    NoLegalMoves(Color),

    #[error("search worker pool has been shut down")]
    PoolShutDown,

    #[error("failed to build search worker pool: {0}")]
    PoolBuild(String),

    /// Stop was requested before the root could commit a result.
    #[error("search was stopped before completion")]
    Stopped,

    /// The timed search ran out of budget before any root move was committed.
    #[error("no best move has been committed yet")]
    NoBestMoveYet,

    #[error("search worker panicked")]
    WorkerPanicked,
}

/// Failure while driving a self-play match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Search(#[from] SearchError),

    /// An algorithm was seated on the side it does not play for.
    #[error("{name} plays {plays:?} but was seated as {seat:?}")]
    WrongSeat {
        name: &'static str,
        plays: Color,
        seat: Color,
    },
}
