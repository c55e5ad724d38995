//! Move value type.
//!
//! A move is only its origin, destination and optional promotion kind.
//! Capture, castling and en passant are derived from the board when the
//! move is validated or applied.

use std::fmt;

use crate::game_state::chess_types::{deltas, PieceKind, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Position, to: Position, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Move from `from` shifted by the deltas, if the target is on the board.
    #[inline]
    pub fn by_deltas(from: Position, d_column: i8, d_row: i8) -> Option<Self> {
        from.offset(d_column, d_row).map(|to| Self::new(from, to))
    }

    #[inline]
    pub fn deltas(self) -> (i8, i8) {
        deltas(self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}
