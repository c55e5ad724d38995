//! Core value types shared by every layer of the rules engine.
//!
//! Colors, piece kinds and board coordinates are small `Copy` values. A
//! `Position` can only be constructed inside the 8x8 board, so every other
//! module may treat a `Position` as already bounds-checked.

use std::fmt;

use crate::chess_errors::NotationError;

/// Side of a piece or of the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row direction pawns of this color advance in.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Back rank holding this color's king and rooks in the initial setup.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Row a pawn of this color promotes on.
    #[inline]
    pub const fn last_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }
}

/// Piece kind, used to dispatch into the per-kind move rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lower-case symbol used by long algebraic notation.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Kinds a pawn may turn into on the last row.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// A square on the board, `column` 0..=7 (a..h) and `row` 0..=7 (1..8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    column: u8,
    row: u8,
}

impl Position {
    /// Returns `None` when either coordinate falls outside the board.
    #[inline]
    pub const fn new(column: i8, row: i8) -> Option<Self> {
        if column < 0 || column > 7 || row < 0 || row > 7 {
            return None;
        }
        Some(Self {
            column: column as u8,
            row: row as u8,
        })
    }

    #[inline]
    pub const fn column(self) -> u8 {
        self.column
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Dense `0..64` index, `a1 == 0`, `h1 == 7`, `h8 == 63`.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.column as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= 64 {
            return None;
        }
        Some(Self {
            column: (index % 8) as u8,
            row: (index / 8) as u8,
        })
    }

    /// Position shifted by the given deltas, or `None` if it leaves the board.
    #[inline]
    pub const fn offset(self, d_column: i8, d_row: i8) -> Option<Self> {
        Self::new(self.column as i8 + d_column, self.row as i8 + d_row)
    }

    /// Parse a coordinate such as `e4`.
    pub fn parse(text: &str) -> Result<Self, NotationError> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(NotationError::InvalidSquare(text.to_owned()));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(NotationError::InvalidSquare(text.to_owned()));
        }
        Ok(Self {
            column: file - b'a',
            row: rank - b'1',
        })
    }

    /// Iterates `a1, b1, .., h1, a2, .., h8`.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64).filter_map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.column),
            char::from(b'1' + self.row)
        )
    }
}

/// Signed column and row distance from `from` to `to`.
#[inline]
pub fn deltas(from: Position, to: Position) -> (i8, i8) {
    (
        to.column() as i8 - from.column() as i8,
        to.row() as i8 - from.row() as i8,
    )
}
