//! Pieces as plain tagged values.
//!
//! A piece is its kind, its colour and whether it has moved. The moved flag
//! gates castling and the pawn double step; everything else about a piece's
//! behaviour lives in the per-kind rules under `moves`.

use crate::game_state::chess_types::{Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            moved: false,
        }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    #[inline]
    pub const fn moved(self) -> bool {
        self.moved
    }

    #[inline]
    pub const fn with_moved(self, moved: bool) -> Self {
        Self {
            kind: self.kind,
            color: self.color,
            moved,
        }
    }

    /// Same colour, new kind. Used for promotion; the result counts as moved.
    #[inline]
    pub const fn promoted_to(self, kind: PieceKind) -> Self {
        Self {
            kind,
            color: self.color,
            moved: true,
        }
    }

    /// Kind and colour match; the moved flag is ignored.
    #[inline]
    pub fn same_figure(self, other: Piece) -> bool {
        self.kind == other.kind && self.color == other.color
    }

    /// Unicode figurine for terminal rendering.
    pub const fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::Light, PieceKind::Pawn) => '♙',
            (Color::Light, PieceKind::Knight) => '♘',
            (Color::Light, PieceKind::Bishop) => '♗',
            (Color::Light, PieceKind::Rook) => '♖',
            (Color::Light, PieceKind::Queen) => '♕',
            (Color::Light, PieceKind::King) => '♔',
            (Color::Dark, PieceKind::Pawn) => '♟',
            (Color::Dark, PieceKind::Knight) => '♞',
            (Color::Dark, PieceKind::Bishop) => '♝',
            (Color::Dark, PieceKind::Rook) => '♜',
            (Color::Dark, PieceKind::Queen) => '♛',
            (Color::Dark, PieceKind::King) => '♚',
        }
    }

    /// FEN letter, upper case for Light.
    pub fn fen_char(self) -> char {
        let symbol = self.kind.symbol();
        match self.color {
            Color::Light => symbol.to_ascii_uppercase(),
            Color::Dark => symbol,
        }
    }
}
