//! Mailbox board with a cached king location per colour.
//!
//! `Board` is a pure data structure: it stores at most one piece per square,
//! the last move applied and the king cache. It performs no legality checks.
//! The king cache is only written by `set_piece` and `remove_piece`, so it can
//! never drift from the squares array as long as callers go through them.

use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::game_state::piece::Piece;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    kings: [Option<Position>; 2],
    last_move: Option<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
            kings: [None; 2],
            last_move: None,
        }
    }

    /// Place `piece` on `position`, overwriting any occupant.
    pub fn set_piece(&mut self, position: Position, piece: Piece) {
        if let Some(previous) = self.squares[position.index()] {
            if previous.kind() == PieceKind::King
                && self.kings[previous.color().index()] == Some(position)
            {
                self.kings[previous.color().index()] = None;
            }
        }
        if piece.kind() == PieceKind::King {
            self.kings[piece.color().index()] = Some(position);
        }
        self.squares[position.index()] = Some(piece);
    }

    /// Clear `position`, returning whatever stood there.
    pub fn remove_piece(&mut self, position: Position) -> Option<Piece> {
        let removed = self.squares[position.index()].take();
        if let Some(piece) = removed {
            if piece.kind() == PieceKind::King
                && self.kings[piece.color().index()] == Some(position)
            {
                self.kings[piece.color().index()] = None;
            }
        }
        removed
    }

    #[inline]
    pub fn get_piece(&self, position: Position) -> Option<Piece> {
        self.squares[position.index()]
    }

    #[inline]
    pub fn has_piece(&self, position: Position) -> bool {
        self.squares[position.index()].is_some()
    }

    /// Squares holding `color`'s pieces, in `a1..h8` order.
    pub fn piece_positions_by_color(&self, color: Color) -> Vec<Position> {
        Position::all()
            .filter(|position| {
                self.squares[position.index()].is_some_and(|piece| piece.color() == color)
            })
            .collect()
    }

    /// Every occupied square with its piece, in `a1..h8` order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|position| {
            self.squares[position.index()].map(|piece| (position, piece))
        })
    }

    #[inline]
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.kings[color.index()]
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[inline]
    pub fn set_last_move(&mut self, mv: Option<Move>) {
        self.last_move = mv;
    }

    /// Colour to move, derived from whoever owns the piece that moved last.
    ///
    /// Light when no move has been played yet.
    pub fn side_to_move(&self) -> Color {
        self.last_move
            .and_then(|mv| self.get_piece(mv.to))
            .map_or(Color::Light, |piece| piece.color().opposite())
    }

    /// Same figure on every square. Moved flags and last move are ignored.
    pub fn same_position(&self, other: &Board) -> bool {
        self.squares
            .iter()
            .zip(other.squares.iter())
            .all(|(lhs, rhs)| match (lhs, rhs) {
                (None, None) => true,
                (Some(a), Some(b)) => a.same_figure(*b),
                _ => false,
            })
    }

    pub fn count_pieces(&self) -> usize {
        self.squares.iter().filter(|square| square.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Position {
        Position::parse(text).expect("test square should parse")
    }

    #[test]
    fn king_cache_follows_set_and_remove() {
        let mut board = Board::empty();
        let king = Piece::new(PieceKind::King, Color::Light);
        board.set_piece(sq("e1"), king);
        assert_eq!(board.king_position(Color::Light), Some(sq("e1")));

        let removed = board.remove_piece(sq("e1"));
        assert_eq!(removed, Some(king));
        assert_eq!(board.king_position(Color::Light), None);
        assert!(board.remove_piece(sq("e1")).is_none());
    }

    #[test]
    fn overwriting_a_king_clears_its_cache() {
        let mut board = Board::empty();
        board.set_piece(sq("e8"), Piece::new(PieceKind::King, Color::Dark));
        board.set_piece(sq("e8"), Piece::new(PieceKind::Queen, Color::Light));
        assert_eq!(board.king_position(Color::Dark), None);
        assert_eq!(
            board.get_piece(sq("e8")).map(Piece::kind),
            Some(PieceKind::Queen)
        );
    }

    #[test]
    fn positions_by_color_are_in_board_order() {
        let mut board = Board::empty();
        board.set_piece(sq("h8"), Piece::new(PieceKind::Rook, Color::Dark));
        board.set_piece(sq("a1"), Piece::new(PieceKind::Rook, Color::Dark));
        board.set_piece(sq("d4"), Piece::new(PieceKind::Knight, Color::Light));
        assert_eq!(
            board.piece_positions_by_color(Color::Dark),
            vec![sq("a1"), sq("h8")]
        );
        assert_eq!(board.count_pieces(), 3);
    }

    #[test]
    fn same_position_ignores_moved_flags() {
        let mut a = Board::empty();
        let mut b = Board::empty();
        a.set_piece(sq("a1"), Piece::new(PieceKind::Rook, Color::Light));
        b.set_piece(sq("a1"), Piece::new(PieceKind::Rook, Color::Light).with_moved(true));
        assert!(a.same_position(&b));
        assert_ne!(a, b);
        b.set_piece(sq("a2"), Piece::new(PieceKind::Pawn, Color::Light));
        assert!(!a.same_position(&b));
    }

    #[test]
    fn side_to_move_follows_last_mover() {
        let mut board = Board::empty();
        assert_eq!(board.side_to_move(), Color::Light);
        board.set_piece(sq("e4"), Piece::new(PieceKind::Pawn, Color::Light));
        board.set_last_move(Some(Move::new(sq("e2"), sq("e4"))));
        assert_eq!(board.side_to_move(), Color::Dark);
    }
}
