//! Ply log of a game with one board snapshot per ply.
//!
//! Moves and snapshots always have the same length; `rollback` pops both
//! together and restores the draw counter it had before the popped ply.

use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceKind;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Default)]
pub struct GameHistory {
    moves: Vec<Move>,
    boards: Vec<Board>,
    quiet_counters: Vec<u32>,
    moves_without_capture_or_pawn_advance: u32,
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one ply. `before` is the board the move was played on and
    /// `after` the resulting board, which is stored as the ply's snapshot.
    pub fn record(&mut self, before: &Board, mv: Move, after: &Board) {
        let pawn_move = before
            .get_piece(mv.from)
            .is_some_and(|piece| piece.kind() == PieceKind::Pawn);
        let capture = before.has_piece(mv.to)
            || after.count_pieces() < before.count_pieces();

        self.quiet_counters
            .push(self.moves_without_capture_or_pawn_advance);
        self.moves_without_capture_or_pawn_advance = if pawn_move || capture || mv.promotion.is_some() {
            0
        } else {
            self.moves_without_capture_or_pawn_advance + 1
        };
        self.moves.push(mv);
        self.boards.push(after.clone());
    }

    /// Drop the last ply, returning its move.
    pub fn rollback(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        self.boards.pop();
        self.moves_without_capture_or_pawn_advance = self.quiet_counters.pop().unwrap_or(0);
        Some(mv)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    #[inline]
    pub fn last_board(&self) -> Option<&Board> {
        self.boards.last()
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn moves_without_capture_or_pawn_advance(&self) -> u32 {
        self.moves_without_capture_or_pawn_advance
    }

    /// Number of snapshots showing the same position as `board`.
    pub fn max_repeat_position(&self, board: &Board) -> usize {
        self.boards
            .iter()
            .filter(|snapshot| snapshot.same_position(board))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Position;
    use crate::move_generation::legal_move_apply::board_after;
    use crate::utils::fen_parser::parse_fen_board;

    fn mv(from: &str, to: &str) -> Move {
        Move::new(
            Position::parse(from).expect("test square should parse"),
            Position::parse(to).expect("test square should parse"),
        )
    }

    fn play(history: &mut GameHistory, board: &mut Board, moves: &[Move]) {
        for m in moves {
            let next = board_after(board, m);
            history.record(board, *m, &next);
            *board = next;
        }
    }

    #[test]
    fn counter_resets_on_pawn_moves_and_captures() {
        let mut board = parse_fen_board("4k3/8/8/3p4/8/8/4P3/R3K2N w - - 0 1")
            .expect("FEN should parse");
        let mut history = GameHistory::new();
        play(&mut history, &mut board, &[mv("h1", "g3"), mv("e8", "d8")]);
        assert_eq!(history.moves_without_capture_or_pawn_advance(), 2);

        play(&mut history, &mut board, &[mv("e2", "e4")]);
        assert_eq!(history.moves_without_capture_or_pawn_advance(), 0);

        play(&mut history, &mut board, &[mv("d8", "e8"), mv("e4", "d5")]);
        assert_eq!(history.moves_without_capture_or_pawn_advance(), 0);
        play(&mut history, &mut board, &[mv("e8", "d8"), mv("a1", "a7")]);
        assert_eq!(history.moves_without_capture_or_pawn_advance(), 2);
        assert_eq!(history.ply_count(), 7);
    }

    #[test]
    fn rollback_pops_moves_snapshots_and_counter_together() {
        let mut board = parse_fen_board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let mut history = GameHistory::new();
        play(&mut history, &mut board, &[mv("a1", "a2"), mv("e8", "e7")]);
        assert_eq!(history.moves_without_capture_or_pawn_advance(), 2);

        assert_eq!(history.rollback(), Some(mv("e8", "e7")));
        assert_eq!(history.moves_without_capture_or_pawn_advance(), 1);
        assert_eq!(history.last_move(), Some(mv("a1", "a2")));
        assert_eq!(history.moves().len(), 1);
        assert!(history.last_board().is_some());

        assert!(history.rollback().is_some());
        assert!(history.is_empty());
        assert!(history.rollback().is_none());
    }

    #[test]
    fn repeated_positions_are_counted() {
        let mut board = parse_fen_board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let mut history = GameHistory::new();
        let shuffle = [mv("a1", "a2"), mv("e8", "e7"), mv("a2", "a1"), mv("e7", "e8")];
        play(&mut history, &mut board, &shuffle);
        assert_eq!(history.max_repeat_position(&board), 1);
        play(&mut history, &mut board, &shuffle);
        assert_eq!(history.max_repeat_position(&board), 2);
    }
}
