//! Live game session.
//!
//! `GameState` owns the board, the ply history and the side to move. It is
//! the only place that turns a requested move into a recorded ply, so the
//! board and history never disagree about what has been played.

use tracing::debug;

use crate::chess_errors::GameError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::game_history::GameHistory;
use crate::game_state::game_state_checker::{draw_reason, is_mate, DrawReason};
use crate::move_generation::legal_move_apply::perform_move;
use crate::move_generation::legal_move_generator::{is_legal_move, legal_moves};
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::parse_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    LightWins,
    DarkWins,
    Draw(DrawReason),
    Resigned { winner: Color },
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Winning colour, `None` while in progress or on a draw.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::LightWins => Some(Color::Light),
            GameStatus::DarkWins => Some(Color::Dark),
            GameStatus::Resigned { winner } => Some(winner),
            GameStatus::InProgress | GameStatus::Draw(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    initial_board: Board,
    board: Board,
    history: GameHistory,
    side_to_move: Color,
    status: GameStatus,
}

impl GameState {
    /// Start a game from `board` with `side_to_move` to play. Both kings must
    /// be present.
    pub fn new(board: Board, side_to_move: Color) -> Result<Self, GameError> {
        for color in [Color::Light, Color::Dark] {
            if board.king_position(color).is_none() {
                return Err(GameError::MissingKing(color));
            }
        }
        let mut state = Self {
            initial_board: board.clone(),
            board,
            history: GameHistory::new(),
            side_to_move,
            status: GameStatus::InProgress,
        };
        state.status = state.evaluate_status();
        Ok(state)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        legal_moves(&self.board, self.side_to_move)
    }

    /// Play `mv` for the side to move.
    pub fn make_move(&mut self, mv: Move) -> Result<GameStatus, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        let piece = self
            .board
            .get_piece(mv.from)
            .ok_or(GameError::EmptySquare(mv.from))?;
        if piece.color() != self.side_to_move {
            return Err(GameError::WrongSide {
                square: mv.from,
                owner: piece.color(),
                to_move: self.side_to_move,
            });
        }
        if !is_legal_move(&self.board, &mv) {
            return Err(GameError::IllegalMove(mv.to_string()));
        }

        let before = self.board.clone();
        perform_move(&mut self.board, &mv);
        self.history.record(&before, mv, &self.board);
        self.side_to_move = self.side_to_move.opposite();
        self.status = self.evaluate_status();
        debug!(ply = self.history.ply_count(), mv = %mv, status = ?self.status, "move played");
        Ok(self.status)
    }

    /// Parse long algebraic notation and play it.
    pub fn make_move_lan(&mut self, text: &str) -> Result<GameStatus, GameError> {
        let mv = parse_move(text)?;
        self.make_move(mv)
    }

    /// Undo the last ply, reopening the game if it had ended on the board.
    pub fn take_back(&mut self) -> Result<Move, GameError> {
        let mv = self.history.rollback().ok_or(GameError::NothingToTakeBack)?;
        self.board = self
            .history
            .last_board()
            .cloned()
            .unwrap_or_else(|| self.initial_board.clone());
        self.side_to_move = self.side_to_move.opposite();
        self.status = self.evaluate_status();
        Ok(mv)
    }

    pub fn resign(&mut self, color: Color) -> Result<GameStatus, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        self.status = GameStatus::Resigned {
            winner: color.opposite(),
        };
        Ok(self.status)
    }

    fn evaluate_status(&self) -> GameStatus {
        if is_mate(&self.board, Color::Light) {
            return GameStatus::DarkWins;
        }
        if is_mate(&self.board, Color::Dark) {
            return GameStatus::LightWins;
        }
        match draw_reason(&self.board, &self.history, self.side_to_move) {
            Some(reason) => GameStatus::Draw(reason),
            None => GameStatus::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::NotationError;
    use crate::game_state::board_setup::default_board;
    use crate::utils::fen_parser::parse_fen;

    fn new_game() -> GameState {
        GameState::new(default_board(), Color::Light).expect("default board has both kings")
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = new_game();
        for text in ["f2f3", "e7e5", "g2g4"] {
            assert_eq!(
                game.make_move_lan(text).expect("opening move is legal"),
                GameStatus::InProgress
            );
        }
        assert_eq!(
            game.make_move_lan("d8h4").expect("mating move is legal"),
            GameStatus::DarkWins
        );
        assert_eq!(game.status().winner(), Some(Color::Dark));
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.make_move_lan("a2a3"), Err(GameError::GameOver));
    }

    #[test]
    fn rejects_wrong_side_empty_square_and_illegal_moves() {
        let mut game = new_game();
        assert!(matches!(
            game.make_move_lan("e7e5"),
            Err(GameError::WrongSide { .. })
        ));
        assert!(matches!(
            game.make_move_lan("e4e5"),
            Err(GameError::EmptySquare(_))
        ));
        assert_eq!(
            game.make_move_lan("e2e5"),
            Err(GameError::IllegalMove("e2e5".to_owned()))
        );
        assert_eq!(
            game.make_move_lan("e2"),
            Err(GameError::Notation(NotationError::InvalidLength("e2".to_owned())))
        );
        assert!(game.history().is_empty());
    }

    #[test]
    fn take_back_restores_previous_position() {
        let mut game = new_game();
        game.make_move_lan("e2e4").expect("legal");
        game.make_move_lan("e7e5").expect("legal");
        let after_two = game.board().clone();
        game.make_move_lan("g1f3").expect("legal");

        let undone = game.take_back().expect("one ply to take back");
        assert_eq!(undone.to_string(), "g1f3");
        assert_eq!(game.board(), &after_two);
        assert_eq!(game.side_to_move(), Color::Light);

        game.take_back().expect("second ply");
        game.take_back().expect("first ply");
        assert_eq!(game.board(), &default_board());
        assert_eq!(game.take_back(), Err(GameError::NothingToTakeBack));
    }

    #[test]
    fn resignation_and_missing_kings() {
        let mut game = new_game();
        assert_eq!(
            game.resign(Color::Light),
            Ok(GameStatus::Resigned {
                winner: Color::Dark
            })
        );
        assert_eq!(game.resign(Color::Dark), Err(GameError::GameOver));

        let (no_dark_king, _) = parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            GameState::new(no_dark_king, Color::Light).err(),
            Some(GameError::MissingKing(Color::Dark))
        );
    }

    #[test]
    fn lone_kings_start_as_a_draw() {
        let (board, side) = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let game = GameState::new(board, side).expect("both kings present");
        assert_eq!(
            game.status(),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
    }
}
