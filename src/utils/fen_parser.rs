//! FEN-to-Board parser.
//!
//! The board keeps no castling-rights or en-passant fields of its own, so
//! those FEN fields are folded into piece state: castling rights become the
//! moved flags of kings and corner rooks, and an en-passant target becomes the
//! board's last move (the double step that created it). Pawns standing off
//! their starting row are marked as moved. Clock fields are optional.

use crate::chess_errors::NotationError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::game_state::piece::Piece;
use crate::moves::move_descriptions::Move;

/// Parse a FEN string into a board and the side to move.
pub fn parse_fen(fen: &str) -> Result<(Board, Color), NotationError> {
    let malformed = || NotationError::InvalidFenForm(fen.to_owned());
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&fields.len()) {
        return Err(malformed());
    }

    let mut board = Board::empty();
    parse_placement(fields[0], &mut board, fen)?;
    let side_to_move = parse_side_to_move(fields[1]).ok_or_else(malformed)?;
    apply_castling_rights(fields[2], &mut board, fen)?;
    apply_en_passant_target(fields[3], side_to_move, &mut board)?;
    for clock in &fields[4..] {
        clock.parse::<u32>().map_err(|_| malformed())?;
    }

    Ok((board, side_to_move))
}

/// Board-only shorthand for [`parse_fen`].
pub fn parse_fen_board(fen: &str) -> Result<Board, NotationError> {
    parse_fen(fen).map(|(board, _)| board)
}

fn parse_placement(placement: &str, board: &mut Board, fen: &str) -> Result<(), NotationError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(NotationError::InvalidFenForm(fen.to_owned()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 7 - fen_rank_idx as i8;
        let mut column = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(NotationError::InvalidFenToken(ch));
                }
                column += empty_count as i8;
                if column > 8 {
                    return Err(NotationError::InvalidFenForm(fen.to_owned()));
                }
                continue;
            }

            let kind = PieceKind::from_symbol(ch).ok_or(NotationError::InvalidFenToken(ch))?;
            let color = if ch.is_ascii_uppercase() {
                Color::Light
            } else {
                Color::Dark
            };
            let position = Position::new(column, row)
                .ok_or_else(|| NotationError::InvalidFenForm(fen.to_owned()))?;

            let mut piece = Piece::new(kind, color);
            if kind == PieceKind::Pawn {
                let start_row = color.home_row() as i8 + color.forward();
                piece = piece.with_moved(row != start_row);
            } else if matches!(kind, PieceKind::King | PieceKind::Rook) {
                // Cleared again below for each castling right the FEN grants.
                piece = piece.with_moved(true);
            }
            board.set_piece(position, piece);
            column += 1;
        }

        if column != 8 {
            return Err(NotationError::InvalidFenForm(fen.to_owned()));
        }
    }

    Ok(())
}

fn parse_side_to_move(field: &str) -> Option<Color> {
    match field {
        "w" => Some(Color::Light),
        "b" => Some(Color::Dark),
        _ => None,
    }
}

fn apply_castling_rights(field: &str, board: &mut Board, fen: &str) -> Result<(), NotationError> {
    if field == "-" {
        return Ok(());
    }
    for ch in field.chars() {
        let (color, rook_column) = match ch {
            'K' => (Color::Light, 7),
            'Q' => (Color::Light, 0),
            'k' => (Color::Dark, 7),
            'q' => (Color::Dark, 0),
            _ => return Err(NotationError::InvalidFenToken(ch)),
        };
        let row = color.home_row() as i8;
        let rook_square = Position::new(rook_column, row)
            .ok_or_else(|| NotationError::InvalidFenForm(fen.to_owned()))?;
        let king_square = board
            .king_position(color)
            .filter(|square| square.row() == color.home_row())
            .ok_or_else(|| NotationError::InvalidFenForm(fen.to_owned()))?;

        let rook = board
            .get_piece(rook_square)
            .filter(|piece| piece.kind() == PieceKind::Rook && piece.color() == color)
            .ok_or_else(|| NotationError::InvalidFenForm(fen.to_owned()))?;
        board.set_piece(rook_square, rook.with_moved(false));
        if let Some(king) = board.get_piece(king_square) {
            board.set_piece(king_square, king.with_moved(false));
        }
    }
    Ok(())
}

fn apply_en_passant_target(
    field: &str,
    side_to_move: Color,
    board: &mut Board,
) -> Result<(), NotationError> {
    if field == "-" {
        return Ok(());
    }
    let target = Position::parse(field)?;
    let mover = side_to_move.opposite();
    let from = target.offset(0, -mover.forward());
    let to = target.offset(0, mover.forward());
    match (from, to) {
        (Some(from), Some(to))
            if board
                .get_piece(to)
                .is_some_and(|piece| piece.kind() == PieceKind::Pawn && piece.color() == mover) =>
        {
            board.set_last_move(Some(Move::new(from, to)));
            Ok(())
        }
        _ => Err(NotationError::InvalidSquare(field.to_owned())),
    }
}
