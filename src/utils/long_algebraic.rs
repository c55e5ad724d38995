//! Long algebraic move notation: `<from><to>[promotion]`, e.g. `e2e4`, `e7e8q`.
//!
//! Parsing is purely syntactic. Whether the move is playable is decided by
//! the rules engine, so a well-formed but illegal move parses fine here.

use crate::chess_errors::NotationError;
use crate::game_state::chess_types::{PieceKind, Position};
use crate::moves::move_descriptions::Move;

pub fn parse_move(text: &str) -> Result<Move, NotationError> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(NotationError::InvalidLength(text.to_owned()));
    }

    let from = Position::parse(&text[0..2])?;
    let to = Position::parse(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(symbol) => Some(promotion_from_char(symbol)?),
    };

    Ok(Move {
        from,
        to,
        promotion,
    })
}

/// Comma separated list, e.g. `e2e4,e7e5,g1f3`. Whitespace around moves is
/// ignored; an empty input yields an empty list.
pub fn parse_moves(text: &str) -> Result<Vec<Move>, NotationError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(index, token)| {
            if token.trim().is_empty() {
                Err(NotationError::EmptyMove(index))
            } else {
                parse_move(token)
            }
        })
        .collect()
}

#[inline]
pub fn move_to_long_algebraic(mv: &Move) -> String {
    mv.to_string()
}

pub fn moves_to_long_algebraic(moves: &[Move]) -> String {
    moves
        .iter()
        .map(move_to_long_algebraic)
        .collect::<Vec<_>>()
        .join(",")
}

fn promotion_from_char(symbol: char) -> Result<PieceKind, NotationError> {
    PieceKind::from_symbol(symbol)
        .filter(|kind| kind.is_promotion_target())
        .ok_or(NotationError::InvalidPromotion(symbol))
}
