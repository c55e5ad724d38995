//! Initial piece arrangements: the classic setup and a randomized
//! Fischer-style back rank.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::game_state::piece::Piece;

pub const CLASSIC_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Which arrangement a new game starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupKind {
    #[default]
    Classic,
    Fischer,
}

pub fn default_board() -> Board {
    board_from_back_rank(&CLASSIC_BACK_RANK)
}

/// Randomized back rank: bishops on opposite square colours, king between
/// the rooks, mirrored for both sides.
pub fn fischer_board<R: Rng + ?Sized>(rng: &mut R) -> Board {
    board_from_back_rank(&fischer_back_rank(rng))
}

pub fn fischer_back_rank<R: Rng + ?Sized>(rng: &mut R) -> [PieceKind; 8] {
    let mut rank = [None; 8];
    let dark_bishop = rng.random_range(0..4usize) * 2;
    let light_bishop = rng.random_range(0..4usize) * 2 + 1;
    rank[dark_bishop] = Some(PieceKind::Bishop);
    rank[light_bishop] = Some(PieceKind::Bishop);

    let mut free: Vec<usize> = (0..8).filter(|&column| rank[column].is_none()).collect();
    free.shuffle(rng);
    for kind in [PieceKind::Queen, PieceKind::Knight, PieceKind::Knight] {
        if let Some(column) = free.pop() {
            rank[column] = Some(kind);
        }
    }

    free.sort_unstable();
    for (column, kind) in free
        .into_iter()
        .zip([PieceKind::Rook, PieceKind::King, PieceKind::Rook])
    {
        rank[column] = Some(kind);
    }

    let mut out = CLASSIC_BACK_RANK;
    for (slot, kind) in out.iter_mut().zip(rank) {
        if let Some(kind) = kind {
            *slot = kind;
        }
    }
    out
}

pub fn setup_board<R: Rng + ?Sized>(setup: SetupKind, rng: &mut R) -> Board {
    match setup {
        SetupKind::Classic => default_board(),
        SetupKind::Fischer => fischer_board(rng),
    }
}

fn board_from_back_rank(back_rank: &[PieceKind; 8]) -> Board {
    let mut board = Board::empty();
    for color in [Color::Light, Color::Dark] {
        let home = color.home_row() as i8;
        let pawn_row = home + color.forward();
        for (column, &kind) in back_rank.iter().enumerate() {
            let column = column as i8;
            if let Some(square) = Position::new(column, home) {
                board.set_piece(square, Piece::new(kind, color));
            }
            if let Some(square) = Position::new(column, pawn_row) {
                board.set_piece(square, Piece::new(PieceKind::Pawn, color));
            }
        }
    }
    board
}
