//! Perft: exhaustive legal-move tree counts for validating the rules engine.

use rayon::prelude::*;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_apply::perform_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count only.
pub fn perft(board: &Board, color: Color, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(board, color);
    if depth == 1 {
        return moves.len();
    }
    moves
        .iter()
        .map(|mv| {
            let mut next = board.clone();
            perform_move(&mut next, mv);
            perft(&next, color.opposite(), depth - 1)
        })
        .sum()
}

/// Leaf count with root moves split across the rayon global pool.
pub fn perft_parallel(board: &Board, color: Color, depth: u8) -> usize {
    if depth <= 1 {
        return perft(board, color, depth);
    }
    legal_moves(board, color)
        .par_iter()
        .map(|mv| {
            let mut next = board.clone();
            perform_move(&mut next, mv);
            perft(&next, color.opposite(), depth - 1)
        })
        .sum()
}

/// Leaf count per root move, in generation order.
pub fn divide(board: &Board, color: Color, depth: u8) -> Vec<(Move, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    legal_moves(board, color)
        .into_iter()
        .map(|mv| {
            let mut next = board.clone();
            perform_move(&mut next, &mv);
            (mv, perft(&next, color.opposite(), depth - 1))
        })
        .collect()
}

/// Leaf count with per-leaf move statistics.
pub fn perft_detailed(board: &Board, color: Color, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    for mv in legal_moves(board, color) {
        let mut next = board.clone();
        let effects = perform_move(&mut next, &mv);
        if depth > 1 {
            counts.merge(perft_detailed(&next, color.opposite(), depth - 1));
            continue;
        }
        counts.nodes += 1;
        if effects.captured.is_some() {
            counts.captures += 1;
        }
        if effects.en_passant {
            counts.en_passant += 1;
        }
        if effects.castled {
            counts.castles += 1;
        }
        if mv.promotion.is_some() {
            counts.promotions += 1;
        }
        if is_king_in_check(&next, color.opposite()) {
            counts.checks += 1;
            if !has_legal_move(&next, color.opposite()) {
                counts.checkmates += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{KIWIPETE_FEN, POSITION_3_FEN, STARTING_POSITION_FEN};
    use crate::utils::fen_parser::parse_fen;

    fn load(fen: &str) -> (Board, Color) {
        parse_fen(fen).expect("reference FEN should parse")
    }

    #[test]
    fn start_position_reference_counts() {
        let (board, color) = load(STARTING_POSITION_FEN);
        assert_eq!(perft(&board, color, 1), 20);
        assert_eq!(perft(&board, color, 2), 400);
        assert_eq!(perft(&board, color, 3), 8902);
    }

    #[test]
    fn start_position_depth_three_statistics() {
        let (board, color) = load(STARTING_POSITION_FEN);
        let counts = perft_detailed(&board, color, 3);
        assert_eq!(counts.nodes, 8902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.checkmates, 0);
    }

    #[test]
    fn kiwipete_reference_counts() {
        let (board, color) = load(KIWIPETE_FEN);
        let depth_one = perft_detailed(&board, color, 1);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = perft_detailed(&board, color, 2);
        assert_eq!(depth_two.nodes, 2039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
        assert_eq!(depth_two.checks, 3);
    }

    #[test]
    fn position_three_reference_counts() {
        let (board, color) = load(POSITION_3_FEN);
        assert_eq!(perft(&board, color, 1), 14);
        assert_eq!(perft(&board, color, 2), 191);
        assert_eq!(perft_parallel(&board, color, 3), 2812);
    }

    #[test]
    fn divide_sums_to_perft() {
        let (board, color) = load(KIWIPETE_FEN);
        let split = divide(&board, color, 2);
        assert_eq!(split.len(), 48);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<usize>(), 2039);
    }
}
