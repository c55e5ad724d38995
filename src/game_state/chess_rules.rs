//! Canonical chess-rule constants.
//!
//! Reference positions used to initialize games and validate the rules
//! engine, plus the limits behind the automatic draw rules.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling-heavy middlegame commonly used for perft validation.
pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Rook-and-pawn endgame exercising en passant and discovered checks.
pub const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

/// Half-moves without a capture or pawn move after which the game is drawn.
pub const SEVENTY_FIVE_MOVE_LIMIT: u32 = 75;

/// Occurrences of the same position that make the game drawn.
pub const REPETITION_LIMIT: usize = 3;
