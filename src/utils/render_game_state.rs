//! Terminal-oriented Unicode board renderer.
//!
//! Diagnostics only: used by the binaries and handy in failing tests.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Position;

/// Render the board to a Unicode string for terminal output, rank 8 on top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in (0..8i8).rev() {
        let rank_label = char::from(b'1' + row as u8);
        out.push(rank_label);
        out.push(' ');

        for column in 0..8i8 {
            let symbol = Position::new(column, row)
                .and_then(|square| board.get_piece(square))
                .map_or('·', |piece| piece.figurine());
            out.push(symbol);

            if column < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}
