//! Minimal head-to-head self-play harness for local testing.
//!
//! This module drives two `Algorithm` implementations through a `GameState`
//! without any UI, from the classic or a seeded Fischer setup.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::chess_errors::MatchError;
use crate::engines::engine_trait::Algorithm;
use crate::engines::timed_search::choose_move_within;
use crate::game_state::board_setup::{setup_board, SetupKind};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::{GameState, GameStatus};
use crate::game_state::game_state_checker::DrawReason;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    WhiteWinResignation,
    BlackWinResignation,
    Draw(DrawReason),
    DrawMaxPlies,
}

impl MatchOutcome {
    fn from_status(status: GameStatus) -> Self {
        match status {
            GameStatus::LightWins => MatchOutcome::WhiteWinCheckmate,
            GameStatus::DarkWins => MatchOutcome::BlackWinCheckmate,
            GameStatus::Resigned {
                winner: Color::Light,
            } => MatchOutcome::WhiteWinResignation,
            GameStatus::Resigned {
                winner: Color::Dark,
            } => MatchOutcome::BlackWinResignation,
            GameStatus::Draw(reason) => MatchOutcome::Draw(reason),
            GameStatus::InProgress => MatchOutcome::DrawMaxPlies,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::WhiteWinCheckmate | MatchOutcome::WhiteWinResignation => Some(Color::Light),
            MatchOutcome::BlackWinCheckmate | MatchOutcome::BlackWinResignation => Some(Color::Dark),
            MatchOutcome::Draw(_) | MatchOutcome::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub setup: SetupKind,
    pub max_plies: u16,
    /// Seeds the Fischer back rank. Ignored for the classic setup.
    pub seed: u64,
    /// Per-move budget enforced through `choose_move_within`. `None` lets
    /// every search run to its configured depth.
    pub move_budget: Option<Duration>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            setup: SetupKind::Classic,
            max_plies: 300,
            seed: 0,
            move_budget: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub played_moves_lan: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub wall_time: Duration,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

impl MatchResult {
    pub fn report(&self) -> String {
        format!(
            "started={} outcome={:?} plies={} white_moves={} black_moves={} wall_ms={}",
            self.started_at.to_rfc3339(),
            self.outcome,
            self.played_moves_lan.len(),
            self.white_move_count,
            self.black_move_count,
            self.wall_time.as_millis()
        )
    }
}

/// Play a single match from the setup described by `config`.
///
/// `white` must play Light and `black` must play Dark.
pub fn play_match(
    white: Arc<dyn Algorithm>,
    black: Arc<dyn Algorithm>,
    config: &MatchConfig,
) -> Result<MatchResult, MatchError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let board = setup_board(config.setup, &mut rng);
    let state = GameState::new(board, Color::Light)?;
    play_match_from_state(white, black, state, config)
}

/// Play a single match from a caller-provided state. The setup and seed in
/// `config` are ignored.
pub fn play_match_from_state(
    white: Arc<dyn Algorithm>,
    black: Arc<dyn Algorithm>,
    mut state: GameState,
    config: &MatchConfig,
) -> Result<MatchResult, MatchError> {
    check_seat(white.as_ref(), Color::Light)?;
    check_seat(black.as_ref(), Color::Dark)?;

    let started_at = Utc::now();
    let clock = Instant::now();
    let mut played_moves_lan = Vec::<String>::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    for _ in 0..config.max_plies {
        if state.status().is_over() {
            break;
        }

        let mover = state.side_to_move();
        let algorithm = match mover {
            Color::Light => &white,
            Color::Dark => &black,
        };

        let started = Instant::now();
        let chosen = match config.move_budget {
            Some(budget) => {
                choose_move_within(Arc::clone(algorithm), state.board(), state.history(), budget)?
            }
            None => algorithm.find_best_move(state.board(), state.history())?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::Light => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Dark => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let lan = move_to_long_algebraic(&chosen);
        debug!(
            ply = played_moves_lan.len() + 1,
            algorithm = algorithm.name(),
            mv = %lan,
            "self-play move"
        );
        state.make_move(chosen)?;
        played_moves_lan.push(lan);
    }

    let outcome = MatchOutcome::from_status(state.status());
    let wall_time = clock.elapsed();
    info!(
        white = white.name(),
        black = black.name(),
        outcome = ?outcome,
        plies = played_moves_lan.len(),
        wall_ms = wall_time.as_millis() as u64,
        "match finished"
    );

    Ok(MatchResult {
        outcome,
        final_state: state,
        played_moves_lan,
        started_at,
        wall_time,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
    })
}

fn check_seat(algorithm: &dyn Algorithm, seat: Color) -> Result<(), MatchError> {
    if algorithm.color() == seat {
        Ok(())
    } else {
        Err(MatchError::WrongSeat {
            name: algorithm.name(),
            plays: algorithm.color(),
            seat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_random::RandomAlgorithm;
    use crate::search::minimax::MiniMax;
    use crate::utils::fen_parser::parse_fen;

    fn random_pair(seed: u64) -> (Arc<dyn Algorithm>, Arc<dyn Algorithm>) {
        (
            Arc::new(RandomAlgorithm::seeded(Color::Light, seed)),
            Arc::new(RandomAlgorithm::seeded(Color::Dark, seed + 1)),
        )
    }

    #[test]
    fn random_self_play_respects_the_ply_cap() {
        let (white, black) = random_pair(11);
        let config = MatchConfig {
            max_plies: 40,
            ..MatchConfig::default()
        };
        let result = play_match(white, black, &config).expect("match should run");
        assert!(result.played_moves_lan.len() <= 40);
        assert_eq!(
            result.final_state.history().ply_count(),
            result.played_moves_lan.len()
        );
        if result.played_moves_lan.len() < 40 {
            assert_ne!(result.outcome, MatchOutcome::DrawMaxPlies);
        }
        assert!(result.report().contains("outcome="));
    }

    #[test]
    fn fischer_setup_is_playable() {
        let (white, black) = random_pair(3);
        let config = MatchConfig {
            setup: SetupKind::Fischer,
            max_plies: 30,
            seed: 99,
            move_budget: None,
        };
        let result = play_match(white, black, &config).expect("match should run");
        assert!(!result.played_moves_lan.is_empty());
    }

    #[test]
    fn minimax_converts_a_mate_in_one() {
        let (board, side) =
            parse_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").expect("FEN should parse");
        let state = GameState::new(board, side).expect("both kings present");
        let white: Arc<dyn Algorithm> = Arc::new(MiniMax::new(Color::Light, 1));
        let black: Arc<dyn Algorithm> = Arc::new(RandomAlgorithm::seeded(Color::Dark, 5));
        let result = play_match_from_state(white, black, state, &MatchConfig::default())
            .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::WhiteWinCheckmate);
        assert_eq!(result.played_moves_lan, vec!["a1a8".to_owned()]);
        assert_eq!(result.outcome.winner(), Some(Color::Light));
    }

    #[test]
    fn seats_must_match_colours() {
        let white: Arc<dyn Algorithm> = Arc::new(RandomAlgorithm::seeded(Color::Dark, 1));
        let black: Arc<dyn Algorithm> = Arc::new(RandomAlgorithm::seeded(Color::Dark, 2));
        let err = play_match(white, black, &MatchConfig::default()).expect_err("wrong seat");
        assert!(matches!(
            err,
            MatchError::WrongSeat {
                seat: Color::Light,
                ..
            }
        ));
    }

    #[test]
    fn budgeted_moves_still_complete() {
        let white: Arc<dyn Algorithm> = Arc::new(MiniMax::new(Color::Light, 1));
        let black: Arc<dyn Algorithm> = Arc::new(RandomAlgorithm::seeded(Color::Dark, 8));
        let config = MatchConfig {
            max_plies: 6,
            move_budget: Some(Duration::from_secs(10)),
            ..MatchConfig::default()
        };
        let result = play_match(white, black, &config).expect("match should run");
        assert_eq!(result.played_moves_lan.len(), 6);
        assert_eq!(result.white_move_count, 3);
        assert_eq!(result.black_move_count, 3);
    }
}
