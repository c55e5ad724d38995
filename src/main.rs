use std::env;
use std::process::ExitCode;
use std::time::Duration;

use plum_arbiter::engines::engine_trait::{build_algorithm, AlgorithmKind};
use plum_arbiter::game_state::board_setup::SetupKind;
use plum_arbiter::game_state::chess_types::Color;
use plum_arbiter::search::threading::ThreadingConfig;
use plum_arbiter::utils::engine_match_harness::{play_match, MatchConfig};
use plum_arbiter::utils::render_game_state::render_board;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

/// `plum_arbiter [white] [black] [depth] [threads] [max_plies] [fischer_seed] [move_ms]`
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let white_kind: AlgorithmKind = parse_arg(&args, 1, AlgorithmKind::Negamax);
    let black_kind: AlgorithmKind = parse_arg(&args, 2, AlgorithmKind::Random);
    let depth: u8 = parse_arg(&args, 3, 3u8);
    let threads: usize = parse_arg(&args, 4, 2usize);
    let max_plies: u16 = parse_arg(&args, 5, 200u16);
    let fischer_seed: Option<u64> = args.get(6).and_then(|s| s.parse().ok());
    let move_ms: Option<u64> = args.get(7).and_then(|s| s.parse().ok());

    let threading = ThreadingConfig::default().with_threads(threads);
    let players = build_algorithm(white_kind, Color::Light, depth, threading).and_then(|white| {
        build_algorithm(black_kind, Color::Dark, depth, threading).map(|black| (white, black))
    });
    let (white, black) = match players {
        Ok(players) => players,
        Err(err) => {
            error!(%err, "failed to build players");
            return ExitCode::FAILURE;
        }
    };

    let config = MatchConfig {
        setup: if fischer_seed.is_some() {
            SetupKind::Fischer
        } else {
            SetupKind::Classic
        },
        max_plies,
        seed: fischer_seed.unwrap_or(0),
        move_budget: move_ms.map(Duration::from_millis),
    };

    let result = play_match(white.clone(), black.clone(), &config);
    white.shutdown_pool();
    black.shutdown_pool();

    match result {
        Ok(result) => {
            println!("{}", render_board(result.final_state.board()));
            println!("moves: {}", result.played_moves_lan.join(" "));
            println!("{}", result.report());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "match aborted");
            ExitCode::FAILURE
        }
    }
}
