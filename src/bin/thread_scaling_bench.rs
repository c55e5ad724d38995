use plum_arbiter::engines::engine_trait::Algorithm;
use plum_arbiter::game_state::chess_rules::{KIWIPETE_FEN, STARTING_POSITION_FEN};
use plum_arbiter::game_state::game_history::GameHistory;
use plum_arbiter::search::negamax::NegaMax;
use plum_arbiter::search::threading::{ForkPolicy, ThreadingConfig};
use plum_arbiter::utils::fen_parser::parse_fen;
use std::env;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let max_threads: usize = parse_arg(&args, 1, 8usize);
    let depth: u8 = parse_arg(&args, 2, 3u8);
    let runs_per_thread: usize = parse_arg(&args, 3, 3usize);
    let fork_policy: ForkPolicy = parse_arg(&args, 4, ForkPolicy::WhenPoolIdle);

    let positions: Vec<_> = [
        STARTING_POSITION_FEN,
        KIWIPETE_FEN,
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ]
    .iter()
    .filter_map(|fen| parse_fen(fen).ok())
    .collect();
    let history = GameHistory::new();

    println!(
        "Thread scaling benchmark: max_threads={} depth={} runs_per_thread={} fork_policy={:?}",
        max_threads, depth, runs_per_thread, fork_policy
    );
    println!("threads,total_ms,avg_ms,nodes,positions,searched_runs");

    for threads in 1..=max_threads.max(1) {
        let threading = ThreadingConfig::default()
            .with_threads(threads)
            .with_fork_policy(fork_policy);
        let mut total_ms: u128 = 0;
        let mut total_nodes: u64 = 0;
        let mut searched_runs = 0usize;

        for _ in 0..runs_per_thread.max(1) {
            for (board, side) in &positions {
                let engine = match NegaMax::new(*side, depth, threading) {
                    Ok(engine) => engine,
                    Err(err) => {
                        eprintln!("skipping {threads} threads: {err}");
                        continue;
                    }
                };

                let start = Instant::now();
                let searched = engine.search_root(board, &history);
                let elapsed_ms = start.elapsed().as_millis();
                engine.shutdown_pool();
                if let Err(err) = searched {
                    eprintln!("search failed with {threads} threads, run not timed: {err}");
                    continue;
                }
                total_ms += elapsed_ms;
                total_nodes += engine.nodes_visited();
                searched_runs += 1;
            }
        }

        let avg_ms = if searched_runs == 0 {
            0.0
        } else {
            total_ms as f64 / searched_runs as f64
        };
        println!(
            "{},{},{:.2},{},{},{}",
            threads,
            total_ms,
            avg_ms,
            total_nodes,
            positions.len(),
            searched_runs
        );
    }
}
