//! Self-play runner.
//!
//! Run with:
//! `cargo run --release -- --depth 3 --plies 120`
//! `cargo run --release -- --random-black --seed 7 --verbose`
//!
//! Set `RUST_LOG=plum_xiangqi=debug` for per-move search traces.

use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use plum_xiangqi::engines::engine_minimax::MinimaxEngine;
use plum_xiangqi::engines::engine_random::RandomEngine;
use plum_xiangqi::engines::engine_trait::{Engine, EngineError};
use plum_xiangqi::utils::engine_match_harness::{play_engine_match, MatchConfig};
use plum_xiangqi::utils::render_board::{render_board, render_control};

#[derive(Debug, Clone)]
struct Args {
    depth: u8,
    plies: u16,
    seed: u64,
    random_black: bool,
    verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            depth: 3,
            plies: 120,
            seed: 0,
            random_black: false,
            verbose: false,
        }
    }
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--depth" => {
                let raw = value("--depth")?;
                args.depth = raw
                    .parse()
                    .map_err(|_| format!("invalid --depth value '{raw}'"))?;
            }
            "--plies" => {
                let raw = value("--plies")?;
                args.plies = raw
                    .parse()
                    .map_err(|_| format!("invalid --plies value '{raw}'"))?;
            }
            "--seed" => {
                let raw = value("--seed")?;
                args.seed = raw
                    .parse()
                    .map_err(|_| format!("invalid --seed value '{raw}'"))?;
            }
            "--random-black" => args.random_black = true,
            "--verbose" | "-v" => args.verbose = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(args)
}

fn run(args: &Args) -> Result<(), EngineError> {
    let mut red = MinimaxEngine::with_seed(args.depth, args.seed);
    let mut black: Box<dyn Engine> = if args.random_black {
        Box::new(RandomEngine::with_seed(args.seed.wrapping_add(1)))
    } else {
        let mut engine = MinimaxEngine::with_seed(args.depth, args.seed.wrapping_add(1));
        engine.set_option("RandomizeNearBest", "true")?;
        Box::new(engine)
    };

    let config = MatchConfig {
        max_plies: args.plies,
        ..MatchConfig::default()
    };
    let mut result = play_engine_match(&mut red, black.as_mut(), config)?;
    let control = if args.verbose {
        Some(render_control(&mut result.final_board)?)
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let print = |out: &mut io::StdoutLock<'_>| -> io::Result<()> {
        writeln!(out, "{}", render_board(&result.final_board))?;
        if let Some(control) = &control {
            writeln!(out, "{control}")?;
        }
        result.move_log.write_to(out)?;
        writeln!(out, "{}", result.report())
    };
    if let Err(e) = print(&mut out) {
        tracing::error!(error = %e, "failed to write match report");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: plum_xiangqi [--depth N] [--plies N] [--seed N] [--random-black] [--verbose]");
            return ExitCode::from(2);
        }
    };

    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "match aborted");
            ExitCode::FAILURE
        }
    }
}
